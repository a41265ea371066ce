use std::collections::HashMap;

use serde::Serialize;

use super::model::{CellValue, Column};

/// One row of a value-count table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub label: String,
    pub count: usize,
    #[serde(skip)]
    pub value: CellValue,
}

/// Distinct non-missing values of `column` with their occurrence counts,
/// highest count first. Equal counts keep first-appearance order.
pub fn value_counts(column: &Column) -> Vec<ValueCount> {
    let mut first_seen: HashMap<&CellValue, usize> = HashMap::new();
    let mut entries: Vec<(CellValue, usize)> = Vec::new();

    for value in column.values.iter().filter(|v| !v.is_null()) {
        match first_seen.get(value) {
            Some(&slot) => entries[slot].1 += 1,
            None => {
                first_seen.insert(value, entries.len());
                entries.push((value.clone(), 1));
            }
        }
    }

    // Stable sort keeps first appearance among ties.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .map(|(value, count)| ValueCount {
            label: value.to_string(),
            count,
            value,
        })
        .collect()
}
