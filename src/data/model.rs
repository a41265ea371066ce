use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single scalar in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, the subset of dataframe dtypes a CSV can carry.
/// Value-count tables key on `CellValue`, so it must be `Ord` and `Hash`.
/// Equality follows `Ord` (`total_cmp` for floats), matching `Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NaN"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{}", format_float(*v)),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Whole floats keep a trailing `.0` so `10.0` never reads as an integer.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Inferred scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// Dataframe-style dtype label shown in the structural report.
    pub fn dtype(&self) -> &'static str {
        match self.kind {
            ColumnKind::Text => "object",
            ColumnKind::Numeric if self.values.is_empty() => "object",
            ColumnKind::Numeric => {
                let all_int = self
                    .values
                    .iter()
                    .all(|v| matches!(v, CellValue::Integer(_)));
                if all_int {
                    "int64"
                } else {
                    "float64"
                }
            }
        }
    }

    /// Non-missing values as `f64`, in row order. Empty for text columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete uploaded table
// ---------------------------------------------------------------------------

/// Columnar table parsed from one upload. Every column has `row_count` cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Assemble a dataset, rejecting columns of unequal length.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let row_count = columns.first().map_or(0, |c| c.values.len());
        if columns.iter().any(|c| c.values.len() != row_count) {
            return None;
        }
        Some(Dataset { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First `n` rows rendered as display strings, row-major.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..self.row_count.min(n))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values[row].to_string())
                    .collect()
            })
            .collect()
    }
}
