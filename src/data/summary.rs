use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{ColumnKind, Dataset};
use super::value_counts::value_counts;

// ---------------------------------------------------------------------------
// Structural report (column names, types, non-missing counts)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub dtype: &'static str,
    pub non_null: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralReport {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    /// dtype label → number of columns with that dtype.
    pub dtype_counts: BTreeMap<&'static str, usize>,
}

impl StructuralReport {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

pub fn structural_report(dataset: &Dataset) -> StructuralReport {
    let columns: Vec<ColumnInfo> = dataset
        .columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name.clone(),
            kind: c.kind,
            dtype: c.dtype(),
            non_null: c.non_null_count(),
        })
        .collect();

    let mut dtype_counts = BTreeMap::new();
    for info in &columns {
        *dtype_counts.entry(info.dtype).or_insert(0) += 1;
    }

    StructuralReport {
        rows: dataset.row_count(),
        columns,
        dtype_counts,
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Statistics for a numeric column. Every field but `count` is `None`
/// when it is undefined for the data (no values, or `std` with one value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Text(TextStats),
}

impl ColumnStats {
    pub fn count(&self) -> usize {
        match self {
            ColumnStats::Numeric(s) => s.count,
            ColumnStats::Text(s) => s.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeReport {
    pub columns: Vec<ColumnDescription>,
}

impl DescribeReport {
    pub fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.stats)
    }
}

pub fn describe(dataset: &Dataset) -> DescribeReport {
    let columns = dataset
        .columns()
        .iter()
        .map(|col| {
            let stats = match col.kind {
                ColumnKind::Numeric => ColumnStats::Numeric(numeric_stats(&col.numeric_values())),
                ColumnKind::Text => {
                    let counts = value_counts(col);
                    let top = counts.first();
                    ColumnStats::Text(TextStats {
                        count: col.non_null_count(),
                        unique: top.map(|_| counts.len()),
                        top: top.map(|c| c.label.clone()),
                        freq: top.map(|c| c.count),
                    })
                }
            };
            ColumnDescription {
                name: col.name.clone(),
                stats,
            }
        })
        .collect();

    DescribeReport { columns }
}

pub fn numeric_stats(values: &[f64]) -> NumericStats {
    let n = values.len();
    if n == 0 {
        return NumericStats {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    NumericStats {
        count: n,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        q25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.5)),
        q75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// Linear interpolation between closest ranks on pre-sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn structure_of_example_survey() {
        let ds = parse_csv(b"name,age\nA,10\nB,20\nB,30").unwrap();
        let report = structural_report(&ds);
        assert_eq!(report.rows, 3);
        assert_eq!(report.column_count(), 2);
        assert_eq!(report.columns[1].kind, ColumnKind::Numeric);
        assert_eq!(report.columns[1].dtype, "int64");
        assert_eq!(report.columns[0].dtype, "object");
        assert_eq!(report.dtype_counts.get("int64"), Some(&1));
    }

    #[test]
    fn numeric_and_text_statistics() {
        let ds = parse_csv(b"name,age\nA,10\nB,20\nB,30").unwrap();
        let report = describe(&ds);

        let Some(ColumnStats::Numeric(age)) = report.get("age") else {
            panic!("age should be numeric");
        };
        assert_eq!(age.count, 3);
        assert!(approx(age.mean, 20.0));
        assert!(approx(age.std, 10.0));
        assert!(approx(age.min, 10.0));
        assert!(approx(age.q25, 15.0));
        assert!(approx(age.median, 20.0));
        assert!(approx(age.q75, 25.0));
        assert!(approx(age.max, 30.0));

        let Some(ColumnStats::Text(name)) = report.get("name") else {
            panic!("name should be text");
        };
        assert_eq!(name.count, 3);
        assert_eq!(name.unique, Some(2));
        assert_eq!(name.top.as_deref(), Some("B"));
        assert_eq!(name.freq, Some(2));
    }

    #[test]
    fn empty_columns_report_undefined_statistics() {
        let ds = parse_csv(b"a,b\n,\nNA,\n").unwrap();
        let report = describe(&ds);
        for col in &report.columns {
            assert_eq!(col.stats.count(), 0);
        }
        let Some(ColumnStats::Numeric(a)) = report.get("a") else {
            panic!("all-missing column is numeric");
        };
        assert!(a.mean.is_none() && a.std.is_none() && a.max.is_none());
    }

    #[test]
    fn nan_cells_do_not_count() {
        let ds = parse_csv(b"x\n1\nNAN\n3\n").unwrap();
        let Some(ColumnStats::Numeric(x)) = describe(&ds).get("x").cloned() else {
            panic!("x should be numeric");
        };
        assert_eq!(x.count, 2);
        assert!(approx(x.mean, 2.0));
        assert!(approx(x.max, 3.0));
        assert!(approx(x.q75, 2.5));
    }

    #[test]
    fn padded_numbers_get_numeric_statistics() {
        let ds = parse_csv(b"name, age\nA, 10\nB, 20\nB, 30\n").unwrap();
        let Some(ColumnStats::Numeric(age)) = describe(&ds).get(" age").cloned() else {
            panic!("age should be numeric");
        };
        assert!(approx(age.mean, 20.0));
    }

    #[test]
    fn header_only_columns_are_object() {
        let ds = parse_csv(b"a,b\n").unwrap();
        let report = structural_report(&ds);
        assert_eq!(report.dtype_counts.get("object"), Some(&2));
    }

    #[test]
    fn single_value_has_no_std() {
        let stats = numeric_stats(&[4.0]);
        assert!(approx(stats.mean, 4.0));
        assert!(stats.std.is_none());
        assert!(approx(stats.q75, 4.0));
    }

    #[test]
    fn quartiles_interpolate() {
        let stats = numeric_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert!(approx(stats.q25, 1.75));
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.q75, 3.25));
    }

    #[test]
    fn reports_serialize_to_json() {
        let ds = parse_csv(b"name,age\nA,10\n").unwrap();
        let json = serde_json::to_value(describe(&ds)).unwrap();
        assert_eq!(json["columns"][1]["stats"]["kind"], "numeric");
        assert_eq!(json["columns"][0]["stats"]["top"], "A");
    }
}
