use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::format_float;
use crate::data::summary::{ColumnStats, DescribeReport, StructuralReport};

// ---------------------------------------------------------------------------
// Generic grid
// ---------------------------------------------------------------------------

/// Render a simple striped grid of strings.
pub fn string_table(ui: &mut Ui, id: &str, headers: &[String], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Report → grid conversions
// ---------------------------------------------------------------------------

/// One row per column: `#`, name, non-null count, dtype.
pub fn structure_rows(report: &StructuralReport) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = ["#", "Column", "Non-Null Count", "Dtype"]
        .map(String::from)
        .to_vec();
    let rows = report
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                i.to_string(),
                c.name.clone(),
                format!("{} non-null", c.non_null),
                c.dtype.to_string(),
            ]
        })
        .collect();
    (headers, rows)
}

/// `dtypes: float64(1), int64(2), object(1)`
pub fn dtype_footer(report: &StructuralReport) -> String {
    let parts: Vec<String> = report
        .dtype_counts
        .iter()
        .map(|(dtype, n)| format!("{dtype}({n})"))
        .collect();
    format!("dtypes: {}", parts.join(", "))
}

const STAT_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Statistics as rows, dataset columns as columns. Cells that do not
/// apply to a column's kind, or are undefined, read `NaN`.
pub fn describe_rows(report: &DescribeReport) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers = vec![String::new()];
    headers.extend(report.columns.iter().map(|c| c.name.clone()));

    let rows = STAT_ROWS
        .iter()
        .map(|&stat| {
            let mut row = vec![stat.to_string()];
            row.extend(report.columns.iter().map(|c| stat_cell(&c.stats, stat)));
            row
        })
        .collect();
    (headers, rows)
}

fn stat_cell(stats: &ColumnStats, stat: &str) -> String {
    const NAN: &str = "NaN";
    match stats {
        ColumnStats::Numeric(s) => {
            let value = match stat {
                "count" => return s.count.to_string(),
                "mean" => s.mean,
                "std" => s.std,
                "min" => s.min,
                "25%" => s.q25,
                "50%" => s.median,
                "75%" => s.q75,
                "max" => s.max,
                _ => None,
            };
            value.map_or_else(|| NAN.to_string(), format_stat)
        }
        ColumnStats::Text(s) => match stat {
            "count" => s.count.to_string(),
            "unique" => s.unique.map_or_else(|| NAN.to_string(), |u| u.to_string()),
            "top" => s.top.clone().unwrap_or_else(|| NAN.to_string()),
            "freq" => s.freq.map_or_else(|| NAN.to_string(), |f| f.to_string()),
            _ => NAN.to_string(),
        },
    }
}

/// Up to six decimals, trailing zeros trimmed.
fn format_stat(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let rounded = format!("{v:.6}");
    let trimmed = rounded.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format_float(trimmed.trim_end_matches('.').parse().unwrap_or(v))
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::summary::{describe, structural_report};

    #[test]
    fn describe_grid_matches_example() {
        let ds = parse_csv(b"name,age\nA,10\nB,20\nB,30").unwrap();
        let (headers, rows) = describe_rows(&describe(&ds));
        assert_eq!(headers, vec!["", "name", "age"]);
        assert_eq!(rows.len(), STAT_ROWS.len());
        assert_eq!(rows[0], vec!["count", "3", "3"]);
        assert_eq!(rows[2], vec!["top", "B", "NaN"]);
        assert_eq!(rows[4], vec!["mean", "NaN", "20.0"]);
        assert_eq!(rows[5], vec!["std", "NaN", "10.0"]);
    }

    #[test]
    fn structure_grid_and_footer() {
        let ds = parse_csv(b"name,age,score\nA,10,1.5\nB,,2\n").unwrap();
        let report = structural_report(&ds);
        let (headers, rows) = structure_rows(&report);
        assert_eq!(headers.len(), 4);
        assert_eq!(rows[1], vec!["1", "age", "1 non-null", "float64"]);
        assert_eq!(dtype_footer(&report), "dtypes: float64(2), object(1)");
    }

    #[test]
    fn stats_are_trimmed() {
        assert_eq!(format_stat(20.0), "20.0");
        assert_eq!(format_stat(1.0 / 3.0), "0.333333");
        assert_eq!(format_stat(2.5), "2.5");
    }
}
