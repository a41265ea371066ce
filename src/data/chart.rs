use std::f64::consts::TAU;
use std::fmt;

use super::model::Dataset;
use super::value_counts::{ValueCount, value_counts};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Chart kinds and renderable chart data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "Bar Chart"),
            ChartKind::Pie => write!(f, "Pie Chart"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub height: f64,
}

/// A pie wedge. Angles are in radians, measured counter-clockwise from
/// the positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep: f64,
    /// `100 × count / total`, one decimal place, e.g. `"66.7%"`.
    pub percent_label: String,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar { column: String, bars: Vec<Bar> },
    Pie { column: String, wedges: Vec<Wedge> },
}

impl Chart {
    pub fn column(&self) -> &str {
        match self {
            Chart::Bar { column, .. } | Chart::Pie { column, .. } => column,
        }
    }

    /// Number of bars or wedges.
    pub fn len(&self) -> usize {
        match self {
            Chart::Bar { bars, .. } => bars.len(),
            Chart::Pie { wedges, .. } => wedges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Compute the value-count table for `column` and lay it out as `kind`.
pub fn build_chart(dataset: &Dataset, column: &str, kind: ChartKind) -> Result<Chart, PipelineError> {
    let col = dataset
        .column(column)
        .ok_or_else(|| PipelineError::InvalidColumn(column.to_string()))?;
    let counts = value_counts(col);
    let column = column.to_string();

    Ok(match kind {
        ChartKind::Bar => Chart::Bar {
            column,
            bars: bars(&counts),
        },
        ChartKind::Pie => Chart::Pie {
            column,
            wedges: wedges(&counts),
        },
    })
}

fn bars(counts: &[ValueCount]) -> Vec<Bar> {
    counts
        .iter()
        .map(|c| Bar {
            label: c.label.clone(),
            height: c.count as f64,
        })
        .collect()
}

fn wedges(counts: &[ValueCount]) -> Vec<Wedge> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    counts
        .iter()
        .map(|c| {
            let fraction = c.count as f64 / total as f64;
            let sweep = fraction * TAU;
            let wedge = Wedge {
                label: c.label.clone(),
                count: c.count,
                fraction,
                start_angle: angle,
                sweep,
                percent_label: format!("{:.1}%", 100.0 * fraction),
            };
            angle += sweep;
            wedge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn survey() -> Dataset {
        parse_csv(b"name,age\nA,10\nB,20\nB,30").unwrap()
    }

    #[test]
    fn bar_heights_follow_value_counts() {
        let chart = build_chart(&survey(), "name", ChartKind::Bar).unwrap();
        let Chart::Bar { bars, .. } = chart else {
            panic!("expected bar chart");
        };
        assert_eq!(bars[0], Bar { label: "B".into(), height: 2.0 });
        assert_eq!(bars[1], Bar { label: "A".into(), height: 1.0 });
    }

    #[test]
    fn pie_labels_match_example() {
        let chart = build_chart(&survey(), "name", ChartKind::Pie).unwrap();
        let Chart::Pie { wedges, .. } = chart else {
            panic!("expected pie chart");
        };
        let labels: Vec<(&str, &str)> = wedges
            .iter()
            .map(|w| (w.label.as_str(), w.percent_label.as_str()))
            .collect();
        assert_eq!(labels, vec![("B", "66.7%"), ("A", "33.3%")]);
    }

    #[test]
    fn pie_covers_full_circle_and_labels_sum_to_100() {
        let ds = parse_csv(b"c\na\nb\nc\nc\nd\nd\nd\n").unwrap();
        let Chart::Pie { wedges, .. } = build_chart(&ds, "c", ChartKind::Pie).unwrap() else {
            panic!("expected pie chart");
        };
        let sweep: f64 = wedges.iter().map(|w| w.sweep).sum();
        assert!((sweep - TAU).abs() < 1e-9);

        let pct: f64 = wedges
            .iter()
            .map(|w| w.percent_label.trim_end_matches('%').parse::<f64>().unwrap())
            .sum();
        assert!((pct - 100.0).abs() <= 0.1 * wedges.len() as f64);

        for pair in wedges.windows(2) {
            assert!((pair[0].start_angle + pair[0].sweep - pair[1].start_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = build_chart(&survey(), "height", ChartKind::Bar).unwrap_err();
        assert_eq!(err, PipelineError::InvalidColumn("height".into()));
    }

    #[test]
    fn all_missing_column_gives_empty_chart() {
        let ds = parse_csv(b"a,b\n1,\n2,\n").unwrap();
        let chart = build_chart(&ds, "b", ChartKind::Pie).unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart.column(), "b");
    }
}
