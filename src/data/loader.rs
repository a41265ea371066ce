use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CellValue, Column, ColumnKind, Dataset};
use crate::error::PipelineError;

/// Tokens read as a missing value, matching the usual dataframe defaults.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read an upload from disk in one go. Parsing happens separately so a
/// failed read never reaches the session store.
pub fn read_upload(path: &Path) -> Result<Vec<u8>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        bail!("Unsupported file extension: .{ext} (expected .csv)");
    }
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Parse comma-separated, header-first CSV bytes into a [`Dataset`].
///
/// * rows longer than the header are rejected
/// * rows shorter than the header are padded with missing values
/// * each column is typed independently, see [`infer_column`]
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, PipelineError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if raw_headers.is_empty() {
        return Err(PipelineError::Parse("no columns to parse from file".into()));
    }
    let headers = normalize_headers(&raw_headers);
    let width = headers.len();

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); width];

    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line());
            return Err(PipelineError::Parse(format!(
                "expected {width} fields in line {line}, saw {}",
                record.len()
            )));
        }
        for (idx, cells) in raw_columns.iter_mut().enumerate() {
            cells.push(record.get(idx).unwrap_or("").to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, cells)| infer_column(name, &cells))
        .collect();

    Dataset::from_columns(columns)
        .ok_or_else(|| PipelineError::Parse("columns have unequal lengths".into()))
}

// ---------------------------------------------------------------------------
// Header + type inference helpers
// ---------------------------------------------------------------------------

/// Blank headers become `Unnamed: <idx>`; repeats get `.1`, `.2`, ... suffixes.
fn normalize_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (idx, h) in raw.iter().enumerate() {
        let base = if h.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            h.clone()
        };
        let mut name = base.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

fn is_missing(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

/// Numeric reading of one cell, ignoring surrounding whitespace.
/// A float NaN counts as missing and `-0.0` folds into `0.0`.
fn parse_number(s: &str) -> Option<CellValue> {
    let t = s.trim();
    if let Ok(i) = t.parse::<i64>() {
        return Some(CellValue::Integer(i));
    }
    let v = t.parse::<f64>().ok()?;
    Some(if v.is_nan() {
        CellValue::Null
    } else if v == 0.0 {
        CellValue::Float(0.0)
    } else {
        CellValue::Float(v)
    })
}

/// A column is numeric when every non-missing cell parses as a number.
/// Mixed integer/fractional columns are widened to floats.
fn infer_column(name: String, cells: &[String]) -> Column {
    let numeric: Option<Vec<CellValue>> = cells
        .iter()
        .map(|s| {
            if is_missing(s) {
                Some(CellValue::Null)
            } else {
                parse_number(s)
            }
        })
        .collect();

    match numeric {
        Some(mut values) => {
            if values.iter().any(|v| matches!(v, CellValue::Float(_))) {
                for v in values.iter_mut() {
                    if let CellValue::Integer(i) = *v {
                        *v = CellValue::Float(i as f64);
                    }
                }
            }
            Column {
                name,
                kind: ColumnKind::Numeric,
                values,
            }
        }
        None => Column {
            name,
            kind: ColumnKind::Text,
            values: cells
                .iter()
                .map(|s| {
                    if is_missing(s) {
                        CellValue::Null
                    } else {
                        CellValue::Text(s.clone())
                    }
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_rows_and_columns() {
        let ds = parse_csv(b"name,age\nA,10\nB,20\nB,30").unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column_names(), vec!["name", "age"]);
        assert_eq!(ds.column("age").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(ds.column("name").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let ds = parse_csv(b"a,b,c\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 3);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse_csv(b""), Err(PipelineError::Parse(_))));
    }

    #[test]
    fn too_many_fields_is_a_parse_error() {
        let err = parse_csv(b"a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            PipelineError::Parse(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_padded_with_missing() {
        let ds = parse_csv(b"a,b\n1,2\n3\n").unwrap();
        let b = ds.column("b").unwrap();
        assert_eq!(b.values, vec![CellValue::Integer(2), CellValue::Null]);
        assert_eq!(b.non_null_count(), 1);
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        assert!(matches!(
            parse_csv(b"a,b\n\xff\xfe,1\n"),
            Err(PipelineError::Parse(_))
        ));
    }

    #[test]
    fn missing_tokens_and_widening() {
        let ds = parse_csv(b"x,y\n1,NA\n2.5,n/a\n,hello\n").unwrap();
        let x = ds.column("x").unwrap();
        assert_eq!(
            x.values,
            vec![CellValue::Float(1.0), CellValue::Float(2.5), CellValue::Null]
        );
        let y = ds.column("y").unwrap();
        assert_eq!(y.kind, ColumnKind::Text);
        assert_eq!(y.non_null_count(), 1);
    }

    #[test]
    fn padded_numbers_stay_numeric() {
        let ds = parse_csv(b"name, age\nA, 10\nB, 20\nB, 30\n").unwrap();
        let age = ds.column(" age").unwrap();
        assert_eq!(age.kind, ColumnKind::Numeric);
        assert_eq!(age.dtype(), "int64");
        assert_eq!(age.values[0], CellValue::Integer(10));

        let name = ds.column("name").unwrap();
        assert_eq!(name.values[0], CellValue::Text("A".into()));
    }

    #[test]
    fn padded_text_is_kept_verbatim() {
        let ds = parse_csv(b"city\n Oslo\n").unwrap();
        let city = ds.column("city").unwrap();
        assert_eq!(city.kind, ColumnKind::Text);
        assert_eq!(city.values[0], CellValue::Text(" Oslo".into()));
    }

    #[test]
    fn nan_spellings_are_missing() {
        let ds = parse_csv(b"x\n1\nNAN\n3\n").unwrap();
        let x = ds.column("x").unwrap();
        assert_eq!(x.kind, ColumnKind::Numeric);
        assert_eq!(x.non_null_count(), 2);
        assert!(x.values[1].is_null());
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        let ds = parse_csv(b"x\n0.0\n-0.0\n").unwrap();
        let x = ds.column("x").unwrap();
        assert_eq!(x.values, vec![CellValue::Float(0.0), CellValue::Float(0.0)]);
    }

    #[test]
    fn headers_are_deduplicated_and_named() {
        let ds = parse_csv(b"a,,a,a\n1,2,3,4\n").unwrap();
        assert_eq!(ds.column_names(), vec!["a", "Unnamed: 1", "a.1", "a.2"]);
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let ds = parse_csv(b"\xEF\xBB\xBFid,v\n1,2\n").unwrap();
        assert!(ds.column("id").is_some());
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let ds = parse_csv(b"comment\n\"good, fast\"\n").unwrap();
        assert_eq!(
            ds.column("comment").unwrap().values[0],
            CellValue::Text("good, fast".into())
        );
    }

    #[test]
    fn read_upload_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, b"{}").unwrap();
        assert!(read_upload(&path).is_err());
    }

    #[test]
    fn read_upload_returns_file_bytes() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a\n1\n").unwrap();
        let bytes = read_upload(file.path()).unwrap();
        assert_eq!(bytes, b"a\n1\n");
    }
}
