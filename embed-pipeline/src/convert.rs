//! CSV-to-records conversion.
//!
//! Turns a headed CSV file into the JSON record shape the pipeline consumes.
//! Cell values are inferred as scalars: empty → null, integer, finite float,
//! otherwise string. Non-finite numerics (a bare `NaN`/`inf` cell) become
//! null — the record model has no representation for them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::PipelineError;
use crate::record::Record;

/// Reads a headed CSV into records, one per row, columns in file order.
///
/// # Errors
/// - [`PipelineError::Csv`] on malformed CSV content.
/// - [`PipelineError::Io`] if the file cannot be opened.
pub fn csv_to_records(path: impl AsRef<Path>) -> Result<Vec<Record>, PipelineError> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading csv");

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut out = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            record.insert(name.to_string(), infer_scalar(cell));
        }
        out.push(record);
    }

    debug!(rows = out.len(), columns = headers.len(), "csv read");
    Ok(out)
}

/// Writes records as one pretty-printed JSON array.
///
/// # Errors
/// [`PipelineError::Io`] / [`PipelineError::Json`] on write failures.
pub fn write_records_json(
    path: impl AsRef<Path>,
    records: &[Record],
) -> Result<(), PipelineError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// File-to-file conversion. Returns the number of converted rows.
///
/// # Errors
/// As [`csv_to_records`] and [`write_records_json`].
pub fn convert_csv_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<usize, PipelineError> {
    let records = csv_to_records(input)?;
    write_records_json(output.as_ref(), &records)?;
    info!(
        rows = records.len(),
        output = %output.as_ref().display(),
        "conversion complete"
    );
    Ok(records.len())
}

fn infer_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return if f.is_finite() { Value::from(f) } else { Value::Null };
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;

    #[test]
    fn scalars_are_inferred() {
        assert_eq!(infer_scalar(""), Value::Null);
        assert_eq!(infer_scalar("   "), Value::Null);
        assert_eq!(infer_scalar("42"), json!(42));
        assert_eq!(infer_scalar("-7"), json!(-7));
        assert_eq!(infer_scalar("3.5"), json!(3.5));
        assert_eq!(infer_scalar("NaN"), Value::Null);
        assert_eq!(infer_scalar("Kern County"), json!("Kern County"));
    }

    #[test]
    fn rows_become_records_in_column_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv_path = dir.path().join("wells.csv");
        let mut f = File::create(&csv_path).expect("create csv");
        writeln!(f, "Well Name,Production Year,Operator").expect("write");
        writeln!(f, "Alpha,2018,Acme Oil").expect("write");
        writeln!(f, "Beta,,").expect("write");
        drop(f);

        let records = csv_to_records(&csv_path).expect("reads");
        assert_eq!(records.len(), 2);

        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["Well Name", "Production Year", "Operator"]);
        assert_eq!(records[0].get("Production Year"), Some(&json!(2018)));
        assert_eq!(records[1].get("Operator"), Some(&Value::Null));
    }

    #[test]
    fn converted_file_loads_back_as_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv_path = dir.path().join("in.csv");
        let json_path = dir.path().join("out.json");

        let mut f = File::create(&csv_path).expect("create csv");
        writeln!(f, "a,b").expect("write");
        writeln!(f, "x,1").expect("write");
        drop(f);

        let count = convert_csv_file(&csv_path, &json_path).expect("converts");
        assert_eq!(count, 1);

        let loaded = crate::loader::load_records_from_path(&json_path).expect("loads");
        assert_eq!(loaded[0].get("a"), Some(&json!("x")));
        assert_eq!(loaded[0].get("b"), Some(&json!(1)));
    }
}
