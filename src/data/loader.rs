use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Record, Table};
use crate::error::ParetoError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a trial table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one trial per row
/// * `.json`    – `[{ "metric_rougeL": 0.41, "cfg_brevity": "short", ... }, ...]`
/// * `.parquet` – one trial per row, scalar columns
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(ParetoError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records with {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_reader_csv(file)
}

/// Read a CSV table from any reader.  The first row is the header; rows
/// shorter than the header simply lack the trailing cells.
pub fn load_reader_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(Record::from_pairs(
            headers.iter().map(String::as_str).zip(row.iter()),
        ));
    }

    Ok(Table::new(headers, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "metric_energy_total_J": 812.4, "metric_rougeL": 0.41, "cfg_brevity": "short" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

pub(crate) fn parse_json_records(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }

        records.push(Record::from_pairs(
            obj.iter()
                .filter_map(|(key, val)| json_to_cell(val).map(|cell| (key.as_str(), cell))),
        ));
    }

    Ok(Table::new(columns, records))
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one trial per row.
///
/// String, integer, float and boolean columns are read; other column types
/// are left out of the records.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            records.push(Record::from_pairs(
                schema.fields().iter().enumerate().filter_map(|(idx, field)| {
                    extract_cell(batch.column(idx), row).map(|cell| (field.name().as_str(), cell))
                }),
            ));
        }
    }

    Ok(Table::new(columns, records))
}

/// Extract a single cell from an Arrow column as text.  `None` for nulls and
/// unsupported types.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|arr| arr.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row).to_string()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row).to_string()),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row).to_string()),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row).to_string()),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|arr| arr.value(row).to_string()),
        other => {
            log::debug!("skipping parquet cell of unsupported type {other:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_records() {
        let data = "metric_energy_total_J,metric_rougeL,cfg_brevity\n\
                    10.5,0.41,short\n\
                    12,,long\n";
        let table = load_reader_csv(data.as_bytes()).unwrap();
        assert_eq!(
            table.columns,
            vec!["metric_energy_total_J", "metric_rougeL", "cfg_brevity"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].get("metric_rougeL"), Some("0.41"));
        assert_eq!(table.records[1].get("metric_rougeL"), None);
        assert_eq!(table.records[1].get("cfg_brevity"), Some("long"));
    }

    #[test]
    fn short_csv_rows_are_accepted() {
        let data = "x,y,label\n1,2\n";
        let table = load_reader_csv(data.as_bytes()).unwrap();
        assert_eq!(table.records[0].get("y"), Some("2"));
        assert_eq!(table.records[0].get("label"), None);
    }

    #[test]
    fn json_values_are_stringified() {
        let text = r#"[{"x": 1.5, "y": 2, "ok": true, "tag": "a", "gone": null},
                       {"x": 3, "extra": "late"}]"#;
        let table = parse_json_records(text).unwrap();
        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.columns.last().map(String::as_str), Some("extra"));
        let first = &table.records[0];
        assert_eq!(first.get("x"), Some("1.5"));
        assert_eq!(first.get("y"), Some("2"));
        assert_eq!(first.get("ok"), Some("true"));
        assert_eq!(first.get("gone"), None);
        assert_eq!(table.records[1].get("extra"), Some("late"));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(parse_json_records(r#"{"x": 1}"#).is_err());
        assert!(parse_json_records(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("trials.xlsx")).unwrap_err();
        let inner = err.downcast_ref::<ParetoError>();
        assert!(matches!(inner, Some(ParetoError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }
}
