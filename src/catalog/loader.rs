use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::catalog::normalize::{RawCatalog, RawCell};
use crate::error::{PlanError, Result};

/// Load a raw catalog from a `.csv` or `.json` file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<RawCatalog> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => read_csv_catalog(fs::File::open(path)?),
        Some("json") => read_json_catalog(&fs::read_to_string(path)?),
        _ => Err(PlanError::InvalidInput(format!(
            "unsupported catalog format: {}",
            path.display()
        ))),
    }
}

/// Read a CSV table. Every cell is kept as text; coercion happens during
/// normalization.
pub fn read_csv_catalog<R: Read>(reader: R) -> Result<RawCatalog> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut catalog = RawCatalog::new(headers);

    for record in rdr.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    RawCell::Missing
                } else {
                    RawCell::Text(field.to_string())
                }
            })
            .collect();
        catalog.push_row(row);
    }

    Ok(catalog)
}

/// Read a JSON array of objects. Columns are the union of keys across all
/// records.
pub fn read_json_catalog(content: &str) -> Result<RawCatalog> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_str(content)?;

    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut catalog = RawCatalog::new(headers);
    for record in &records {
        let row = catalog
            .headers
            .iter()
            .map(|h| match record.get(h) {
                None | Some(Value::Null) => RawCell::Missing,
                Some(Value::Number(n)) => n.as_f64().map_or(RawCell::Missing, RawCell::Number),
                Some(Value::String(s)) => RawCell::Text(s.clone()),
                Some(other) => RawCell::Text(other.to_string()),
            })
            .collect();
        catalog.push_row(row);
    }

    Ok(catalog)
}
