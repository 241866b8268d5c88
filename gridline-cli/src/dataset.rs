//! Dataset loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use gridline_lib::model::Record;

/// Read a JSON array of objects into records keyed by `key_field`.
pub fn load(path: &Path, key_field: &str) -> anyhow::Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let rows = parse(&text, key_field)
        .with_context(|| format!("Invalid dataset {}", path.display()))?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse dataset text. The top level must be an array.
pub fn parse(text: &str, key_field: &str) -> anyhow::Result<Vec<Record>> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = json else {
        bail!("Expected a JSON array of rows");
    };

    let mut rows = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let record = Record::from_json(item, key_field)
            .with_context(|| format!("Row {}", position))?;
        rows.push(record);
    }
    Ok(rows)
}
