//! View files.
//!
//! A view file is JSON describing how to present a dataset:
//!
//! ```json
//! {
//!   "key_field": "id",
//!   "columns": [
//!     { "key": "name", "title": "Name" },
//!     { "key": "created", "title": "Created", "format": "date" },
//!     { "key": "ratio", "align": "right", "format": "percent", "searchable": false }
//!   ],
//!   "table": { "page_size": 20, "initial_sort": { "key": "name", "direction": "asc" } }
//! }
//! ```
//!
//! Every section is optional. Without columns, one column per field found in
//! the data is shown, key field first.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use gridline_lib::TableConfig;
use gridline_lib::column::{Alignment, Column, ColumnWidth};
use gridline_lib::model::{Record, TableRow, Value};
use serde::{Deserialize, Serialize};

const DEFAULT_KEY_FIELD: &str = "id";

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

fn default_true() -> bool {
    true
}

/// Display format applied to a column's cells. Sorting and search still use
/// the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    /// RFC 3339 timestamps shown as `YYYY-MM-DD`.
    Date,
    /// Fractions shown as percentages with one decimal.
    Percent,
    /// Booleans shown as `yes`/`no`.
    YesNo,
    /// Text in upper case.
    Upper,
}

impl CellFormat {
    pub fn apply(self, value: &Value) -> String {
        match (self, value) {
            (CellFormat::Date, Value::DateTime(dt)) => dt.format("%Y-%m-%d").to_string(),
            (CellFormat::Date, value) => {
                match value.as_str().map(DateTime::<FixedOffset>::parse_from_rfc3339) {
                    Some(Ok(dt)) => dt.format("%Y-%m-%d").to_string(),
                    _ => value.to_string(),
                }
            }
            (CellFormat::Percent, value) => match value.as_f64() {
                Some(x) => format!("{:.1}%", x * 100.0),
                None => value.to_string(),
            },
            (CellFormat::YesNo, Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
            (CellFormat::Upper, value) => value.to_string().to_uppercase(),
            (_, value) => value.to_string(),
        }
    }
}

/// One column as written in a view file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    /// Defaults to the key.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub searchable: bool,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub width: ColumnWidth,
    #[serde(default)]
    pub format: Option<CellFormat>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            sortable: true,
            searchable: true,
            align: Alignment::default(),
            width: ColumnWidth::default(),
            format: None,
        }
    }

    /// Build the column descriptor.
    pub fn to_column(&self) -> Column<Record> {
        let title = self.title.clone().unwrap_or_else(|| self.key.clone());
        let mut column = Column::new(self.key.clone(), title)
            .sortable(self.sortable)
            .searchable(self.searchable)
            .align(self.align)
            .width(self.width.clone());

        if let Some(format) = self.format {
            let key = self.key.clone();
            column = column.render(move |row: &Record, _| {
                format.apply(&row.field(&key).unwrap_or_default())
            });
        }
        column
    }
}

/// Parsed view file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFile {
    #[serde(default = "default_key_field")]
    pub key_field: String,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub table: Option<TableConfig>,
}

impl Default for ViewFile {
    fn default() -> Self {
        Self {
            key_field: default_key_field(),
            columns: Vec::new(),
            table: None,
        }
    }
}

impl ViewFile {
    /// Read and parse a view file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read view file {}", path.display()))?;
        let view: ViewFile = serde_json::from_str(&text)
            .with_context(|| format!("Invalid view file {}", path.display()))?;
        if let Some(table) = &view.table {
            table
                .validate()
                .with_context(|| format!("Invalid table section in {}", path.display()))?;
        }
        log::debug!(
            "Loaded view file {}: {} columns",
            path.display(),
            view.columns.len()
        );
        Ok(view)
    }

    /// Column specs to use for `rows`: the configured ones, or one per field.
    pub fn column_specs(&self, rows: &[Record]) -> Vec<ColumnSpec> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }

        let fields: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.fields().keys())
            .map(String::as_str)
            .filter(|name| *name != self.key_field)
            .collect();
        log::info!("No columns configured, showing {} fields", fields.len() + 1);

        std::iter::once(self.key_field.as_str())
            .chain(fields)
            .map(ColumnSpec::new)
            .collect()
    }

    pub fn columns(&self, rows: &[Record]) -> Vec<Column<Record>> {
        self.column_specs(rows)
            .iter()
            .map(ColumnSpec::to_column)
            .collect()
    }

    pub fn table_config(&self) -> TableConfig {
        self.table.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_lib::column::Cell;
    use serde_json::json;

    #[test]
    fn test_parse_view_file() {
        let view: ViewFile = serde_json::from_value(json!({
            "key_field": "code",
            "columns": [
                { "key": "name", "title": "Name", "sortable": false },
                { "key": "ratio", "align": "right", "width": { "fixed": 8 }, "format": "percent" }
            ],
            "table": { "page_size": 25 }
        }))
        .unwrap();

        assert_eq!(view.key_field, "code");
        assert!(!view.columns[0].sortable);
        assert!(view.columns[0].searchable);
        assert_eq!(view.columns[1].align, Alignment::Right);
        assert_eq!(view.columns[1].width, ColumnWidth::Fixed(8));
        assert_eq!(view.columns[1].format, Some(CellFormat::Percent));
        assert_eq!(view.table_config().page_size, 25);
        assert_eq!(view.table_config().initial_page, 1);
    }

    #[test]
    fn test_empty_view_file_uses_defaults() {
        let view: ViewFile = serde_json::from_str("{}").unwrap();
        assert_eq!(view, ViewFile::default());
        assert_eq!(view.table_config(), TableConfig::default());
    }

    #[test]
    fn test_columns_inferred_from_fields() {
        let rows = vec![
            Record::new(1).set("id", 1).set("name", "Ann"),
            Record::new(2).set("id", 2).set("age", 40),
        ];
        let keys: Vec<String> = ViewFile::default()
            .column_specs(&rows)
            .into_iter()
            .map(|spec| spec.key)
            .collect();
        assert_eq!(keys, vec!["id", "age", "name"]);
    }

    #[test]
    fn test_format_renders_cells() {
        let spec = ColumnSpec {
            format: Some(CellFormat::Date),
            ..ColumnSpec::new("created")
        };
        let row = Record::new(1).set("created", "2024-03-05T10:20:30Z");
        let column = spec.to_column();
        assert_eq!(column.cell(&row, 0), Cell::Rendered("2024-03-05".into()));
        assert_eq!(column.title(), "created");
    }

    #[test]
    fn test_cell_formats() {
        assert_eq!(CellFormat::Percent.apply(&Value::Float(0.125)), "12.5%");
        assert_eq!(CellFormat::Percent.apply(&Value::from("n/a")), "n/a");
        assert_eq!(CellFormat::YesNo.apply(&Value::Bool(true)), "yes");
        assert_eq!(CellFormat::YesNo.apply(&Value::Null), "");
        assert_eq!(CellFormat::Upper.apply(&Value::from("draft")), "DRAFT");
        assert_eq!(CellFormat::Date.apply(&Value::from("soon")), "soon");
        assert_eq!(
            CellFormat::Date.apply(&Value::from("2024-03-09T22:15:00+02:00")),
            "2024-03-09"
        );
    }

    #[test]
    fn test_load_rejects_invalid_table_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        fs::write(&path, r#"{ "table": { "page_size": 0 } }"#).unwrap();
        assert!(ViewFile::load(&path).is_err());
    }
}
