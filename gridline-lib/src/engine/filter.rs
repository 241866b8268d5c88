//! Text search over searchable columns.

use crate::column::Column;
use crate::model::TableRow;

/// Keep the rows matching `term`, preserving input order.
///
/// An empty term keeps every row. Otherwise a row is kept when any searchable
/// column's value, lower-cased, contains the lower-cased term. Null values
/// never match.
pub fn filter<'a, R: TableRow>(rows: Vec<&'a R>, columns: &[Column<R>], term: &str) -> Vec<&'a R> {
    filter_by(rows, |row| *row, columns, term)
}

/// Filter arbitrary items, reading each item's row through `row_of`.
pub fn filter_by<'r, T, R: TableRow + 'r>(
    items: Vec<T>,
    row_of: impl Fn(&T) -> &'r R,
    columns: &[Column<R>],
    term: &str,
) -> Vec<T> {
    if term.is_empty() {
        return items;
    }

    let needle = term.to_lowercase();
    let searchable: Vec<&Column<R>> = columns.iter().filter(|c| c.is_searchable()).collect();

    items
        .into_iter()
        .filter(|item| row_matches(row_of(item), &searchable, &needle))
        .collect()
}

/// Whether any of `columns` matches the already lower-cased `needle`.
pub fn row_matches<R: TableRow>(row: &R, columns: &[&Column<R>], needle: &str) -> bool {
    columns.iter().any(|column| {
        column
            .value_of(row)
            .search_text()
            .is_some_and(|text| text.contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RowKey, Value};

    fn rows() -> Vec<Record> {
        vec![
            Record::new(1).set("name", "Ann").set("note", "FOO bar"),
            Record::new(2).set("name", "Bo").set("note", Value::Null),
            Record::new(3).set("name", "Cy, foo"),
        ]
    }

    fn keys(rows: &[&Record]) -> Vec<RowKey> {
        rows.iter().map(|r| r.key()).collect()
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let data = rows();
        let columns = vec![Column::new("name", "Name")];
        let kept = filter(data.iter().collect(), &columns, "");
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_only_searchable_columns_match() {
        let data = rows();
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("note", "Note").searchable(false),
        ];
        let kept = filter(data.iter().collect(), &columns, "foo");
        assert_eq!(keys(&kept), vec![RowKey::Int(3)]);
    }

    #[test]
    fn test_case_insensitive_any_column() {
        let data = rows();
        let columns = vec![Column::new("name", "Name"), Column::new("note", "Note")];
        let kept = filter(data.iter().collect(), &columns, "Foo");
        assert_eq!(keys(&kept), vec![RowKey::Int(1), RowKey::Int(3)]);
    }

    #[test]
    fn test_null_never_matches() {
        let data = rows();
        let columns = vec![Column::new("note", "Note")];
        let kept = filter(data.iter().collect(), &columns, "null");
        assert!(kept.is_empty());
    }

    #[test]
    fn test_accessor_is_searched() {
        let data = rows();
        let columns = vec![
            Column::new("label", "Label").accessor(|r: &Record| Value::from(format!("report-{}", r.key()))),
        ];
        let kept = filter(data.iter().collect(), &columns, "REPORT-2");
        assert_eq!(keys(&kept), vec![RowKey::Int(2)]);
    }

    #[test]
    fn test_numbers_match_as_text() {
        let data = vec![Record::new(1).set("n", 1234i64), Record::new(2).set("n", 99i64)];
        let columns = vec![Column::new("n", "N")];
        let kept = filter(data.iter().collect(), &columns, "23");
        assert_eq!(keys(&kept), vec![RowKey::Int(1)]);
    }
}
