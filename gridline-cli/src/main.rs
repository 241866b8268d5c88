//! gridline - render a JSON dataset as a sorted, filtered, paginated table.
//!
//! The command-line flags are replayed as the interactions a UI would send:
//! `--sort` clicks the header, `--search` types into the search box, and so
//! on, so the output matches what the table would show after those actions.

mod args;
mod dataset;
mod logging;
mod output;
mod paths;
mod view;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gridline_lib::TableController;
use gridline_lib::engine::SortState;
use gridline_lib::model::{Record, RowKey, TableRow};

use crate::args::Cli;
use crate::view::ViewFile;

fn load_view(cli: &Cli) -> anyhow::Result<ViewFile> {
    if let Some(path) = &cli.view {
        return ViewFile::load(path);
    }
    match paths::default_view_file() {
        Some(path) if path.exists() => ViewFile::load(&path),
        _ => {
            log::debug!("No view file found, using defaults");
            Ok(ViewFile::default())
        }
    }
}

/// Match a key typed on the command line against the dataset's keys by their
/// text, falling back to parsing it.
fn resolve_key(table: &TableController<Record>, arg: &str) -> RowKey {
    table
        .rows()
        .iter()
        .map(|row| row.key())
        .find(|key| key.to_string() == arg)
        .unwrap_or_else(|| arg.parse().unwrap_or_else(|never| match never {}))
}

/// Replay the command-line interactions against the table.
fn apply(cli: &Cli, table: &mut TableController<Record>) -> anyhow::Result<()> {
    if let Some(sort) = &cli.sort {
        table.sync_sort(SortState::Unsorted);
        for _ in 0..sort.clicks() {
            table
                .click_header(&sort.key)
                .with_context(|| format!("Cannot sort by '{}'", sort.key))?;
        }
        if table.sort_state().direction_for(&sort.key) != Some(sort.direction) {
            log::warn!("Column '{}' is not sortable", sort.key);
        }
    }

    if let Some(term) = &cli.search {
        table.search(term.as_str())?;
    }

    if let Some(page) = cli.page {
        table.go_to_page(page)?;
    }

    for arg in &cli.select {
        let key = resolve_key(table, arg);
        table
            .toggle_row(key, true)
            .with_context(|| format!("Cannot select '{}'", arg))?;
    }

    if cli.select_page {
        table.toggle_all(true)?;
    }

    Ok(())
}

fn render(cli: &Cli) -> anyhow::Result<String> {
    let view = load_view(cli)?;
    let rows = dataset::load(&cli.data, &view.key_field)?;

    let mut config = view.table_config();
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }

    let columns = view.columns(&rows);
    let mut table = TableController::builder(columns)
        .rows(rows)
        .config(config)
        .build()
        .context("Invalid table setup")?;

    apply(cli, &mut table)?;

    let table_view = table.view();
    if cli.json {
        Ok(serde_json::to_string_pretty(&output::render_json(&table_view))?)
    } else {
        Ok(output::render_text(&table_view))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match render(&cli) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::json;

    use super::*;

    fn write_dataset(dir: &Path) {
        let rows: Vec<serde_json::Value> = (1..=30)
            .map(|i| json!({ "code": format!("r{}", i), "name": format!("Report {:02}", i), "views": i % 7 }))
            .collect();
        fs::write(dir.join("rows.json"), serde_json::to_string(&rows).unwrap()).unwrap();
        fs::write(
            dir.join("view.json"),
            json!({
                "key_field": "code",
                "columns": [
                    { "key": "name", "title": "Name" },
                    { "key": "views", "title": "Views", "align": "right", "searchable": false }
                ],
                "table": { "page_size": 4 }
            })
            .to_string(),
        )
        .unwrap();
    }

    fn run(dir: &Path, extra: &[&str]) -> anyhow::Result<serde_json::Value> {
        let data = dir.join("rows.json");
        let view = dir.join("view.json");
        let mut argv = vec![
            "gridline",
            "--data",
            data.to_str().unwrap(),
            "--view",
            view.to_str().unwrap(),
            "--json",
        ];
        argv.extend_from_slice(extra);
        let cli = Cli::try_parse_from(argv)?;
        Ok(serde_json::from_str(&render(&cli)?)?)
    }

    fn keys(json: &serde_json::Value) -> Vec<String> {
        json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["key"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_defaults_show_first_page() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let json = run(dir.path(), &[]).unwrap();
        assert_eq!(json["total_pages"], 8);
        assert_eq!(keys(&json), vec!["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_search_sort_and_page() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        // Report 10..19; views: 3 4 5 6 0 1 2 3 4 5
        let json = run(
            dir.path(),
            &["--search", "report 1", "--sort", "views:desc", "--page", "2"],
        )
        .unwrap();
        assert_eq!(json["total_items"], 10);
        assert_eq!(json["sort"]["direction"], "desc");
        assert_eq!(keys(&json), vec!["r11", "r18", "r10", "r17"]);
    }

    #[test]
    fn test_select_by_text_key() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let json = run(dir.path(), &["--select", "r2", "--page-size", "2"]).unwrap();
        assert_eq!(json["selection"], "some");
        assert_eq!(json["rows"][1]["selected"], true);

        let err = run(dir.path(), &["--select", "nope"]).unwrap_err();
        assert!(format!("{:#}", err).contains("Cannot select 'nope'"));
    }

    #[test]
    fn test_unknown_sort_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        assert!(run(dir.path(), &["--sort", "missing"]).is_err());
    }
}
