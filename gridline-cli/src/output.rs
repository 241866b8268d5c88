//! Text and JSON rendering of a table view.

use gridline_lib::TableView;
use gridline_lib::column::{Alignment, ColumnWidth, ValueSource};
use gridline_lib::engine::{CheckState, Direction, PageItem, Pager};
use gridline_lib::model::Record;
use serde_json::{Map, json};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_GAP: &str = "  ";
const ELLIPSIS: &str = "…";

// =============================================================================
// Text helpers
// =============================================================================

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push_str(ELLIPSIS);
    result
}

fn align_to_width(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(text.width());
    let (left, right) = match align {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn check_mark(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    }
}

fn sort_arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "▲",
        Direction::Desc => "▼",
    }
}

/// One-line pagination control, e.g. `‹ 1 … 4 [5] 6 … 10 ›`.
pub fn pager_line(pager: &Pager) -> String {
    let mut parts = Vec::with_capacity(pager.items().len() + 2);
    parts.push(if pager.has_previous() { "‹" } else { " " }.to_string());
    for item in pager.items() {
        parts.push(match item {
            PageItem::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => ELLIPSIS.to_string(),
        });
    }
    parts.push(if pager.has_next() { "›" } else { " " }.to_string());
    parts.join(" ")
}

// =============================================================================
// Text table
// =============================================================================

/// Render the view as an aligned text table followed by the pager.
pub fn render_text(view: &TableView<'_, Record>) -> String {
    let columns = view.columns();

    let headers: Vec<String> = columns
        .iter()
        .map(|column| match view.sort_indicator(column.key()) {
            Some(direction) => format!("{} {}", column.title(), sort_arrow(direction)),
            None => column.title().to_string(),
        })
        .collect();

    let body: Vec<(bool, Vec<String>)> = view
        .rows()
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.cells(columns).iter().map(|cell| cell.to_string()).collect();
            (row.selected, cells)
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match column.width_hint() {
            Some(ColumnWidth::Fixed(width)) => usize::from(*width),
            _ => body
                .iter()
                .map(|(_, cells)| cells[i].width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0),
        })
        .collect();

    let line = |mark: &str, cells: &[String]| -> String {
        let mut out = String::from(mark);
        for ((cell, column), width) in cells.iter().zip(columns).zip(&widths) {
            out.push_str(COLUMN_GAP);
            out.push_str(&align_to_width(cell, *width, column.alignment()));
        }
        out.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(body.len() + 4);
    lines.push(line(check_mark(view.check_state()), &headers));
    let rule_width = widths.iter().map(|w| w + COLUMN_GAP.len()).sum::<usize>() + 3;
    lines.push("─".repeat(rule_width));
    if body.is_empty() {
        lines.push("No rows".to_string());
    }
    for (selected, cells) in &body {
        lines.push(line(if *selected { "[x]" } else { "[ ]" }, cells));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}  {} items",
        pager_line(&view.pager()),
        view.total_items()
    ));

    lines.join("\n")
}

// =============================================================================
// JSON
// =============================================================================

/// The view as a JSON document.
pub fn render_json(view: &TableView<'_, Record>) -> serde_json::Value {
    let columns = view.columns();

    let sort = match (view.sort().key(), view.sort().direction()) {
        (Some(key), Some(direction)) => json!({ "key": key, "direction": direction }),
        _ => serde_json::Value::Null,
    };

    let rows: Vec<serde_json::Value> = view
        .rows()
        .iter()
        .map(|row| {
            let cells: Map<String, serde_json::Value> = columns
                .iter()
                .zip(row.cells(columns))
                .map(|(column, cell)| (column.key().to_string(), json!(cell.to_string())))
                .collect();
            json!({
                "key": row.key,
                "selected": row.selected,
                "cells": cells,
                "record": row.row.to_json(),
            })
        })
        .collect();

    let pager: Vec<serde_json::Value> = view
        .pager()
        .items()
        .iter()
        .map(|item| match item {
            PageItem::Page { number, .. } => json!(number),
            PageItem::Ellipsis => serde_json::Value::Null,
        })
        .collect();

    let selection = match view.check_state() {
        CheckState::Checked => "all",
        CheckState::Indeterminate => "some",
        CheckState::Unchecked => "none",
    };

    let headers: Vec<serde_json::Value> = columns
        .iter()
        .map(|column| {
            json!({
                "key": column.key(),
                "title": column.title(),
                "computed": matches!(column.source(), ValueSource::Accessor(_)),
                "formatted": column.has_renderer(),
            })
        })
        .collect();

    json!({
        "page": view.page(),
        "total_pages": view.total_pages(),
        "total_items": view.total_items(),
        "search": view.search(),
        "sort": sort,
        "selection": selection,
        "columns": headers,
        "rows": rows,
        "pager": pager,
    })
}
