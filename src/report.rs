// Rendering of summary records: ASCII table or JSON
use crate::processor::{FileRoutes, FileSummary};
use crate::summary::SummaryRecord;

pub const KEY_HEADER: &str = "KEY PARAMETERS";
pub const VALUE_HEADER: &str = "VALUES";

fn width(text: &str) -> usize {
    text.chars().count()
}

// Horizontal border; the title, if any, replaces the start of the top border
fn border(widths: &[usize], title: Option<&str>) -> String {
    let mut line: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    if let Some(title) = title {
        let title_width = width(title);
        if title_width <= width(&line) {
            let rest: String = line.chars().skip(title_width).collect();
            line = format!("{}{}", title, rest);
        }
    }
    format!("+{}+", line)
}

fn row(widths: &[usize], cells: &[&str]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - width(cell))))
        .collect();
    format!("|{}|", cells.join("|"))
}

/// Draws `summary` as a two-column table titled by `title`.
pub fn render_table(title: &str, summary: &SummaryRecord) -> String {
    let rows: Vec<(&str, String)> = summary
        .entries()
        .into_iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect();

    let key_width = rows
        .iter()
        .map(|(key, _)| width(key))
        .chain(std::iter::once(width(KEY_HEADER)))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| width(value))
        .chain(std::iter::once(width(VALUE_HEADER)))
        .max()
        .unwrap_or(0);
    let widths = [key_width, value_width];

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border(&widths, Some(title)));
    lines.push(row(&widths, &[KEY_HEADER, VALUE_HEADER]));
    lines.push(border(&widths, None));
    for (key, value) in &rows {
        lines.push(row(&widths, &[*key, value.as_str()]));
    }
    lines.push(border(&widths, None));
    lines.join("\n")
}

pub fn render_json(file: &FileSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(file)
}

pub fn render_routes_json(file: &FileRoutes) -> serde_json::Result<String> {
    serde_json::to_string_pretty(file)
}
