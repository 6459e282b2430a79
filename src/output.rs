use crate::types::{CountRow, CrossTab};
use crate::util::format_int;
use indexmap::IndexMap;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table};

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown table of a label -> count breakdown. With `largest_first` the
/// rows are ranked by count, otherwise the map's own order is kept.
pub fn render_counts(
    counts: &IndexMap<String, usize>,
    max_rows: usize,
    largest_first: bool,
) -> Option<String> {
    let mut pairs: Vec<(&String, &usize)> = counts.iter().collect();
    if largest_first {
        pairs.sort_by_key(|(_, count)| std::cmp::Reverse(**count));
    }
    let slice: Vec<CountRow> = pairs
        .into_iter()
        .take(max_rows)
        .map(|(label, count)| CountRow {
            label: label.clone(),
            count: format_int(*count),
        })
        .collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

/// Markdown table of a crosstab: one line per row label, one column per
/// crosstab column, in the crosstab's own order.
pub fn render_crosstab(ct: &CrossTab, max_rows: usize) -> Option<String> {
    if ct.rows.is_empty() {
        return None;
    }
    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(ct.columns.iter().cloned());
    builder.push_record(header);
    for (i, row) in ct.rows.iter().enumerate().take(max_rows) {
        let mut line = vec![row.clone()];
        for column in &ct.columns {
            let count = ct.matrix.get(column).and_then(|c| c.get(i)).copied().unwrap_or(0);
            line.push(format_int(count));
        }
        builder.push_record(line);
    }
    Some(builder.build().with(Style::markdown()).to_string())
}

pub fn preview(rendered: Option<String>) {
    match rendered {
        Some(table_str) => println!("{}\n", table_str),
        None => println!("(no rows)\n"),
    }
}
