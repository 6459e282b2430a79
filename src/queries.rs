// Named dashboard queries. Each one is a fixed composition of the
// aggregation primitives over the loaded table.
use crate::aggregate::{cross_tab, value_counts, AggregateError, ColumnOrder, RowOrder};
use crate::types::{Column, CrossTab, CrossTabResponse, Summary, Table};
use crate::util::title_case;
use chrono::Month;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const STATUS_SUBMITTED: &str = "Submitted";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_RESOLVED: &str = "Resolved";

pub const STATUS_ORDER: [&str; 3] = [STATUS_SUBMITTED, STATUS_IN_PROGRESS, STATUS_RESOLVED];
pub const SIGNAL_ORDER: [&str; 4] = ["Strong", "Moderate", "Weak", "No Signal"];

pub fn summary(table: &Table) -> Summary {
    let distinct = |column: Column| {
        table
            .records()
            .iter()
            .filter_map(|r| r.get(column))
            .collect::<HashSet<&str>>()
            .len()
    };
    let statuses = value_counts(table, Column::Status).unwrap_or_default();
    let status = |label: &str| statuses.get(label).copied().unwrap_or(0);

    Summary {
        total_complaints: table.len(),
        total_states: distinct(Column::State),
        total_districts: distinct(Column::District),
        total_submitted: status(STATUS_SUBMITTED),
        total_in_progress: status(STATUS_IN_PROGRESS),
        total_resolved: status(STATUS_RESOLVED),
    }
}

fn counts_or_empty(table: &Table, column: Column) -> IndexMap<String, usize> {
    value_counts(table, column).unwrap_or_else(|e| {
        warn!(error = %e, "breakdown unavailable");
        IndexMap::new()
    })
}

pub fn by_state(table: &Table) -> IndexMap<String, usize> {
    counts_or_empty(table, Column::State)
}

pub fn by_district(table: &Table) -> IndexMap<String, usize> {
    counts_or_empty(table, Column::District)
}

pub fn by_issue_type(table: &Table) -> IndexMap<String, usize> {
    counts_or_empty(table, Column::IssueType)
}

fn respond(result: Result<CrossTab, AggregateError>) -> CrossTabResponse {
    match result {
        Ok(table) => CrossTabResponse::ok(table),
        Err(e) => {
            warn!(error = %e, "crosstab unavailable");
            CrossTabResponse::not_found(e.to_string())
        }
    }
}

pub fn state_by_issue_type(table: &Table) -> CrossTabResponse {
    respond(cross_tab(
        table,
        Column::State,
        Column::IssueType,
        &ColumnOrder::Observed,
        RowOrder::TotalDescending,
    ))
}

pub fn state_by_status(table: &Table) -> CrossTabResponse {
    respond(cross_tab(
        table,
        Column::State,
        Column::Status,
        &ColumnOrder::fixed(STATUS_ORDER),
        RowOrder::TotalDescending,
    ))
}

/// Signal strength is an optional column; without it the response carries
/// an error message and empty rows and columns.
pub fn state_by_signal_strength(table: &Table) -> CrossTabResponse {
    respond(cross_tab(
        table,
        Column::State,
        Column::SignalStrength,
        &ColumnOrder::preferred(SIGNAL_ORDER),
        RowOrder::TotalDescending,
    ))
}

/// Complaint totals for January through December, in calendar order.
///
/// Labels are trimmed and title-cased before matching full month names.
/// Anything else ("Jan", "Sept", "2024-01") is left out of the totals.
pub fn reported_month_totals(table: &Table) -> IndexMap<String, usize> {
    let mut totals: IndexMap<String, usize> = (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .map(|m| (m.name().to_string(), 0))
        .collect();

    let mut dropped = 0usize;
    for record in table.records() {
        let Some(raw) = record.get(Column::ReportedMonth) else {
            continue;
        };
        match totals.get_mut(title_case(raw).as_str()) {
            Some(count) => *count += 1,
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "month labels outside the calendar were skipped");
    }
    totals
}
