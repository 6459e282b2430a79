use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub state: Option<String>,
    pub district: Option<String>,
    pub issue_type: Option<String>,
    pub status: Option<String>,
    pub signal_strength: Option<String>,
    pub reported_month: Option<String>,
}

/// The columns the dashboard knows how to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    State,
    District,
    IssueType,
    Status,
    SignalStrength,
    ReportedMonth,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::State,
        Column::District,
        Column::IssueType,
        Column::Status,
        Column::SignalStrength,
        Column::ReportedMonth,
    ];

    /// Header name as it appears in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::State => "state",
            Column::District => "district",
            Column::IssueType => "issue_type",
            Column::Status => "status",
            Column::SignalStrength => "signal_strength",
            Column::ReportedMonth => "reported_month",
        }
    }

    pub fn from_header(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == name.trim())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One complaint after cleaning. `None` means the cell was blank or the
/// column was absent from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub state: Option<String>,
    pub district: Option<String>,
    pub issue_type: Option<String>,
    pub status: Option<String>,
    pub signal_strength: Option<String>,
    pub reported_month: Option<String>,
}

impl Record {
    pub fn get(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::State => &self.state,
            Column::District => &self.district,
            Column::IssueType => &self.issue_type,
            Column::Status => &self.status,
            Column::SignalStrength => &self.signal_strength,
            Column::ReportedMonth => &self.reported_month,
        };
        value.as_deref()
    }
}

/// Columns present in the source header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: BTreeSet<Column>,
}

impl Schema {
    pub fn new<I: IntoIterator<Item = Column>>(columns: I) -> Self {
        Schema {
            columns: columns.into_iter().collect(),
        }
    }

    /// Every known column; handy for tables built in code.
    pub fn full() -> Self {
        Schema::new(Column::ALL)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.columns.contains(c))
            .collect()
    }
}

/// The cleaned dataset. Built once by the loader and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Table {
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Table { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Two-way frequency table. `matrix[c][i]` is the count for `rows[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub matrix: IndexMap<String, Vec<usize>>,
}

impl CrossTab {
    pub fn row_total(&self, i: usize) -> usize {
        self.matrix.values().filter_map(|counts| counts.get(i)).sum()
    }
}

/// Crosstab as handed to the dashboard; `error` is set when the
/// requested columns were not available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabResponse {
    #[serde(flatten)]
    pub table: CrossTab,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CrossTabResponse {
    pub fn ok(table: CrossTab) -> Self {
        CrossTabResponse { table, error: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CrossTabResponse {
            table: CrossTab::default(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_complaints: usize,
    pub total_states: usize,
    pub total_districts: usize,
    pub total_submitted: usize,
    pub total_in_progress: usize,
    pub total_resolved: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CountRow {
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Count")]
    pub count: String,
}
