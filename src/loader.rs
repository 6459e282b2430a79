use crate::normalizer::normalize;
use crate::types::{Column, RawRow, Record, Schema, Table};
use crate::util::clean_cell;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open { path: PathBuf, source: csv::Error },

    #[error("failed to read header row: {source}")]
    Header { source: csv::Error },

    #[error("malformed data row {row}: {source}")]
    MalformedRow { row: usize, source: csv::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub renamed_districts: usize,
    pub missing_columns: Vec<Column>,
}

pub fn load(path: impl AsRef<Path>) -> Result<(Table, LoadReport), LoadError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading complaints table");
    let file = std::fs::File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    load_from_reader(file)
}

/// Parse a delimited source into a cleaned [`Table`].
///
/// Any undecodable row aborts the whole load; a partial table is never
/// returned. Absent columns are fine here and only matter to the queries
/// that need them.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Table, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Header { source })?
        .clone();
    let schema = Schema::new(headers.iter().filter_map(Column::from_header));
    let missing_columns = schema.missing();
    if !missing_columns.is_empty() {
        let names: Vec<&str> = missing_columns.iter().map(|c| c.header()).collect();
        warn!(missing = ?names, "source is missing columns");
    }

    let mut records: Vec<Record> = Vec::new();
    let mut renamed_districts = 0usize;

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result.map_err(|source| LoadError::MalformedRow {
            row: idx + 1,
            source,
        })?;

        let raw_district = clean_cell(row.district.as_deref());
        let district = normalize(raw_district.as_deref());
        if raw_district.as_deref().is_some_and(|raw| raw != district) {
            renamed_districts += 1;
            debug!(row = idx + 1, from = ?raw_district, to = %district, "district renamed");
        }

        records.push(Record {
            state: clean_cell(row.state.as_deref()),
            district: if district.is_empty() { None } else { Some(district) },
            issue_type: clean_cell(row.issue_type.as_deref()),
            status: clean_cell(row.status.as_deref()),
            signal_strength: clean_cell(row.signal_strength.as_deref()),
            reported_month: clean_cell(row.reported_month.as_deref()),
        });
    }

    let report = LoadReport {
        total_rows: records.len(),
        renamed_districts,
        missing_columns,
    };
    info!(
        rows = report.total_rows,
        renamed_districts = report.renamed_districts,
        "complaints table loaded"
    );
    Ok((Table::new(schema, records), report))
}
