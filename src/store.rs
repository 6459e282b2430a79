use crate::loader::{self, LoadError, LoadReport};
use crate::types::Table;
use once_cell::sync::OnceCell;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("complaints table is already loaded")]
    AlreadyLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Write-once holder for the complaints table.
///
/// Built once at startup and passed by reference to whatever serves
/// queries. After the first successful `load` every caller sees the same
/// table and nothing can replace it.
#[derive(Debug, Default)]
pub struct TableStore {
    table: OnceCell<Table>,
}

impl TableStore {
    pub fn new() -> Self {
        TableStore::default()
    }

    /// Parse `path` into the store. Concurrent callers block until the
    /// first one finishes; only that one parses the file, the rest get
    /// `AlreadyLoaded`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(&Table, LoadReport), StoreError> {
        let mut report = None;
        let table = self.table.get_or_try_init(|| {
            let (table, r) = loader::load(path)?;
            report = Some(r);
            Ok::<_, StoreError>(table)
        })?;
        let report = report.ok_or(StoreError::AlreadyLoaded)?;
        info!(rows = table.len(), "complaints table installed");
        Ok((table, report))
    }

    /// Install a table that was built elsewhere (tests, embedding callers).
    pub fn install(&self, table: Table) -> Result<&Table, StoreError> {
        self.table.set(table).map_err(|_| StoreError::AlreadyLoaded)?;
        let table = self.table.get().ok_or(StoreError::AlreadyLoaded)?;
        info!(rows = table.len(), "complaints table installed");
        Ok(table)
    }

    pub fn get(&self) -> Option<&Table> {
        self.table.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}
