use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "complaints.csv";
pub const DEFAULT_OUT_DIR: &str = "dashboard_out";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Runtime settings, read from the environment with an optional CLI
/// override for the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), env::args().nth(1))
    }

    /// `lookup` resolves variable names; `cli_path` wins over
    /// `COMPLAINTS_CSV` when given.
    pub fn from_lookup<F>(lookup: F, cli_path: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = cli_path
            .or_else(|| non_blank("COMPLAINTS_CSV"))
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let out_dir = non_blank("DASHBOARD_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.out_dir);
        let preview_rows = non_blank("DASHBOARD_PREVIEW_ROWS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.preview_rows);

        DashboardConfig {
            data_path,
            out_dir,
            preview_rows,
        }
    }
}
