use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong between reading the CSV files and drawing the charts.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to open data file '{0}'")]
    Open(PathBuf, #[source] csv::Error),

    #[error("Malformed row {row} in '{path}'")]
    Load {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Data file '{0}' contains no rows")]
    Empty(PathBuf),

    #[error("Row {row} in '{path}': cannot parse date '{value}'")]
    Parse {
        path: PathBuf,
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{field} code {code} is outside the known domain")]
    Mapping { field: &'static str, code: i64 },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Request for sidebar image {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Sidebar image {url} returned status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Sidebar image {0} returned an empty body")]
    EmptyImage(String),
}

impl DashboardError {
    /// Network problems only cost us the sidebar image; everything else aborts startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DashboardError::Network { .. }
                | DashboardError::HttpStatus { .. }
                | DashboardError::EmptyImage(_)
        )
    }
}
