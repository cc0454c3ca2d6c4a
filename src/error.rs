use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Schedule file is empty or has no data rows")]
    EmptyInput,

    #[error("No valid tasks found in schedule ({skipped} rows skipped)")]
    NoUsableRows { skipped: usize },

    #[error("Schedule is missing a task name column. Found headers: {found:?}")]
    MissingColumns { found: Vec<String> },

    #[error("Snapshot version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: String, expected: String },

    #[error("No snapshot stored at {}", .0.display())]
    NoSnapshot(PathBuf),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
