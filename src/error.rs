use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning level data into a playable [`crate::world::World`].
///
/// All of these abort level construction; a half-built level is never run.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level {level} does not exist")]
    NotFound { level: u32 },
    #[error("row {row}, column {column}: `{value}` is not a tile code")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("row {row}, column {column}: tile code {code} is not defined")]
    UnknownTileCode { row: usize, column: usize, code: i32 },
    #[error("level grid is {rows}x{columns}, map bounds are {max_rows}x{max_columns}")]
    TooLarge {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },
    #[error("level has no player spawn")]
    MissingPlayer,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
}
