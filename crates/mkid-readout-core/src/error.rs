use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("observation directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("integration window spans {file_count} files, outside the allowed [1, 1800] range")]
    InvalidWindow { file_count: i64 },

    #[error("start_timestamp {timestamp} is not a representable UTC instant")]
    InvalidTimestamp { timestamp: i64 },

    #[error("file {path} is {size} bytes, larger than the {limit}-byte read buffer")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },
}

pub type Result<T> = std::result::Result<T, ReadoutError>;
