use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur before a search starts producing offsets.
///
/// The match engine itself has no failure states: every variant here is
/// raised either while validating the term, while acquiring the mapped
/// file, or while writing offsets to the output sink.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("need search term")]
    EmptyTerm,
    #[error("need filename")]
    MissingFile,
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("open failed: {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("fstat failed: {path}: {source}")]
    Stat { path: PathBuf, source: io::Error },
    #[error("Not a regular file: {0}")]
    NotRegularFile(PathBuf),
    #[error("File too large to map: {path} ({size} bytes)")]
    FileTooLarge { path: PathBuf, size: u64 },
    #[error("mmap failed: {path}: {source}")]
    Map { path: PathBuf, source: io::Error },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    /// Classifies a failed `open(2)` the same way for every caller.
    pub fn open_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::file_not_found(path),
            io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::Open { path, source },
        }
    }

    pub fn stat_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn not_regular_file(path: impl Into<PathBuf>) -> Self {
        Self::NotRegularFile(path.into())
    }

    pub fn file_too_large(path: impl Into<PathBuf>, size: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            size,
        }
    }

    pub fn map_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Map {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
