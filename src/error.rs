//! Error types surfaced by the harvesting pipeline.
//!
//! Nothing here is retried or aggregated: the first failure aborts the run
//! and reaches the caller with its underlying cause attached.

use std::path::PathBuf;

use thiserror::Error;

/// A document could not be opened or parsed.
#[derive(Debug, Error)]
#[error("failed to load document {}: {source}", .path.display())]
pub struct DocumentLoadError {
    pub path: PathBuf,
    #[source]
    pub source: LoadFailure,
}

impl DocumentLoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: LoadFailure) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Underlying cause of a [`DocumentLoadError`].
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive entry {0} not found")]
    MissingEntry(&'static str),

    #[error("archive entry {entry} exceeds size limit ({limit} bytes)")]
    EntryTooLarge { entry: &'static str, limit: u64 },

    #[error("malformed XML in {entry}: {message}")]
    Xml {
        entry: &'static str,
        message: String,
    },
}

/// The report could not be written to its destination.
#[derive(Debug, Error)]
#[error("failed to write report {}: {source}", .path.display())]
pub struct OutputWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Any failure raised while harvesting a directory tree.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    DocumentLoad(#[from] DocumentLoadError),

    #[error(transparent)]
    OutputWrite(#[from] OutputWriteError),

    #[error("failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),
}
