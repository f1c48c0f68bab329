use std::path::PathBuf;

use thiserror::Error;

/// Errors that can surface from building or growing a [`crate::Index`].
///
/// Per-entry failures during a crawl (an unreadable or unparseable document)
/// are not represented here: those are logged and skipped by the spider, not
/// propagated. This enum covers only the failures that abort a build.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The archive path does not exist or could not be opened.
    #[error("archive not found at {path}")]
    ArchiveMissing {
        /// Path that was passed to `open`.
        path: PathBuf,
        /// Underlying I/O error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The archive exists but is not a valid ZIP file.
    #[error("archive at {path} is corrupt: {reason}")]
    ArchiveCorrupt {
        /// Path to the offending archive.
        path: PathBuf,
        /// Human-readable reason extracted from the underlying zip error.
        reason: String,
    },

    /// The seed entry named at build time is not present in the archive.
    #[error("seed entry {seed} not found in archive")]
    SeedNotFound {
        /// The seed path that was requested.
        seed: String,
    },

    /// An archive entry could not be located by path.
    #[error("entry {entry} not found in archive")]
    EntryNotFound {
        /// The entry path that was requested.
        entry: String,
    },
}

impl CoreError {
    /// Construct an [`CoreError::ArchiveMissing`] from a path and an I/O error.
    pub fn archive_missing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArchiveMissing {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Construct an [`CoreError::ArchiveCorrupt`] from a path and a reason string.
    pub fn archive_corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArchiveCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`CoreError::SeedNotFound`].
    pub fn seed_not_found(seed: impl Into<String>) -> Self {
        Self::SeedNotFound { seed: seed.into() }
    }

    /// Construct an [`CoreError::EntryNotFound`].
    pub fn entry_not_found(entry: impl Into<String>) -> Self {
        Self::EntryNotFound {
            entry: entry.into(),
        }
    }

    /// Whether this error reflects a permanently missing resource, as opposed
    /// to one that might succeed if retried against a different archive/seed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArchiveMissing { .. } | Self::ArchiveCorrupt { .. } | Self::SeedNotFound { .. }
        )
    }
}

/// Result alias used throughout the webcorpus crates.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
