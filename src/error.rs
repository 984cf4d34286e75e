//! Error types for the build pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors that abort a build before any output is written
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Template file or partials directory does not exist
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A file or directory exists but could not be read
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merged output could not be written
    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two partial files resolve to the same name
    #[error(
        "duplicate partial '{name}': {} and {}",
        first.display(),
        second.display()
    )]
    DuplicatePartial {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Invalid configuration file
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ComposeError {
    /// Classify an I/O failure on a path being read
    ///
    /// A missing path becomes `NotFound`, anything else (permissions, invalid
    /// UTF-8, a directory where a file was expected) becomes `Read`.
    pub fn reading(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Wrap an I/O failure on the output path
    pub fn writing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
