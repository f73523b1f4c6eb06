use std::path::PathBuf;

use thiserror::Error;

use crate::problem::Problem;

/// Failure to load an `.editorconfig` file during resolution.
///
/// Resolution stops at the first failure; no partial property set is
/// returned alongside it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}:{problem}")]
    Parse { path: PathBuf, problem: Problem },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}
