//! TOML schema definitions for edconf.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::completion::CompletionMatcher;

/// Root structure for edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EdconfToml {
    /// Resolution settings
    #[serde(default)]
    pub resolve: ResolveSection,

    /// Completion settings
    #[serde(default)]
    pub complete: CompleteSection,
}

/// `[resolve]` section in edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResolveSection {
    /// Name of the per-directory configuration file (default: .editorconfig)
    pub config_file_name: Option<String>,

    /// Directories that end the upward search even without `root = true`.
    /// Relative entries are taken relative to the directory of edconf.toml.
    pub root_dirs: Option<Vec<PathBuf>>,
}

/// `[complete]` section in edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompleteSection {
    /// `prefix` or `subsequence` (default: subsequence)
    pub strategy: Option<CompletionMatcher>,
}
