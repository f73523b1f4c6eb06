//! Settings merging logic
//!
//! Priority: CLI args > edconf.toml > defaults

use std::collections::HashSet;
use std::path::PathBuf;

use crate::completion::CompletionMatcher;
use crate::resolver::DEFAULT_CONFIG_FILE_NAME;

use super::toml_schema::EdconfToml;

/// CLI options that can override settings file values.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliToolOptions {
    pub config_file_name: Option<String>,
    /// Explicit root directories; a non-empty list replaces the file's list
    pub root_dirs: Vec<PathBuf>,
    pub strategy: Option<CompletionMatcher>,
}

/// Effective tool settings after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub config_file_name: String,
    pub root_dirs: HashSet<PathBuf>,
    pub strategy: CompletionMatcher,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            root_dirs: HashSet::new(),
            strategy: CompletionMatcher::default(),
        }
    }
}

/// Merge settings from CLI, TOML, and defaults.
///
/// Priority: CLI > TOML > defaults
pub fn merge_tool_settings(cli: &CliToolOptions, toml: Option<&EdconfToml>) -> ToolSettings {
    let defaults = ToolSettings::default();

    let root_dirs = if cli.root_dirs.is_empty() {
        toml.and_then(|t| t.resolve.root_dirs.clone())
            .map(|dirs| dirs.into_iter().collect())
            .unwrap_or(defaults.root_dirs)
    } else {
        cli.root_dirs.iter().cloned().collect()
    };

    ToolSettings {
        config_file_name: cli
            .config_file_name
            .clone()
            .or_else(|| toml.and_then(|t| t.resolve.config_file_name.clone()))
            .unwrap_or(defaults.config_file_name),
        root_dirs,
        strategy: cli
            .strategy
            .or_else(|| toml.and_then(|t| t.complete.strategy))
            .unwrap_or(defaults.strategy),
    }
}
