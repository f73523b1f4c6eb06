//! Settings file discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::toml_schema::EdconfToml;

pub const CONFIG_FILE_NAME: &str = "edconf.toml";

/// Error type for loading edconf.toml
#[derive(Debug, Error)]
pub enum ToolConfigError {
    /// IO error reading the file
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),
    /// TOML parsing error
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Search upward from `start_dir` for a file with the given name.
///
/// If `stop_at_git_root` is true, stops searching when a `.git` directory is found.
/// Returns `None` if the file is not found.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let file_path = current.join(filename);
        if file_path.is_file() {
            return Some(file_path);
        }

        if stop_at_git_root && current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find edconf.toml by searching upward from the given directory.
///
/// Stops at the first `edconf.toml` found, or at the git repository root
/// (directory containing `.git`), whichever comes first.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, CONFIG_FILE_NAME, true)
}

/// Load and parse edconf.toml from the given path.
///
/// Relative `root_dirs` entries are joined onto the settings file's directory.
pub fn load_config(path: &Path) -> Result<EdconfToml, ToolConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: EdconfToml = toml::from_str(&content)?;

    if let (Some(base), Some(dirs)) = (path.parent(), config.resolve.root_dirs.as_mut()) {
        for dir in dirs.iter_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
    Ok(config)
}
