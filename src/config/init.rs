//! Template generation for `edconf init`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template edconf.toml with documentation
pub const EDCONF_TOML_TEMPLATE: &str = r#"# edconf.toml - Settings for the edconf tool
#
# edconf resolves the .editorconfig properties that apply to a file by
# reading the configuration file of every directory from the file's own
# directory upward, until a file declares `root = true`.
#
# Uncomment and modify the settings below as needed.

[resolve]
# Name of the per-directory configuration file.
# Default: ".editorconfig"
# config_file_name = ".editorconfig"

# Directories where the upward search stops even if their configuration
# file does not say `root = true`. Relative paths are relative to this file.
# root_dirs = ["."]

[complete]
# How typed text is matched against property names and values:
# "prefix"      - the candidate must start with the typed text
# "subsequence" - the typed characters must appear in order
# Default: "subsequence"
# strategy = "subsequence"
"#;

/// Generate edconf.toml in the specified directory (or current directory if None).
///
/// Returns an error if edconf.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |d| d.join(CONFIG_FILE_NAME));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, EDCONF_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate edconf.toml in the current directory.
///
/// Returns an error if edconf.toml already exists.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
