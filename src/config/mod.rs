//! Settings for the edconf tool itself.
//!
//! This module provides:
//! - Loading settings from `edconf.toml`
//! - Settings file discovery (search upward from current directory)
//! - Merging CLI args, settings file, and defaults
//! - Template generation with `edconf init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config, ToolConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, EDCONF_TOML_TEMPLATE};
pub use merge::{merge_tool_settings, CliToolOptions, ToolSettings};
pub use toml_schema::{CompleteSection, EdconfToml, ResolveSection};
