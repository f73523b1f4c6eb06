pub mod colors;
pub mod completion;
pub mod config;
pub mod error;
pub mod glob;
pub mod model;
pub mod outline;
mod output;
pub mod parser;
pub mod problem;
pub mod properties;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod validate;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use completion::{
    complete, rank, CompletionContext, CompletionMatcher, MatchSpan, Proposal,
};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_tool_settings, CliToolOptions,
    EdconfToml, ToolConfigError, ToolSettings, EDCONF_TOML_TEMPLATE,
};
pub use error::ConfigError;
pub use glob::{GlobMatcher, SectionMatcher};
pub use model::{ConfigDocument, DocumentBuilder, Property, Section};
pub use outline::{outline, section_locations, Outline, OutlineSection, SectionLocations};
pub use output::{OutputContext, OutputMode, RunResult};
pub use parser::{parse, ParseHandler, PropertySpan};
pub use problem::{Location, Problem, ProblemKind, Severity};
pub use properties::{PropertyType, PropertyTypeRegistry};
pub use resolver::{absolute_path, ResolvedPropertySet, Resolver, DEFAULT_CONFIG_FILE_NAME};
pub use session::EditorSession;
pub use settings::EditorSettings;
pub use validate::validate;
pub use walker::walk_paths;

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve and print the properties of every file under `paths`.
///
/// A configuration error for one file is reported and counted; the
/// remaining files are still resolved.
pub fn run_resolve(
    paths: &[PathBuf],
    resolver: &Resolver,
    explicit_roots: &HashSet<PathBuf>,
    ctx: &OutputContext,
) -> io::Result<RunResult> {
    let mut result = RunResult::default();
    let mut resolved = IndexMap::new();

    for path in walk_paths(paths) {
        let path = path?;
        result.files_processed += 1;

        match resolver.resolve(&path, explicit_roots) {
            Ok(properties) => match ctx.mode {
                OutputMode::Json => {
                    resolved.insert(path.display().to_string(), properties);
                }
                OutputMode::Normal => output::print_resolved(&path, &properties, ctx),
            },
            Err(e) => {
                result.files_with_errors += 1;
                output::print_config_error(&e, ctx);
            }
        }
    }

    if ctx.mode == OutputMode::Json {
        output::print_resolved_json(&resolved)?;
    }
    output::print_summary(&result, ctx);

    Ok(result)
}

/// Check each configuration file and print its problems.
///
/// A file counts as failed when it cannot be read or has an
/// error-severity problem.
pub fn run_validate(
    files: &[PathBuf],
    registry: &PropertyTypeRegistry,
    ctx: &OutputContext,
) -> RunResult {
    let mut result = RunResult::default();

    for path in files {
        result.files_processed += 1;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                result.files_with_errors += 1;
                eprintln!(
                    "{}Error:{} {}: {e}",
                    ctx.colors.error,
                    ctx.colors.reset(),
                    path.display()
                );
                continue;
            }
        };

        let problems = validate(&content, registry);
        if problems.iter().any(Problem::is_error) {
            result.files_with_errors += 1;
        }
        if problems.is_empty() && ctx.verbose {
            output::print_checked(path, ctx);
        }
        for problem in &problems {
            output::print_problem(path, problem, ctx);
        }
    }

    output::print_summary(&result, ctx);
    result
}

/// Print the section outline of one configuration file.
pub fn run_outline(path: &Path, ctx: &OutputContext) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    output::print_outline(&outline(&content), ctx);
    Ok(())
}

/// Print completion proposals for the text left of the cursor.
pub fn run_complete(
    line_prefix: &str,
    matcher: CompletionMatcher,
    ctx: &OutputContext,
) -> Vec<Proposal> {
    let proposals = complete(&PropertyTypeRegistry::default(), line_prefix, matcher);
    output::print_proposals(&proposals, ctx);
    proposals
}
