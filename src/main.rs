use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use edconf::{
    absolute_path, find_config_file, generate_init_file, load_config, merge_tool_settings, run_complete,
    run_outline, run_resolve, run_validate, should_use_colors, CliToolOptions, CompletionMatcher,
    EdconfToml, OutputContext, OutputMode, PropertyTypeRegistry, Resolver, ToolSettings,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "edconf")]
#[command(version, about = "Resolve, check and complete .editorconfig settings")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Specify settings file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Force colored output
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the properties that apply to each file
    Resolve {
        /// Target files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Stop the upward search at this directory (repeatable)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,

        /// Name of the per-directory configuration file
        #[arg(long, value_name = "NAME")]
        file_name: Option<String>,

        /// Print one JSON object keyed by file
        #[arg(long)]
        json: bool,
    },
    /// Report problems in configuration files
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the sections of a configuration file
    Outline { file: PathBuf },
    /// Propose property names or values for a partially typed line
    Complete {
        /// Text of the line left of the cursor
        line_prefix: String,

        /// Matching strategy
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<CompletionMatcher>,
    },
    /// Generate a template edconf.toml settings file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let toml_config = load_configuration(&cli.config);
    let use_colors = should_use_colors(cli.color, cli.no_color);

    match cli.command {
        Command::Resolve {
            paths,
            roots,
            file_name,
            json,
        } => {
            let cli_options = CliToolOptions {
                config_file_name: file_name,
                root_dirs: roots,
                strategy: None,
            };
            let settings = merge_tool_settings(&cli_options, toml_config.as_ref());
            let mode = if json {
                OutputMode::Json
            } else {
                OutputMode::Normal
            };
            let ctx = OutputContext::new(mode, use_colors, cli.verbose);
            let resolver = Resolver::new().with_file_name(settings.config_file_name);
            let explicit_roots: HashSet<PathBuf> = settings
                .root_dirs
                .iter()
                .map(|dir| absolute_path(dir).unwrap_or_else(|_| dir.clone()))
                .collect();

            match run_resolve(&paths, &resolver, &explicit_roots, &ctx) {
                Ok(result) if result.has_errors() => ExitCode::from(1),
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::from(1)
                }
            }
        }
        Command::Validate { files } => {
            let ctx = OutputContext::new(OutputMode::Normal, use_colors, cli.verbose);
            let result = run_validate(&files, &PropertyTypeRegistry::default(), &ctx);
            if result.has_errors() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Outline { file } => {
            let ctx = OutputContext::new(OutputMode::Normal, use_colors, cli.verbose);
            match run_outline(&file, &ctx) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}: {e}", file.display());
                    ExitCode::from(1)
                }
            }
        }
        Command::Complete {
            line_prefix,
            strategy,
        } => {
            let cli_options = CliToolOptions {
                strategy,
                ..Default::default()
            };
            let settings: ToolSettings = merge_tool_settings(&cli_options, toml_config.as_ref());
            let ctx = OutputContext::new(OutputMode::Normal, use_colors, cli.verbose);
            run_complete(&line_prefix, settings.strategy, &ctx);
            ExitCode::SUCCESS
        }
        Command::Init => handle_init(),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "edconf=debug" } else { "edconf=warn" };
    let filter =
        EnvFilter::try_from_env("EDCONF_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>) -> Option<EdconfToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            info!(path = %p.display(), "using settings file");
            Some(config)
        }
        Err(e) => {
            warn!(path = %p.display(), error = %e, "failed to load settings file");
            None
        }
    })
}
