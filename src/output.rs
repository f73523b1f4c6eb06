use crate::colors::Colors;
use crate::completion::Proposal;
use crate::error::ConfigError;
use crate::outline::Outline;
use crate::problem::Problem;
use crate::resolver::ResolvedPropertySet;
use indexmap::IndexMap;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Json,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files_processed: usize,
    pub files_with_errors: usize,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.files_with_errors > 0
    }
}

pub fn print_resolved(path: &Path, properties: &ResolvedPropertySet, ctx: &OutputContext) {
    println!(
        "{}{}{}",
        ctx.colors.heading,
        path.display(),
        ctx.colors.reset()
    );
    for property in properties {
        println!("  {} = {}", property.name, property.value);
    }
}

/// Print resolved properties of all files as one JSON object keyed by path.
pub fn print_resolved_json(resolved: &IndexMap<String, ResolvedPropertySet>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(resolved).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

pub fn print_config_error(error: &ConfigError, ctx: &OutputContext) {
    eprintln!("{}Error:{} {error}", ctx.colors.error, ctx.colors.reset());
}

pub fn print_problem(path: &Path, problem: &Problem, ctx: &OutputContext) {
    println!(
        "{}:{}:{}: {}{}{}: {} [{}]",
        path.display(),
        problem.start.line,
        problem.start.column,
        ctx.colors.severity(problem.severity),
        problem.severity,
        ctx.colors.reset(),
        problem.message,
        problem.kind.as_str()
    );
}

pub fn print_checked(path: &Path, ctx: &OutputContext) {
    println!(
        "{}Checked:{} {}",
        ctx.colors.info,
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_outline(outline: &Outline, ctx: &OutputContext) {
    if let Some(root) = outline.root {
        println!("root = {root}");
    }
    for section in &outline.sections {
        println!(
            "{}[{}]{} (line {})",
            ctx.colors.heading,
            section.pattern,
            ctx.colors.reset(),
            section.location.line
        );
        for property in &section.properties {
            println!("  {} = {}", property.name, property.value);
        }
    }
}

pub fn print_proposals(proposals: &[Proposal], ctx: &OutputContext) {
    for proposal in proposals {
        let (before, matched, after) = proposal.split();
        println!(
            "{before}{}{matched}{}{after}",
            ctx.colors.highlight,
            ctx.colors.reset()
        );
    }
}

pub fn print_summary(result: &RunResult, ctx: &OutputContext) {
    if result.files_with_errors > 0 {
        eprintln!();
        eprintln!(
            "{}{} of {} files with errors{}",
            ctx.colors.error,
            result.files_with_errors,
            result.files_processed,
            ctx.colors.reset()
        );
    }
}
