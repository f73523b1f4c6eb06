//! Diagnostics for `.editorconfig` source text

use std::collections::HashSet;

use crate::parser::{self, ParseHandler, PropertySpan};
use crate::problem::{Location, Problem, ProblemKind, Severity};
use crate::properties::PropertyTypeRegistry;

/// Check `content` for syntax errors and property problems.
///
/// Problems come back in source order. Unknown property names are warnings
/// since EditorConfig allows tool-specific properties.
pub fn validate(content: &str, registry: &PropertyTypeRegistry) -> Vec<Problem> {
    let mut handler = Validator {
        registry,
        problems: Vec::new(),
        in_section: false,
        seen: HashSet::new(),
    };
    parser::parse(content, &mut handler);
    handler.problems
}

struct Validator<'r> {
    registry: &'r PropertyTypeRegistry,
    problems: Vec<Problem>,
    in_section: bool,
    /// Property names already set in the current section
    seen: HashSet<String>,
}

impl Validator<'_> {
    fn report(
        &mut self,
        kind: ProblemKind,
        severity: Severity,
        message: String,
        start: Location,
        end: Location,
    ) {
        self.problems
            .push(Problem::new(kind, severity, message, start, Some(end)));
    }
}

impl ParseHandler for Validator<'_> {
    fn start_section(&mut self, _pattern: &str, _location: Location) {
        self.in_section = true;
        self.seen.clear();
    }

    fn property(&mut self, name: &str, value: &str, span: PropertySpan) {
        if !self.in_section {
            if name == "root" {
                if let Err(message) = self.registry.validate(name, value) {
                    self.report(
                        ProblemKind::InvalidValue,
                        Severity::Error,
                        message,
                        span.value,
                        span.end,
                    );
                }
            }
            return;
        }

        if name == "root" {
            self.report(
                ProblemKind::MisplacedRoot,
                Severity::Warning,
                "'root' is only honored before the first section".to_string(),
                span.name,
                span.end,
            );
        } else if self.registry.get(name).is_none() {
            self.report(
                ProblemKind::UnknownProperty,
                Severity::Warning,
                format!("unknown property '{name}'"),
                span.name,
                span.end,
            );
        } else if let Err(message) = self.registry.validate(name, value) {
            self.report(
                ProblemKind::InvalidValue,
                Severity::Error,
                message,
                span.value,
                span.end,
            );
        }

        if !self.seen.insert(name.to_string()) {
            self.report(
                ProblemKind::DuplicateProperty,
                Severity::Warning,
                format!("'{name}' is already set in this section; the last value wins"),
                span.name,
                span.end,
            );
        }
    }

    fn error(&mut self, problem: Problem) {
        self.problems.push(problem);
    }
}
