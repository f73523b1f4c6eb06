//! Problems reported while parsing or validating an `.editorconfig` file

use std::fmt;

use serde::Serialize;

/// A position in configuration source text.
///
/// `line` and `column` are 1-based, `offset` is a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Classification of a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Line is neither a comment, a section header nor a `key = value` pair
    Syntax,
    /// Property name is not in the registry
    UnknownProperty,
    /// Property value is not legal for a known property
    InvalidValue,
    /// `root` set inside a section instead of the preamble
    MisplacedRoot,
    /// Same property name repeated within one section
    DuplicateProperty,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Syntax => "syntax",
            ProblemKind::UnknownProperty => "unknown-property",
            ProblemKind::InvalidValue => "invalid-value",
            ProblemKind::MisplacedRoot => "misplaced-root",
            ProblemKind::DuplicateProperty => "duplicate-property",
        }
    }
}

/// A single problem found in configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{start}: {message}")]
pub struct Problem {
    pub message: String,
    pub start: Location,
    /// End of the offending text when known (exclusive)
    pub end: Option<Location>,
    pub kind: ProblemKind,
    pub severity: Severity,
}

impl Problem {
    pub fn new(
        kind: ProblemKind,
        severity: Severity,
        message: impl Into<String>,
        start: Location,
        end: Option<Location>,
    ) -> Self {
        Self {
            message: message.into(),
            start,
            end,
            kind,
            severity,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
