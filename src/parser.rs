//! Event-based parser for the `.editorconfig` INI dialect
//!
//! The parser walks the text line by line and reports what it sees to a
//! [`ParseHandler`]. It never stops at a malformed line: every problem is
//! passed to [`ParseHandler::error`] and parsing carries on with the next
//! line, so a single pass can feed diagnostics, outlines and the document
//! model at once.
//!
//! Grammar, one construct per line:
//! - blank lines and comments (`#` or `;` as first non-blank character)
//! - `[glob]` section headers
//! - `key = value` pairs, split at the first `=`
//!
//! Pairs before the first section header form the preamble.

use crate::problem::{Location, Problem, ProblemKind, Severity};

/// Locations of the parts of a `key = value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpan {
    pub name: Location,
    pub value: Location,
    /// End of the trimmed value (exclusive)
    pub end: Location,
}

/// Receives parse events in source order.
///
/// All methods default to doing nothing, so a handler only overrides the
/// events it cares about.
pub trait ParseHandler {
    fn start_document(&mut self) {}

    fn start_section(&mut self, _pattern: &str, _location: Location) {}

    fn end_section(&mut self) {}

    /// `name` is already lowercased, `value` is trimmed but otherwise raw.
    fn property(&mut self, _name: &str, _value: &str, _span: PropertySpan) {}

    fn error(&mut self, _problem: Problem) {}

    fn end_document(&mut self) {}
}

impl<H: ParseHandler + ?Sized> ParseHandler for &mut H {
    fn start_document(&mut self) {
        (**self).start_document();
    }

    fn start_section(&mut self, pattern: &str, location: Location) {
        (**self).start_section(pattern, location);
    }

    fn end_section(&mut self) {
        (**self).end_section();
    }

    fn property(&mut self, name: &str, value: &str, span: PropertySpan) {
        (**self).property(name, value, span);
    }

    fn error(&mut self, problem: Problem) {
        (**self).error(problem);
    }

    fn end_document(&mut self) {
        (**self).end_document();
    }
}

/// Parse `content`, reporting every construct and problem to `handler`.
pub fn parse<H: ParseHandler + ?Sized>(content: &str, handler: &mut H) {
    handler.start_document();

    let mut in_section = false;
    let mut offset = 0;

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw.len();

        let line = LineCursor {
            text: raw.trim_end_matches(['\n', '\r']),
            number: idx + 1,
            start: line_start,
        };
        let body = line.text.trim_start();
        let indent = line.text.len() - body.len();
        let body = body.trim_end();

        if body.is_empty() || body.starts_with('#') || body.starts_with(';') {
            continue;
        }

        if body.starts_with('[') {
            match section_pattern(body) {
                Ok(pattern) => {
                    if in_section {
                        handler.end_section();
                    }
                    handler.start_section(pattern, line.at(indent));
                    in_section = true;
                }
                Err(message) => handler.error(Problem::new(
                    ProblemKind::Syntax,
                    Severity::Error,
                    message,
                    line.at(indent),
                    Some(line.at(indent + body.len())),
                )),
            }
            continue;
        }

        match body.split_once('=') {
            Some((key, value)) => {
                let name = key.trim();
                if name.is_empty() {
                    handler.error(Problem::new(
                        ProblemKind::Syntax,
                        Severity::Error,
                        "missing property name before `=`",
                        line.at(indent),
                        Some(line.at(indent + body.len())),
                    ));
                    continue;
                }
                let value_start =
                    indent + key.len() + 1 + (value.len() - value.trim_start().len());
                let value = value.trim();
                let span = PropertySpan {
                    name: line.at(indent),
                    value: line.at(value_start),
                    end: line.at(value_start + value.len()),
                };
                handler.property(&name.to_lowercase(), value, span);
            }
            None => handler.error(Problem::new(
                ProblemKind::Syntax,
                Severity::Error,
                "expected a section header, a `key = value` pair or a comment",
                line.at(indent),
                Some(line.at(indent + body.len())),
            )),
        }
    }

    if in_section {
        handler.end_section();
    }
    handler.end_document();
}

struct LineCursor<'a> {
    text: &'a str,
    number: usize,
    start: usize,
}

impl LineCursor<'_> {
    /// Location of byte `byte` within this line.
    fn at(&self, byte: usize) -> Location {
        let column = self.text[..byte].chars().count() + 1;
        Location::new(self.number, column, self.start + byte)
    }
}

fn section_pattern(header: &str) -> Result<&str, &'static str> {
    let close = header
        .rfind(']')
        .ok_or("section header is missing a closing `]`")?;
    if close + 1 != header.len() {
        return Err("unexpected text after section header");
    }
    let pattern = &header[1..close];
    if pattern.trim().is_empty() {
        return Err("section header has an empty glob pattern");
    }
    Ok(pattern)
}
