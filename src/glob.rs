//! Matching section globs against file paths
//!
//! EditorConfig globs are translated into anchored regular expressions:
//!
//! | glob           | meaning                                        |
//! |----------------|------------------------------------------------|
//! | `*`            | any run of characters except `/`               |
//! | `**`           | any run of characters, `/` included            |
//! | `?`            | one character except `/`                       |
//! | `[abc]` `[!a]` | character class, negated with `!`              |
//! | `{a,b,c}`      | any of the comma separated globs (nestable)    |
//! | `{n1..n2}`     | an integer between `n1` and `n2`               |
//! | `\x`           | the literal character `x`                      |
//!
//! A glob without `/` matches the file name at any depth below the
//! directory of its `.editorconfig`; a glob with `/` is anchored there.

use std::path::{Component, Path};

use regex::Regex;
use tracing::warn;

/// Decides whether a section pattern applies to a file.
pub trait SectionMatcher: Send + Sync {
    /// `base_dir` is the directory holding the `.editorconfig` that declared
    /// `pattern`.
    fn matches(&self, pattern: &str, base_dir: &Path, target: &Path) -> bool;
}

/// The standard EditorConfig glob semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl SectionMatcher for GlobMatcher {
    fn matches(&self, pattern: &str, base_dir: &Path, target: &Path) -> bool {
        let Some(relative) = relative_path(base_dir, target) else {
            return false;
        };
        match CompiledGlob::new(pattern) {
            Ok(glob) => glob.is_match(&relative),
            Err(err) => {
                warn!(pattern, error = %err, "ignoring section with an invalid glob");
                false
            }
        }
    }
}

/// `target` relative to `base_dir`, `/`-separated.
///
/// `None` when `target` is not below `base_dir`, including paths that climb
/// back out through `..`.
fn relative_path(base_dir: &Path, target: &Path) -> Option<String> {
    let relative = target.strip_prefix(base_dir).ok()?;
    let parts = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// A glob compiled to a regular expression.
#[derive(Debug, Clone)]
pub struct CompiledGlob {
    regex: Regex,
    /// Bounds for each `{n1..n2}`, in capture group order
    ranges: Vec<(i64, i64)>,
}

impl CompiledGlob {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let chars: Vec<char> = pattern.chars().collect();
        let anchored = chars.contains(&'/');
        let body = match chars.split_first() {
            Some(('/', rest)) => rest,
            _ => &chars[..],
        };

        let mut source = String::from("^");
        if !anchored {
            source.push_str("(?:.*/)?");
        }
        let mut ranges = Vec::new();
        translate(body, &mut source, &mut ranges);
        source.push('$');

        Ok(Self {
            regex: Regex::new(&source)?,
            ranges,
        })
    }

    /// Match a `/`-separated path relative to the glob's base directory.
    pub fn is_match(&self, path: &str) -> bool {
        let Some(captures) = self.regex.captures(path) else {
            return false;
        };
        self.ranges
            .iter()
            .enumerate()
            .all(|(i, &(low, high))| match captures.get(i + 1) {
                Some(m) => m
                    .as_str()
                    .parse::<i64>()
                    .is_ok_and(|n| (low..=high).contains(&n)),
                None => true,
            })
    }
}

fn translate(chars: &[char], out: &mut String, ranges: &mut Vec<(i64, i64)>) {
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 1;
                match chars.get(i) {
                    Some(&c) => push_literal(out, c),
                    None => out.push_str(r"\\"),
                }
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                let segment_start = i == 0 || chars[i - 1] == '/';
                if segment_start && chars.get(i + 2) == Some(&'/') {
                    // `**/` also matches zero directories
                    out.push_str("(?:.*/)?");
                    i += 2;
                } else {
                    out.push_str(".*");
                    i += 1;
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => match class_end(chars, i) {
                Some(end) => {
                    push_class(&chars[i + 1..end], out);
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            '{' => match brace_end(chars, i) {
                Some(end) => {
                    push_braces(&chars[i + 1..end], out, ranges);
                    i = end;
                }
                None => out.push_str(r"\{"),
            },
            c => push_literal(out, c),
        }
        i += 1;
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Index of the `]` closing the class opened at `start`. Classes never span `/`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut first = start + 1;
    if matches!(chars.get(first), Some('!' | '^')) {
        first += 1;
    }
    let mut j = first;
    while j < chars.len() {
        match chars[j] {
            ']' if j > first => return Some(j),
            '/' => return None,
            '\\' => j += 1,
            _ => {}
        }
        j += 1;
    }
    None
}

fn push_class(inner: &[char], out: &mut String) {
    out.push('[');
    let body = match inner.split_first() {
        Some(('!' | '^', rest)) => {
            out.push('^');
            rest
        }
        _ => inner,
    };
    let mut k = 0;
    while k < body.len() {
        match body[k] {
            '\\' if k + 1 < body.len() => {
                k += 1;
                push_literal(out, body[k]);
            }
            '-' => out.push('-'),
            c => push_literal(out, c),
        }
        k += 1;
    }
    out.push(']');
}

/// Index of the `}` matching the `{` at `start`.
fn brace_end(chars: &[char], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = start;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 1,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

fn push_braces(inner: &[char], out: &mut String, ranges: &mut Vec<(i64, i64)>) {
    let text: String = inner.iter().collect();
    if let Some((low, high)) = numeric_range(&text) {
        out.push_str(r"([+-]?\d+)");
        ranges.push((low.min(high), low.max(high)));
        return;
    }

    let alternatives = split_alternatives(inner);
    if alternatives.len() < 2 {
        // `{single}` is taken literally
        out.push_str(r"\{");
        translate(inner, out, ranges);
        out.push_str(r"\}");
        return;
    }

    out.push_str("(?:");
    for (n, alternative) in alternatives.into_iter().enumerate() {
        if n > 0 {
            out.push('|');
        }
        translate(alternative, out, ranges);
    }
    out.push(')');
}

fn numeric_range(text: &str) -> Option<(i64, i64)> {
    let (low, high) = text.split_once("..")?;
    Some((low.parse().ok()?, high.parse().ok()?))
}

/// Split on commas that are not nested in inner braces.
fn split_alternatives(chars: &[char]) -> Vec<&[char]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut j = 0;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 1,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&chars[start..j]);
                start = j + 1;
            }
            _ => {}
        }
        j += 1;
    }
    parts.push(&chars[start..]);
    parts
}
