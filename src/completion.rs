//! Matching completion candidates against a typed token
//!
//! A [`CompletionMatcher`] finds the part of a candidate that a token
//! matches; [`rank`] uses it to filter and order a candidate list and
//! [`complete`] applies that to the line being edited in an `.editorconfig`.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::properties::PropertyTypeRegistry;

/// Characters of a candidate matched by a token.
///
/// Indices count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    start: usize,
    len: usize,
}

impl MatchSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the last matched character, `None` for an empty span.
    pub fn end(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|n| self.start + n)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Strategy for matching a token against a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMatcher {
    /// Candidate must start with the token (case-sensitive).
    Prefix,
    /// Token characters must appear in order somewhere in the candidate.
    #[default]
    Subsequence,
}

impl CompletionMatcher {
    /// The span of `candidate` matched by `token`, or `None`.
    ///
    /// `Prefix` matches an empty token with an empty span at 0. `Subsequence`
    /// never matches an empty token; otherwise it returns the shortest window
    /// of `candidate` containing `token` as a subsequence, the leftmost one
    /// when several windows are equally short.
    pub fn best_subsequence(&self, candidate: &str, token: &str) -> Option<MatchSpan> {
        match self {
            CompletionMatcher::Prefix => candidate
                .starts_with(token)
                .then(|| MatchSpan::new(0, token.chars().count())),
            CompletionMatcher::Subsequence => shortest_window(candidate, token),
        }
    }
}

impl FromStr for CompletionMatcher {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(CompletionMatcher::Prefix),
            "subsequence" => Ok(CompletionMatcher::Subsequence),
            other => Err(format!(
                "unknown matcher '{other}', expected 'prefix' or 'subsequence'"
            )),
        }
    }
}

impl fmt::Display for CompletionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionMatcher::Prefix => f.write_str("prefix"),
            CompletionMatcher::Subsequence => f.write_str("subsequence"),
        }
    }
}

fn shortest_window(candidate: &str, token: &str) -> Option<MatchSpan> {
    let candidate: Vec<char> = candidate.chars().collect();
    let token: Vec<char> = token.chars().collect();
    let first = *token.first()?;

    let mut best: Option<MatchSpan> = None;
    for start in 0..candidate.len() {
        if candidate[start] != first {
            continue;
        }
        // No match from here means no match from any later start either.
        let Some(last) = greedy_end(&candidate[start..], &token) else {
            break;
        };
        let span = MatchSpan::new(start, last + 1);
        if best.map_or(true, |b| span.len < b.len) {
            best = Some(span);
        }
    }
    best
}

/// Index of the character completing the earliest in-order match of `token`.
fn greedy_end(candidate: &[char], token: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (i, &c) in candidate.iter().enumerate() {
        if c == token[matched] {
            matched += 1;
            if matched == token.len() {
                return Some(i);
            }
        }
    }
    None
}

/// A candidate that matched, with the span to highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub candidate: String,
    pub span: MatchSpan,
}

impl Proposal {
    /// Split the candidate into the text before, inside and after the span.
    pub fn split(&self) -> (&str, &str, &str) {
        let byte_at = |chars: usize| {
            self.candidate
                .char_indices()
                .nth(chars)
                .map_or(self.candidate.len(), |(i, _)| i)
        };
        let range = self.span.range();
        let (start, end) = (byte_at(range.start), byte_at(range.end));
        (
            &self.candidate[..start],
            &self.candidate[start..end],
            &self.candidate[end..],
        )
    }
}

/// Keep the candidates `token` matches, best first.
///
/// Shorter spans rank first, then earlier spans; ties keep the input order.
pub fn rank<I, S>(candidates: I, token: &str, matcher: CompletionMatcher) -> Vec<Proposal>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matched: Vec<(usize, Proposal)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let candidate = candidate.as_ref();
            matcher.best_subsequence(candidate, token).map(|span| {
                (
                    index,
                    Proposal {
                        candidate: candidate.to_string(),
                        span,
                    },
                )
            })
        })
        .collect();
    matched.sort_by_key(|(index, p)| (p.span.len(), p.span.start(), *index));
    matched.into_iter().map(|(_, p)| p).collect()
}

/// What the cursor is positioned on within an `.editorconfig` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'a> {
    /// Section header or comment
    None,
    PropertyName { token: &'a str },
    PropertyValue { name: String, token: &'a str },
}

impl<'a> CompletionContext<'a> {
    /// Classify the text of the current line left of the cursor.
    pub fn at(line_prefix: &'a str) -> Self {
        let text = line_prefix.trim_start();
        if text.starts_with(['[', '#', ';']) {
            return CompletionContext::None;
        }
        match text.split_once('=') {
            Some((name, value)) => CompletionContext::PropertyValue {
                name: name.trim().to_lowercase(),
                token: value.trim_start(),
            },
            None => CompletionContext::PropertyName { token: text },
        }
    }
}

/// Proposals for the line being edited, given the text left of the cursor.
///
/// With nothing typed yet every candidate is offered in registry order.
pub fn complete(
    registry: &PropertyTypeRegistry,
    line_prefix: &str,
    matcher: CompletionMatcher,
) -> Vec<Proposal> {
    let candidates: Vec<&str> = match CompletionContext::at(line_prefix) {
        CompletionContext::None => return Vec::new(),
        CompletionContext::PropertyName { token } if !token.is_empty() => {
            return rank(registry.names(), token, matcher);
        }
        CompletionContext::PropertyValue { name, token } if !token.is_empty() => {
            return rank(registry.value_candidates(&name), token, matcher);
        }
        CompletionContext::PropertyName { .. } => registry.names().collect(),
        CompletionContext::PropertyValue { name, .. } => registry.value_candidates(&name),
    };
    candidates
        .into_iter()
        .map(|candidate| Proposal {
            candidate: candidate.to_string(),
            span: MatchSpan::new(0, 0),
        })
        .collect()
}
