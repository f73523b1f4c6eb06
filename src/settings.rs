//! Typed view of resolved properties for editing features

use std::str::FromStr;

use serde::Serialize;

use crate::properties::UNSET;
use crate::resolver::ResolvedPropertySet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    Tab,
    Space,
}

impl FromStr for IndentStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" => Ok(IndentStyle::Tab),
            "space" => Ok(IndentStyle::Space),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentSize {
    Columns(u32),
    /// Indent by the tab width
    Tab,
}

impl FromStr for IndentSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "tab" {
            return Ok(IndentSize::Tab);
        }
        positive(s).map(IndentSize::Columns).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Cr,
    CrLf,
}

impl EndOfLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndOfLine::Lf => "\n",
            EndOfLine::Cr => "\r",
            EndOfLine::CrLf => "\r\n",
        }
    }
}

impl FromStr for EndOfLine {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lf" => Ok(EndOfLine::Lf),
            "cr" => Ok(EndOfLine::Cr),
            "crlf" => Ok(EndOfLine::CrLf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Charset {
    #[serde(rename = "latin1")]
    Latin1,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
    #[serde(rename = "utf-16be")]
    Utf16Be,
    #[serde(rename = "utf-16le")]
    Utf16Le,
}

impl FromStr for Charset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latin1" => Ok(Charset::Latin1),
            "utf-8" => Ok(Charset::Utf8),
            "utf-8-bom" => Ok(Charset::Utf8Bom),
            "utf-16be" => Ok(Charset::Utf16Be),
            "utf-16le" => Ok(Charset::Utf16Le),
            _ => Err(()),
        }
    }
}

fn positive(s: &str) -> Option<u32> {
    s.parse().ok().filter(|n| *n > 0)
}

/// Effective settings for one file.
///
/// `None` means the setting is not specified, was `unset`, or had a value
/// the property does not accept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditorSettings {
    pub indent_style: Option<IndentStyle>,
    pub indent_size: Option<IndentSize>,
    pub tab_width: Option<u32>,
    pub end_of_line: Option<EndOfLine>,
    pub charset: Option<Charset>,
    pub trim_trailing_whitespace: Option<bool>,
    pub insert_final_newline: Option<bool>,
    /// `off` is reported as `None`
    pub max_line_length: Option<u32>,
}

impl EditorSettings {
    pub fn from_properties(properties: &ResolvedPropertySet) -> Self {
        fn typed<T: FromStr>(properties: &ResolvedPropertySet, name: &str) -> Option<T> {
            properties
                .value(name)
                .filter(|v| *v != UNSET)
                .and_then(|v| v.parse().ok())
        }

        let mut settings = Self {
            indent_style: typed(properties, "indent_style"),
            indent_size: typed(properties, "indent_size"),
            tab_width: properties.value("tab_width").and_then(positive),
            end_of_line: typed(properties, "end_of_line"),
            charset: typed(properties, "charset"),
            trim_trailing_whitespace: typed(properties, "trim_trailing_whitespace"),
            insert_final_newline: typed(properties, "insert_final_newline"),
            max_line_length: properties.value("max_line_length").and_then(positive),
        };

        if settings.indent_style == Some(IndentStyle::Tab) && settings.indent_size.is_none() {
            settings.indent_size = Some(IndentSize::Tab);
        }
        if let (Some(IndentSize::Tab), Some(width)) = (settings.indent_size, settings.tab_width) {
            settings.indent_size = Some(IndentSize::Columns(width));
        }
        if let (None, Some(IndentSize::Columns(n))) = (settings.tab_width, settings.indent_size) {
            settings.tab_width = Some(n);
        }
        settings
    }

    /// Columns per indentation level, when known.
    pub fn indent_width(&self) -> Option<u32> {
        match self.indent_size? {
            IndentSize::Columns(n) => Some(n),
            IndentSize::Tab => self.tab_width,
        }
    }

    /// Text inserted for one indentation level.
    pub fn indent_unit(&self) -> Option<String> {
        match self.indent_style? {
            IndentStyle::Tab => Some("\t".to_string()),
            IndentStyle::Space => self.indent_width().map(|n| " ".repeat(n as usize)),
        }
    }
}
