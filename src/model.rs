//! In-memory model of a parsed `.editorconfig` file

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ConfigError;
use crate::glob::SectionMatcher;
use crate::parser::{self, ParseHandler, PropertySpan};
use crate::problem::{Location, Problem};
use crate::properties::PropertyTypeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A `[glob]` block and its properties in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub pattern: String,
    pub properties: Vec<Property>,
}

impl Section {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            properties: Vec::new(),
        }
    }

    /// Whether this section applies to `target`, with the pattern read
    /// relative to `base_dir`.
    pub fn matches(&self, matcher: &dyn SectionMatcher, base_dir: &Path, target: &Path) -> bool {
        matcher.matches(&self.pattern, base_dir, target)
    }
}

/// One parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    /// `root` from the preamble; `None` when absent
    pub root: Option<bool>,
    pub sections: Vec<Section>,
    /// Directory the document was loaded from
    pub base_dir: Option<PathBuf>,
}

impl ConfigDocument {
    pub fn is_root(&self) -> bool {
        self.root == Some(true)
    }

    /// Parse document text, failing on the first error-severity problem.
    pub fn parse(content: &str) -> Result<Self, Problem> {
        let registry = PropertyTypeRegistry::default();
        let mut builder = DocumentBuilder::new(&registry);
        parser::parse(content, &mut builder);
        builder.finish()
    }

    /// Read and parse the file at `path`; its parent becomes the base directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut document = Self::parse(&content).map_err(|problem| ConfigError::Parse {
            path: path.to_path_buf(),
            problem,
        })?;
        document.base_dir = path.parent().map(Path::to_path_buf);
        Ok(document)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.root {
            writeln!(f, "root = {root}")?;
            if !self.sections.is_empty() {
                writeln!(f)?;
            }
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.pattern)?;
            for property in &section.properties {
                writeln!(f, "{} = {}", property.name, property.value)?;
            }
        }
        Ok(())
    }
}

/// Parse handler that assembles a [`ConfigDocument`].
///
/// Values of registry-known properties are lowercased. Only `root` is kept
/// from the preamble.
pub struct DocumentBuilder<'r> {
    registry: &'r PropertyTypeRegistry,
    document: ConfigDocument,
    current: Option<Section>,
    first_error: Option<Problem>,
}

impl<'r> DocumentBuilder<'r> {
    pub fn new(registry: &'r PropertyTypeRegistry) -> Self {
        Self {
            registry,
            document: ConfigDocument::default(),
            current: None,
            first_error: None,
        }
    }

    /// The built document, or the first error the parser reported.
    pub fn finish(mut self) -> Result<ConfigDocument, Problem> {
        if let Some(problem) = self.first_error.take() {
            return Err(problem);
        }
        self.close_section();
        Ok(self.document)
    }

    /// The document built so far, ignoring reported errors.
    pub fn into_document(mut self) -> ConfigDocument {
        self.close_section();
        self.document
    }

    fn close_section(&mut self) {
        if let Some(section) = self.current.take() {
            self.document.sections.push(section);
        }
    }
}

impl ParseHandler for DocumentBuilder<'_> {
    fn start_section(&mut self, pattern: &str, _location: Location) {
        self.close_section();
        self.current = Some(Section::new(pattern));
    }

    fn end_section(&mut self) {
        self.close_section();
    }

    fn property(&mut self, name: &str, value: &str, _span: PropertySpan) {
        match self.current.as_mut() {
            Some(section) => section
                .properties
                .push(Property::new(name, self.registry.normalize_value(name, value))),
            None if name == "root" => {
                self.document.root = Some(value.eq_ignore_ascii_case("true"));
            }
            None => {}
        }
    }

    fn error(&mut self, problem: Problem) {
        if problem.is_error() && self.first_error.is_none() {
            self.first_error = Some(problem);
        }
    }
}
