//! Cascading resolution of `.editorconfig` properties for one file
//!
//! The walk starts in the directory holding the target file and moves to
//! each parent in turn, loading the configuration file found there and
//! writing the properties of every matching section into one accumulation.
//! It stops after the first directory whose document says `root = true`,
//! after a directory the caller listed as an explicit root, or at the top of
//! the file system.
//!
//! Writes always overwrite, and the walk runs from the nearest directory
//! outward, so a property found in a directory farther from the target wins
//! over the same property found closer to it. Within one document later
//! sections win, and within one section later properties win. Note that this
//! is the reverse of the "nearest file wins" rule most EditorConfig cores
//! apply; callers depending on that rule must not rely on this resolver
//! until the order is revisited.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::glob::{GlobMatcher, SectionMatcher};
use crate::model::{ConfigDocument, Property};

pub const DEFAULT_CONFIG_FILE_NAME: &str = ".editorconfig";

/// `path` made absolute with `.` and `..` folded away lexically.
///
/// Symlinks are not consulted, so `link/..` is the directory holding `link`.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            // `..` at the file system root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Final properties for one file, keyed by name in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedPropertySet {
    properties: IndexMap<String, Property>,
}

impl ResolvedPropertySet {
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn insert(&mut self, property: Property) {
        self.properties.insert(property.name.clone(), property);
    }
}

impl IntoIterator for ResolvedPropertySet {
    type Item = Property;
    type IntoIter = indexmap::map::IntoValues<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_values()
    }
}

impl<'a> IntoIterator for &'a ResolvedPropertySet {
    type Item = &'a Property;
    type IntoIter = indexmap::map::Values<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.values()
    }
}

/// Resolves the effective properties of files.
///
/// Holds no state between calls; one resolver can serve any number of
/// threads.
pub struct Resolver {
    file_name: String,
    matcher: Box<dyn SectionMatcher>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Resolver looking for `.editorconfig` files with standard glob matching.
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            matcher: Box::new(GlobMatcher),
        }
    }

    /// Look for configuration files called `file_name` instead.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn SectionMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Resolve the properties that apply to `target`.
    ///
    /// `explicit_roots` lists directories that end the walk even when their
    /// configuration file is not marked `root = true`. `target` and the roots
    /// are made absolute against the current directory with `.` and `..`
    /// folded away first; symlinks are not followed.
    pub fn resolve(
        &self,
        target: &Path,
        explicit_roots: &HashSet<PathBuf>,
    ) -> Result<ResolvedPropertySet, ConfigError> {
        let target = absolute_path(target).map_err(|source| ConfigError::Read {
            path: target.to_path_buf(),
            source,
        })?;
        let explicit_roots: HashSet<PathBuf> = explicit_roots
            .iter()
            .map(|root| absolute_path(root).unwrap_or_else(|_| root.clone()))
            .collect();

        let mut options = ResolvedPropertySet::default();
        let mut root_found = false;
        let mut dir = target.parent();

        while let Some(current) = dir {
            if let Some(document) = self.load_document(current)? {
                root_found |= document.is_root();
                for section in &document.sections {
                    if section.matches(self.matcher.as_ref(), current, &target) {
                        debug!(
                            dir = %current.display(),
                            pattern = %section.pattern,
                            "section matched"
                        );
                        for property in &section.properties {
                            options.insert(property.clone());
                        }
                    }
                }
                if document.is_root() {
                    debug!(dir = %current.display(), "stopping at root = true");
                }
            }

            if explicit_roots.contains(current) {
                debug!(dir = %current.display(), "stopping at explicit root directory");
                root_found = true;
            }

            if root_found {
                break;
            }
            dir = current.parent();
        }

        Ok(options)
    }

    fn load_document(&self, dir: &Path) -> Result<Option<ConfigDocument>, ConfigError> {
        let path = dir.join(&self.file_name);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                debug!(path = %path.display(), "loading configuration file");
                ConfigDocument::load(&path).map(Some)
            }
            Ok(_) => Ok(None),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}
