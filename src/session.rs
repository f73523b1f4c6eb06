//! Per-editor resolution state
//!
//! An [`EditorSession`] belongs to one open editor. It is created when the
//! editor opens, refreshed whenever the editor regains focus, and dropped or
//! closed with the editor; nothing is shared between sessions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::resolver::{ResolvedPropertySet, Resolver};
use crate::settings::EditorSettings;

pub struct EditorSession<'r> {
    resolver: &'r Resolver,
    path: PathBuf,
    explicit_roots: HashSet<PathBuf>,
    properties: ResolvedPropertySet,
    settings: EditorSettings,
}

impl<'r> EditorSession<'r> {
    /// Start a session for the file at `path`, resolving its settings.
    pub fn open(
        resolver: &'r Resolver,
        path: impl Into<PathBuf>,
        explicit_roots: HashSet<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let properties = resolver.resolve(&path, &explicit_roots)?;
        let settings = EditorSettings::from_properties(&properties);
        debug!(path = %path.display(), "editor session opened");
        Ok(Self {
            resolver,
            path,
            explicit_roots,
            properties,
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn properties(&self) -> &ResolvedPropertySet {
        &self.properties
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Resolve again and report whether the settings changed.
    ///
    /// On failure the previous properties and settings stay in effect.
    pub fn refresh(&mut self) -> Result<bool, ConfigError> {
        let properties = self.resolver.resolve(&self.path, &self.explicit_roots)?;
        let settings = EditorSettings::from_properties(&properties);
        let changed = settings != self.settings;
        self.properties = properties;
        self.settings = settings;
        Ok(changed)
    }

    /// End the session, handing back the last applied settings.
    pub fn close(self) -> EditorSettings {
        debug!(path = %self.path.display(), "editor session closed");
        self.settings
    }
}
