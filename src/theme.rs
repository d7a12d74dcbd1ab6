//! Light/dark theme selection.
//!
//! The page carries its theme as a `data-theme` attribute on `<html>`. The
//! choice is remembered under a single preference key, `theme`; when nothing
//! has been stored yet the platform's color-scheme preference decides.
//!
//! Storage is best-effort. A store that cannot be read behaves like an empty
//! one, and a failed write still leaves the theme applied for the current
//! build.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "theme";

/// Attribute set on the document element.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Theme to use when no preference has been stored.
    pub fn from_platform(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preference storage is unavailable")]
    Unavailable,
}

/// A string key-value store for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Preferences kept as a JSON object in a file, normally
/// `<site>/.labsite/preferences.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const DIR: &'static str = ".labsite";
    pub const FILE: &'static str = "preferences.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store for a site rooted at `root`.
    pub fn for_site(root: &Path) -> Self {
        Self::new(root.join(Self::DIR).join(Self::FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut prefs = self.read_all().unwrap_or_default();
        prefs.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }
}

/// In-process store. `unavailable()` builds one that fails every call.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            values: BTreeMap::new(),
            available: false,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves, applies, and remembers the document theme.
#[derive(Debug)]
pub struct ThemeManager<S: PreferenceStore> {
    store: S,
    applied: Option<Theme>,
}

impl<S: PreferenceStore> ThemeManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            applied: None,
        }
    }

    /// The stored theme, if one is stored, readable, and valid.
    pub fn saved(&self) -> Option<Theme> {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().ok(),
            Ok(None) => None,
            Err(e) => {
                debug!("Theme preference unreadable: {}", e);
                None
            }
        }
    }

    /// Pick the startup theme and apply it: the stored preference if there
    /// is one, else the platform signal.
    pub fn init(&mut self, prefers_dark: bool) -> Theme {
        let theme = self
            .saved()
            .unwrap_or_else(|| Theme::from_platform(prefers_dark));
        self.apply(theme);
        theme
    }

    /// Make `theme` the document theme and persist it. A failed write is
    /// logged and otherwise ignored.
    pub fn apply(&mut self, theme: Theme) {
        self.applied = Some(theme);
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            debug!("Theme preference not saved: {}", e);
        }
    }

    /// The theme currently applied to the document.
    pub fn current(&self) -> Option<Theme> {
        self.applied
    }

    /// Value for the document's `data-theme` attribute.
    pub fn document_attribute(&self) -> Option<&'static str> {
        self.applied.map(Theme::as_str)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
