//! Per-instance parser and resolver settings.
//!
//! Every [`ConfigFile`](crate::ConfigFile) owns one `ParserSettings` value.
//! It carries the name of the reserved default section, the interpolation
//! depth ceiling, and the table of strings accepted as booleans.  Two
//! configurations with different settings can live side by side.
//!
//! Settings can themselves be stored as TOML:
//!
//! ```toml
//! default_section = "common"
//! depth_values = 50
//!
//! [bool_strings]
//! enabled = true
//! disabled = false
//! ```
//!
//! Fields absent from the TOML document keep their defaults, so an empty
//! document yields `ParserSettings::default()`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the reserved section used when none is configured.
pub const DEFAULT_SECTION: &str = "default";

/// Maximum number of interpolation passes used when none is configured.
pub const DEFAULT_DEPTH_VALUES: usize = 200;

/// Error type for loading or storing [`ParserSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Knobs for parsing, interpolation, and boolean coercion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserSettings {
    /// Reserved section that always exists and scopes `%(name)s` lookups.
    #[serde(default = "default_section")]
    default_section: String,
    /// Maximum number of interpolation passes before giving up.
    #[serde(default = "default_depth_values")]
    depth_values: usize,
    /// Strings accepted by the bool accessor, keyed in lower case.
    #[serde(default = "default_bool_strings")]
    bool_strings: BTreeMap<String, bool>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}
fn default_depth_values() -> usize {
    DEFAULT_DEPTH_VALUES
}
fn default_bool_strings() -> BTreeMap<String, bool> {
    [
        ("t", true),
        ("true", true),
        ("y", true),
        ("yes", true),
        ("on", true),
        ("1", true),
        ("f", false),
        ("false", false),
        ("n", false),
        ("no", false),
        ("off", false),
        ("0", false),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            default_section: default_section(),
            depth_values: default_depth_values(),
            bool_strings: default_bool_strings(),
        }
    }
}

impl ParserSettings {
    /// Returns the settings used by [`ConfigFile::new`](crate::ConfigFile::new).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reserved default section name (stored lower-case).
    pub fn with_default_section(mut self, name: &str) -> Self {
        self.default_section = name.trim().to_lowercase();
        self
    }

    /// Replaces the interpolation depth ceiling.
    pub fn with_depth_values(mut self, depth: usize) -> Self {
        self.depth_values = depth;
        self
    }

    /// Adds or overrides a string accepted by the bool accessor.
    pub fn with_bool_string(mut self, token: &str, value: bool) -> Self {
        self.bool_strings.insert(token.to_lowercase(), value);
        self
    }

    /// The reserved default section name, always lower-case.
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// The maximum number of interpolation passes.
    pub fn depth_values(&self) -> usize {
        self.depth_values
    }

    /// Looks up `token` case-insensitively in the boolean table.
    pub fn parse_bool(&self, token: &str) -> Option<bool> {
        self.bool_strings.get(&token.to_lowercase()).copied()
    }

    /// Parses settings from TOML, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: ParserSettings = toml::from_str(s)?;
        Ok(settings.normalized())
    }

    /// Renders the settings as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read and
    /// [`SettingsError::Parse`] if its content is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Names and boolean tokens from hand-written TOML may be mixed case.
    fn normalized(mut self) -> Self {
        self.default_section = self.default_section.trim().to_lowercase();
        self.bool_strings = std::mem::take(&mut self.bool_strings)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
