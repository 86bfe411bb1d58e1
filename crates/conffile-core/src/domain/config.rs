//! In-memory configuration document.
//!
//! A [`ConfigFile`] maps section names to option/value pairs.  Section and
//! option names are case-insensitive and stored trimmed and lower-case; values
//! keep their case.  The reserved default section (see
//! [`ParserSettings::default_section`]) exists from construction onwards and
//! can never be removed.
//!
//! Maps are kept sorted by name, so iteration (and therefore serialized
//! output) is deterministic.  Callers should not rely on any particular order.

use std::collections::BTreeMap;

use crate::domain::accessors::GetError;
use crate::domain::settings::ParserSettings;

/// Trims and lower-cases a section or option name.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Options of one section, keyed by lower-case option name.
pub type SectionMap = BTreeMap<String, String>;

/// A parsed or hand-built configuration.
///
/// # Examples
///
/// ```rust
/// use conffile_core::ConfigFile;
///
/// let mut c = ConfigFile::new();
/// assert!(c.add_section("Section"));
/// assert!(c.add_option("section", "Option", "Value"));
/// assert_eq!(c.raw_string("SECTION", "option").unwrap(), "Value");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Maps sections to options to values.
    data: BTreeMap<String, SectionMap>,
    settings: ParserSettings,
}

impl ConfigFile {
    /// Creates a configuration containing only the empty default section.
    pub fn new() -> Self {
        Self::with_settings(ParserSettings::default())
    }

    /// Creates an empty configuration that uses `settings`.
    pub fn with_settings(settings: ParserSettings) -> Self {
        let mut c = Self {
            data: BTreeMap::new(),
            settings,
        };
        let default = c.settings.default_section().to_string();
        c.add_section(&default);
        c
    }

    /// The settings this configuration was built with.
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// The reserved default section name.
    pub fn default_section(&self) -> &str {
        self.settings.default_section()
    }

    /// Adds a new section.
    ///
    /// Returns `true` if the section was inserted and `false` if it already
    /// existed, in which case nothing changes.
    pub fn add_section(&mut self, section: &str) -> bool {
        let section = normalize_name(section);
        if self.data.contains_key(&section) {
            return false;
        }
        self.data.insert(section, SectionMap::new());
        true
    }

    /// Removes a section together with all of its options.
    ///
    /// Returns `false` if the section does not exist or is the default section.
    pub fn remove_section(&mut self, section: &str) -> bool {
        let section = normalize_name(section);
        if section == self.settings.default_section() {
            return false;
        }
        self.data.remove(&section).is_some()
    }

    /// Sets `option` to `value` in `section`, creating the section if needed.
    ///
    /// Returns `true` on a fresh insertion and `false` when an existing value
    /// was overwritten.
    pub fn add_option(&mut self, section: &str, option: &str, value: &str) -> bool {
        self.data
            .entry(normalize_name(section))
            .or_default()
            .insert(normalize_name(option), value.to_string())
            .is_none()
    }

    /// Removes `option` from `section`.
    ///
    /// Returns `false` if either the section or the option is absent.
    pub fn remove_option(&mut self, section: &str, option: &str) -> bool {
        match self.data.get_mut(&normalize_name(section)) {
            Some(options) => options.remove(&normalize_name(option)).is_some(),
            None => false,
        }
    }

    /// Returns `true` if `section` exists.
    pub fn has_section(&self, section: &str) -> bool {
        self.data.contains_key(&normalize_name(section))
    }

    /// Lists all section names, the default section included.
    pub fn sections(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Lists the options visible from `section`: those of the default section
    /// followed by those of `section` itself, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::SectionNotFound`] if `section` does not exist.
    pub fn options(&self, section: &str) -> Result<Vec<String>, GetError> {
        let section = normalize_name(section);
        let own = self
            .data
            .get(&section)
            .ok_or_else(|| GetError::SectionNotFound {
                section: section.clone(),
            })?;

        let mut options: Vec<String> = self
            .section_map(self.settings.default_section())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        for option in own.keys() {
            if !options.contains(option) {
                options.push(option.clone());
            }
        }
        Ok(options)
    }

    /// Returns `true` if `section` exists and `option` is set either in it or
    /// in the default section.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let section = normalize_name(section);
        let option = normalize_name(option);
        let Some(own) = self.data.get(&section) else {
            return false;
        };
        own.contains_key(&option)
            || self
                .section_map(self.settings.default_section())
                .is_some_and(|m| m.contains_key(&option))
    }

    /// Borrow the options of an already lower-cased section name.
    pub(crate) fn section_map(&self, section: &str) -> Option<&SectionMap> {
        self.data.get(section)
    }

    /// Iterates over `(section, options)` pairs in name order.
    pub(crate) fn iter_sections(&self) -> impl Iterator<Item = (&str, &SectionMap)> {
        self.data.iter().map(|(name, options)| (name.as_str(), options))
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
