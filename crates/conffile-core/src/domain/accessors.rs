//! Typed read access to a [`ConfigFile`].
//!
//! Every accessor trims and lower-cases the section and option names.  All
//! of them except [`ConfigFile::raw_string`] expand `%(name)s` references
//! before converting the value.

use std::fmt;

use thiserror::Error;

use crate::domain::config::{normalize_name, ConfigFile};

/// Target type of a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Float,
    Bool,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
        })
    }
}

/// Errors returned when reading values out of a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetError {
    /// The requested section does not exist.
    #[error("section '{section}' not found")]
    SectionNotFound { section: String },

    /// The section exists but does not contain the option.
    #[error("option '{option}' not found in section '{section}'")]
    OptionNotFound { section: String, option: String },

    /// The value could not be converted to the requested type.
    #[error("could not parse {value_type} value '{value}'")]
    CouldNotParse { value_type: ValueType, value: String },

    /// References were still present after the maximum number of passes.
    #[error("possible cycle while unfolding variables: max depth of {depth} reached")]
    MaxDepthReached { depth: usize },
}

impl ConfigFile {
    /// Returns the stored value without expanding references.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::SectionNotFound`] or [`GetError::OptionNotFound`].
    pub fn raw_string(&self, section: &str, option: &str) -> Result<&str, GetError> {
        let section = normalize_name(section);
        let option = normalize_name(option);
        let Some(options) = self.section_map(&section) else {
            return Err(GetError::SectionNotFound { section });
        };
        match options.get(&option) {
            Some(value) => Ok(value.as_str()),
            None => Err(GetError::OptionNotFound { section, option }),
        }
    }

    /// Returns the value with all `%(name)s` references expanded.
    ///
    /// # Errors
    ///
    /// Lookup errors as for [`raw_string`](Self::raw_string), plus any error
    /// raised by [`interpolate`](Self::interpolate).
    pub fn string(&self, section: &str, option: &str) -> Result<String, GetError> {
        let raw = self.raw_string(section, option)?;
        Ok(self.interpolate(raw)?.into_owned())
    }

    /// Returns the expanded value parsed as a base-10 integer.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::CouldNotParse`] with [`ValueType::Int`] if the value
    /// is not an integer.
    pub fn int(&self, section: &str, option: &str) -> Result<i64, GetError> {
        let value = self.string(section, option)?;
        value.parse().map_err(|_| GetError::CouldNotParse {
            value_type: ValueType::Int,
            value,
        })
    }

    /// Returns the expanded value parsed as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::CouldNotParse`] with [`ValueType::Float`] if the
    /// value is not a number.
    pub fn float(&self, section: &str, option: &str) -> Result<f64, GetError> {
        let value = self.string(section, option)?;
        value.parse().map_err(|_| GetError::CouldNotParse {
            value_type: ValueType::Float,
            value,
        })
    }

    /// Returns the expanded value matched against the boolean table.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::CouldNotParse`] with [`ValueType::Bool`] if the
    /// value is not one of the recognised tokens.
    pub fn bool(&self, section: &str, option: &str) -> Result<bool, GetError> {
        let value = self.string(section, option)?;
        match self.settings().parse_bool(&value) {
            Some(b) => Ok(b),
            None => Err(GetError::CouldNotParse {
                value_type: ValueType::Bool,
                value,
            }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
