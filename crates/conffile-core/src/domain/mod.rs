//! The configuration document and everything that reads it.
//!
//! Nothing in this module performs I/O.  Turning text into a [`ConfigFile`]
//! and back lives in [`crate::format`].
//!
//! [`ConfigFile`]: config::ConfigFile

/// Typed accessors and [`accessors::GetError`].
pub mod accessors;
/// The section/option/value document.
pub mod config;
/// `%(name)s` reference expansion.
pub mod interpolate;
/// Per-instance settings (default section, depth ceiling, boolean table).
pub mod settings;
