//! # conffile-core
//!
//! Reading, querying, editing and writing INI-style configuration files with
//! `%(name)s` variable interpolation.
//!
//! Given a file:
//!
//! ```text
//! [default]
//! host=www.example.com
//! protocol=http://
//! base-url=%(protocol)s%(host)s
//!
//! [service-1]
//! url=%(base-url)s/some/path
//! delegation : on
//! maxclients=200 # do not set this higher
//! comments=This is a multi-line
//! 	entry	; And this is a comment
//! ```
//!
//! the typed accessors return:
//!
//! ```rust
//! # let text = b"[default]\nhost=www.example.com\nprotocol=http://\nbase-url=%(protocol)s%(host)s\n\n[service-1]\nurl=%(base-url)s/some/path\ndelegation : on\nmaxclients=200 # do not set this higher\ncomments=This is a multi-line\n\tentry\t; And this is a comment\n";
//! let c = conffile_core::read_config_bytes(text)?;
//! assert_eq!(c.string("service-1", "url")?, "http://www.example.com/some/path");
//! assert_eq!(c.int("service-1", "maxclients")?, 200);
//! assert!(c.bool("service-1", "delegation")?);
//! assert_eq!(c.raw_string("service-1", "comments")?, "This is a multi-line\nentry");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture overview
//!
//! - **`domain`** – The in-memory [`ConfigFile`] (sections → options →
//!   values), its per-instance [`ParserSettings`], `%(name)s` expansion, and
//!   the typed accessors.  No I/O happens here.
//!
//! - **`format`** – The text format.  The [`Parser`] turns lines into
//!   mutations of a `ConfigFile`; [`write_config`] renders one back to text;
//!   the `read_*`/`write_*` functions connect both to paths, byte buffers and
//!   streams.
//!
//! Section and option names are case-insensitive and stored lower-case.
//! Values keep their case.  A reserved section (`default` unless configured
//! otherwise) always exists and is the lookup scope for interpolation.
//!
//! A `ConfigFile` has no internal locking; wrap it in a `Mutex` if several
//! threads need to mutate it.

pub mod domain;
pub mod format;

pub use domain::accessors::{GetError, ValueType};
pub use domain::config::ConfigFile;
pub use domain::settings::{ParserSettings, SettingsError};
pub use format::file::{
    read_config_bytes, read_config_bytes_with_settings, read_config_file,
    read_config_file_with_settings, ConfigError,
};
pub use format::parser::{Parser, ReadError};
pub use format::writer::write_config;
