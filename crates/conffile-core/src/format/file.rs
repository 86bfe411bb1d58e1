//! Loading and saving configurations through paths, byte buffers and streams.
//!
//! ```rust,no_run
//! use conffile_core::{read_config_file, ConfigFile};
//!
//! let c = read_config_file("config.cfg")?;
//! let url = c.string("service-1", "url")?;
//!
//! let mut out = ConfigFile::new();
//! out.add_option("section", "option", "value");
//! out.write_config_file("config.cfg", 0o644, Some("A header for this file"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::config::ConfigFile;
use crate::domain::settings::ParserSettings;
use crate::format::parser::{Parser, ReadError};
use crate::format::writer::write_config;

/// Errors raised while loading or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Opening, reading, writing or closing a named file failed.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to a caller-supplied stream failed.
    #[error("I/O error on config stream: {0}")]
    Stream(#[from] io::Error),

    /// The text could not be parsed.
    #[error("failed to parse config: {0}")]
    Read(#[from] ReadError),
}

impl ConfigError {
    /// Attaches `path` to a stream error.
    fn at(self, path: &Path) -> Self {
        match self {
            ConfigError::Stream(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// Reads the file at `path` into a new configuration with default settings.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be opened or read and
/// [`ConfigError::Read`] on the first malformed line.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<ConfigFile, ConfigError> {
    read_config_file_with_settings(path, ParserSettings::default())
}

/// Reads the file at `path` into a new configuration using `settings`.
///
/// # Errors
///
/// As for [`read_config_file`].
pub fn read_config_file_with_settings(
    path: impl AsRef<Path>,
    settings: ParserSettings,
) -> Result<ConfigFile, ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading config file");
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = ConfigFile::with_settings(settings);
    config.read(BufReader::new(file)).map_err(|e| e.at(path))?;
    Ok(config)
}

/// Parses an in-memory buffer into a new configuration with default settings.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] on the first malformed line and
/// [`ConfigError::Stream`] if the buffer is not valid UTF-8.
pub fn read_config_bytes(bytes: &[u8]) -> Result<ConfigFile, ConfigError> {
    read_config_bytes_with_settings(bytes, ParserSettings::default())
}

/// Parses an in-memory buffer into a new configuration using `settings`.
///
/// # Errors
///
/// As for [`read_config_bytes`].
pub fn read_config_bytes_with_settings(
    bytes: &[u8],
    settings: ParserSettings,
) -> Result<ConfigFile, ConfigError> {
    let mut config = ConfigFile::with_settings(settings);
    config.read(bytes)?;
    Ok(config)
}

impl ConfigFile {
    /// Parses `reader` line by line into this configuration.
    ///
    /// Parsing starts in the default section.  On error, lines before the
    /// failing one have already been applied and the rest of the stream is
    /// not read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Stream`] if reading fails (including invalid
    /// UTF-8) and [`ConfigError::Read`] on the first malformed line.
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<(), ConfigError> {
        let mut parser = Parser::new(self);
        for line in reader.lines() {
            parser.feed_line(&line?)?;
        }
        let lines = parser.line_no();
        debug!(lines, sections = self.sections().len(), "config parsed");
        Ok(())
    }

    /// Serializes this configuration to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Stream`] if writing fails.
    pub fn write<W: Write>(&self, writer: W, header: Option<&str>) -> Result<(), ConfigError> {
        write_config(self, writer, header)?;
        Ok(())
    }

    /// Serializes this configuration into a byte vector.
    pub fn to_bytes(&self, header: Option<&str>) -> Vec<u8> {
        let mut buf = Vec::new();
        write_config(self, &mut buf, header).expect("writing to a Vec cannot fail");
        buf
    }

    /// Writes this configuration to `path`, creating or truncating the file.
    ///
    /// On Unix a newly created file gets the permission bits `mode` (subject
    /// to the process umask); elsewhere `mode` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be opened, written or
    /// flushed.
    pub fn write_config_file(
        &self,
        path: impl AsRef<Path>,
        mode: u32,
        header: Option<&str>,
    ) -> Result<(), ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), mode = %format!("{mode:o}"), "writing config file");

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let file = options.open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(&file, header).map_err(|e| e.at(path))?;
        file.sync_all().map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A sink that fails every write, standing in for a full disk or a closed
    /// pipe.
    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A source that fails on the first read.
    struct FailingSource;

    impl io::Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "source reset"))
        }
    }

    #[test]
    fn test_read_config_bytes_parses_sections() {
        let c = read_config_bytes(b"[s]\nk=v\n").expect("valid input");
        assert_eq!(c.raw_string("s", "k").unwrap(), "v");
    }

    #[test]
    fn test_last_line_without_newline_is_parsed() {
        let c = read_config_bytes(b"[s]\nk=v").expect("valid input");
        assert_eq!(c.raw_string("s", "k").unwrap(), "v");
    }

    #[test]
    fn test_crlf_line_endings_are_accepted() {
        let c = read_config_bytes(b"[s]\r\nk=v\r\nmulti=a\r\n  b\r\n").expect("valid input");
        assert_eq!(c.raw_string("s", "k").unwrap(), "v");
        assert_eq!(c.raw_string("s", "multi").unwrap(), "a\nb");
    }

    #[test]
    fn test_read_config_bytes_with_settings_uses_custom_default_section() {
        // Arrange
        let settings = ParserSettings::new().with_default_section("vars");

        // Act
        let c = read_config_bytes_with_settings(b"root=/srv\n[app]\ndir=%(root)s/app\n", settings)
            .expect("valid input");

        // Assert – options before any header land in the custom default section
        assert_eq!(c.raw_string("vars", "root").unwrap(), "/srv");
        assert_eq!(c.string("app", "dir").unwrap(), "/srv/app");
    }

    #[test]
    fn test_read_returns_parse_error() {
        let err = read_config_bytes(b"[s]\n???\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Read(ReadError::CouldNotParse { line_no: 2, .. })
        ));
    }

    #[test]
    fn test_line_without_separator_after_option_is_continuation() {
        let c = read_config_bytes(b"[s]\nk=v\n???\n").expect("continuation line");
        assert_eq!(c.raw_string("s", "k").unwrap(), "v\n???");
    }

    #[test]
    fn test_invalid_utf8_is_stream_error() {
        let err = read_config_bytes(b"[s]\nk=\xff\xfe\n").unwrap_err();
        assert!(matches!(err, ConfigError::Stream(ref e) if e.kind() == io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_read_into_existing_config_merges() {
        let mut c = ConfigFile::new();
        c.add_option("s", "keep", "1");
        c.read(&b"[s]\nnew=2\n"[..]).expect("valid input");
        assert_eq!(c.raw_string("s", "keep").unwrap(), "1");
        assert_eq!(c.raw_string("s", "new").unwrap(), "2");
    }

    #[test]
    fn test_failing_source_surfaces_stream_error() {
        let mut c = ConfigFile::new();
        let err = c.read(BufReader::new(FailingSource)).unwrap_err();
        assert!(matches!(err, ConfigError::Stream(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_failing_sink_surfaces_stream_error() {
        let mut c = ConfigFile::new();
        c.add_option("s", "k", "v");
        let err = c.write(FailingSink, Some("header")).unwrap_err();
        assert!(matches!(err, ConfigError::Stream(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_to_bytes_matches_write() {
        let mut c = ConfigFile::new();
        c.add_option("s", "k", "v");
        let mut streamed = Vec::new();
        c.write(&mut streamed, None).unwrap();
        assert_eq!(c.to_bytes(None), streamed);
    }

    #[test]
    fn test_read_missing_file_returns_io_error_with_path() {
        let err = read_config_file("/nonexistent/conffile/config.cfg").unwrap_err();
        match err {
            ConfigError::Io { path, source } => {
                assert!(path.ends_with("config.cfg"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
