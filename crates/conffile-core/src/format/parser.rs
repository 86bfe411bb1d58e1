//! Line-oriented parser for the configuration text format.
//!
//! Format:
//! ```text
//! # comment            ; comment            rem comment
//! [section]
//! option=value         option: value        option = value ; trailing comment
//! multi=first line
//!     continuation line
//! ```
//!
//! Lines are classified after trimming surrounding whitespace, in this order:
//!
//! 1. empty lines are skipped;
//! 2. lines starting with `#` or `;` are comments;
//! 3. lines starting with `rem` (any case) are comments;
//! 4. `[name]` opens a section and ends any multi-line value;
//! 5. any other line while the current section name is empty is an error;
//! 6. `option=value` or `option:value`, split at the first `=` or `:`;
//! 7. a line without a separator continues the previous option's value;
//! 8. anything else is an error.
//!
//! In values, `;` and `#` start a comment only when preceded by a space or a
//! tab.  `a=b;c` keeps `b;c` as the value.

use thiserror::Error;
use tracing::trace;

use crate::domain::config::ConfigFile;

/// Errors raised while parsing configuration text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// A non-header line appeared while the current section name was empty,
    /// for example after a `[]` header.
    #[error("line {line_no}: empty section name not allowed: {line}")]
    BlankSection { line_no: usize, line: String },

    /// The line is neither a comment, a header, an option nor a continuation.
    #[error("line {line_no}: could not parse line: {line}")]
    CouldNotParse { line_no: usize, line: String },
}

/// Incremental parser that applies lines to a [`ConfigFile`].
///
/// Lines are fed one at a time with [`feed_line`](Self::feed_line); the
/// parser tracks the current section and the option a continuation line
/// would extend.
pub struct Parser<'c> {
    config: &'c mut ConfigFile,
    /// Current section, lower-case.  Starts as the default section.
    section: String,
    /// Option that a continuation line appends to; empty when none.
    option: String,
    /// Number of lines fed so far.
    line_no: usize,
}

impl<'c> Parser<'c> {
    /// Creates a parser that writes into `config`, starting in its default
    /// section.
    pub fn new(config: &'c mut ConfigFile) -> Self {
        let section = config.default_section().to_string();
        Self {
            config,
            section,
            option: String::new(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Classifies one line of input and applies it to the configuration.
    ///
    /// `raw` must not contain the line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the line cannot be interpreted in the current
    /// state.  The configuration keeps every change made by earlier lines.
    pub fn feed_line(&mut self, raw: &str) -> Result<(), ReadError> {
        self.line_no += 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(['#', ';']) || is_rem_comment(line) {
            return Ok(());
        }

        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            self.option.clear();
            self.section = line[1..line.len() - 1].trim().to_lowercase();
            let created = self.config.add_section(&self.section);
            trace!(line_no = self.line_no, section = %self.section, created, "section header");
            return Ok(());
        }

        if self.section.is_empty() {
            return Err(ReadError::BlankSection {
                line_no: self.line_no,
                line: raw.to_string(),
            });
        }

        match line.find(['=', ':']) {
            Some(i) if i > 0 => {
                let option = line[..i].trim().to_lowercase();
                let value = strip_comments(&line[i + 1..]).trim();
                self.config.add_option(&self.section, &option, value);
                self.option = option;
                Ok(())
            }
            _ if !self.option.is_empty() => {
                let value = strip_comments(line).trim();
                let joined = match self.config.raw_string(&self.section, &self.option) {
                    Ok(prev) => format!("{prev}\n{value}"),
                    Err(_) => value.to_string(),
                };
                trace!(line_no = self.line_no, option = %self.option, "continuation line");
                self.config.add_option(&self.section, &self.option, &joined);
                Ok(())
            }
            _ => Err(ReadError::CouldNotParse {
                line_no: self.line_no,
                line: raw.to_string(),
            }),
        }
    }
}

/// Legacy `rem` comments, matched on the first three characters only.
fn is_rem_comment(line: &str) -> bool {
    line.get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rem"))
}

/// Cuts `s` at the first `;` or `#` that follows a space or a tab.
pub(crate) fn strip_comments(s: &str) -> &str {
    let cut = s
        .as_bytes()
        .windows(2)
        .position(|w| matches!(w[0], b' ' | b'\t') && matches!(w[1], b';' | b'#'));
    match cut {
        Some(i) => &s[..i],
        None => s,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
