//! Expansion of `%(name)s` references.
//!
//! A value such as `%(protocol)s%(host)s/index` refers to options of the
//! reserved default section.  Expansion works in passes: every pass replaces
//! the leftmost reference in the value with the *raw* value it names.  If that
//! raw value contains references of its own they are picked up by later
//! passes, which is how chained references resolve.
//!
//! The number of passes is bounded by [`ParserSettings::depth_values`]; a
//! value that still contains references after that many passes is reported
//! as [`GetError::MaxDepthReached`].  This turns reference cycles such as
//! `a=%(b)s`, `b=%(a)s` into an error instead of an endless loop.  Replacing a
//! single reference per pass also keeps the growth of self-referencing values
//! linear in the number of passes.
//!
//! The ceiling counts substitutions, not loop iterations: a value whose last
//! reference is replaced on the final allowed pass still resolves.  With a
//! ceiling of `n`, a chain of exactly `n` substitutions succeeds and a chain
//! of `n + 1` fails.
//!
//! [`ParserSettings::depth_values`]: crate::ParserSettings::depth_values

use std::borrow::Cow;

use tracing::debug;

use crate::domain::accessors::GetError;
use crate::domain::config::ConfigFile;

/// Location of one `%(name)s` reference inside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reference<'a> {
    /// Byte offset of the leading `%`.
    start: usize,
    /// Byte offset just past the trailing `s`.
    end: usize,
    /// The referenced option name as written.
    name: &'a str,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-')
}

/// Finds the leftmost well-formed reference in `value`.
fn find_reference(value: &str) -> Option<Reference<'_>> {
    let bytes = value.as_bytes();
    let mut from = 0;
    while let Some(offset) = value[from..].find("%(") {
        let start = from + offset;
        let name_start = start + 2;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| is_name_byte(**b))
            .count();
        let name_end = name_start + name_len;
        if name_len > 0 && bytes[name_end..].starts_with(b")s") {
            return Some(Reference {
                start,
                end: name_end + 2,
                name: &value[name_start..name_end],
            });
        }
        // `%` is ASCII, so the next byte starts a character.
        from = start + 1;
    }
    None
}

impl ConfigFile {
    /// Expands every `%(name)s` reference in `value` against the default
    /// section.
    ///
    /// Values without references are returned borrowed and unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GetError::OptionNotFound`] (scoped to the default section)
    /// when a referenced name is not defined there, and
    /// [`GetError::MaxDepthReached`] when references remain after the
    /// configured number of passes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conffile_core::ConfigFile;
    ///
    /// let mut c = ConfigFile::new();
    /// c.add_option("default", "host", "example.com");
    /// assert_eq!(c.interpolate("http://%(host)s/").unwrap(), "http://example.com/");
    /// ```
    pub fn interpolate<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, GetError> {
        if find_reference(value).is_none() {
            return Ok(Cow::Borrowed(value));
        }

        let depth = self.settings().depth_values();
        let mut current = value.to_string();
        for _ in 0..depth {
            let Some(reference) = find_reference(&current) else {
                return Ok(Cow::Owned(current));
            };
            let replacement = self.lookup_default(reference.name)?;
            current.replace_range(reference.start..reference.end, replacement);
        }

        if find_reference(&current).is_none() {
            return Ok(Cow::Owned(current));
        }
        debug!(depth, value, "interpolation depth exhausted");
        Err(GetError::MaxDepthReached { depth })
    }

    /// Raw value of `name` in the default section.
    fn lookup_default(&self, name: &str) -> Result<&str, GetError> {
        let section = self.default_section();
        let option = name.to_lowercase();
        self.section_map(section)
            .and_then(|options| options.get(&option))
            .map(String::as_str)
            .ok_or_else(|| GetError::OptionNotFound {
                section: section.to_string(),
                option,
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
