//! Serializer for the configuration text format.
//!
//! Output layout:
//! ```text
//! # header line 1
//! # header line 2
//! [default]
//! option=value
//!
//! [section]
//! multi=first line
//! 	second line
//!
//! ```
//!
//! The default section comes first and is omitted when it has no options.
//! The remaining sections, and the options inside every section, follow in
//! ascending name order.  A value containing newlines is written as one
//! tab-indented continuation line per extra line so that the parser rebuilds
//! the same value.

use std::io::{self, BufWriter, Write};

use tracing::debug;

use crate::domain::config::{ConfigFile, SectionMap};

/// Writes `config` to `writer`, preceded by `header` as `# ` comment lines.
///
/// An empty or absent header writes no comment lines.
///
/// # Errors
///
/// Returns any I/O error raised by `writer`.
pub fn write_config<W: Write>(
    config: &ConfigFile,
    writer: W,
    header: Option<&str>,
) -> io::Result<()> {
    let mut out = BufWriter::new(writer);

    if let Some(header) = header.filter(|h| !h.is_empty()) {
        for line in header.lines() {
            if line.is_empty() {
                writeln!(out, "#")?;
            } else {
                writeln!(out, "# {line}")?;
            }
        }
    }

    let default = config.default_section();
    let mut sections = 0usize;
    if let Some(options) = config.section_map(default).filter(|m| !m.is_empty()) {
        write_section(&mut out, default, options)?;
        sections += 1;
    }
    for (name, options) in config.iter_sections().filter(|(name, _)| *name != default) {
        write_section(&mut out, name, options)?;
        sections += 1;
    }

    out.flush()?;
    debug!(sections, "configuration written");
    Ok(())
}

fn write_section<W: Write>(out: &mut W, name: &str, options: &SectionMap) -> io::Result<()> {
    writeln!(out, "[{name}]")?;
    for (option, value) in options {
        let mut lines = value.split('\n');
        let first = lines.next().unwrap_or_default();
        writeln!(out, "{option}={first}")?;
        for continuation in lines {
            writeln!(out, "\t{continuation}")?;
        }
    }
    writeln!(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: &ConfigFile, header: Option<&str>) -> String {
        let mut buf = Vec::new();
        write_config(config, &mut buf, header).expect("write to Vec never fails");
        String::from_utf8(buf).expect("output is UTF-8")
    }

    #[test]
    fn test_empty_config_writes_nothing() {
        assert_eq!(render(&ConfigFile::new(), None), "");
    }

    #[test]
    fn test_single_section_with_header() {
        // Arrange
        let mut c = ConfigFile::new();
        c.add_section("Section");
        c.add_option("section", "Option", "value");

        // Act
        let text = render(&c, Some("A header for this file"));

        // Assert
        assert_eq!(text, "# A header for this file\n[section]\noption=value\n\n");
    }

    #[test]
    fn test_multi_line_header_writes_one_comment_per_line() {
        let text = render(&ConfigFile::new(), Some("first\n\nthird"));
        assert_eq!(text, "# first\n#\n# third\n");
    }

    #[test]
    fn test_empty_header_is_omitted() {
        let mut c = ConfigFile::new();
        c.add_option("s", "k", "v");
        assert_eq!(render(&c, Some("")), "[s]\nk=v\n\n");
    }

    #[test]
    fn test_default_section_written_first_then_sorted_sections() {
        // Arrange
        let mut c = ConfigFile::new();
        c.add_option("zeta", "b", "2");
        c.add_option("zeta", "a", "1");
        c.add_option("alpha", "x", "y");
        c.add_option("default", "host", "h");

        // Act
        let text = render(&c, None);

        // Assert
        assert_eq!(
            text,
            "[default]\nhost=h\n\n[alpha]\nx=y\n\n[zeta]\na=1\nb=2\n\n"
        );
    }

    #[test]
    fn test_empty_non_default_section_is_still_written() {
        let mut c = ConfigFile::new();
        c.add_section("Empty");
        assert_eq!(render(&c, None), "[empty]\n\n");
    }

    #[test]
    fn test_multi_line_value_written_as_continuation_lines() {
        let mut c = ConfigFile::new();
        c.add_option("s", "comments", "This is a multi-line\nentry");
        assert_eq!(
            render(&c, None),
            "[s]\ncomments=This is a multi-line\n\tentry\n\n"
        );
    }

    #[test]
    fn test_values_keep_case_and_embedded_separators() {
        let mut c = ConfigFile::new();
        c.add_option("S", "URL", "http://Example.com/?a=b");
        assert_eq!(render(&c, None), "[s]\nurl=http://Example.com/?a=b\n\n");
    }
}
