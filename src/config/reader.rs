//! Forward-only reader over the significant lines of a configuration file.

use std::iter::Enumerate;
use std::str::Lines;

use crate::error::FormatError;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// One retained line: its indentation and indent-stripped content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based source line number.
    pub number: usize,
    /// Number of leading space characters.
    pub indent: usize,
    /// The line with its indent and trailing whitespace removed.
    pub content: &'a str,
}

/// Single-cursor reader that skips blank and `#` comment lines.
///
/// The reader always holds the *current* line; [`advance`](Self::advance)
/// moves to the next retained one.  Once the input is exhausted the
/// current line is `None` and further advances do nothing.
///
/// # Examples
///
/// ```
/// use config_utils::config::reader::LineReader;
///
/// let mut reader = LineReader::new("# comment\nid: a\n\n  b: c\n").unwrap();
/// let line = reader.current().unwrap();
/// assert_eq!((line.indent, line.content), (0, "id: a"));
/// reader.advance().unwrap();
/// let line = reader.current().unwrap();
/// assert_eq!((line.number, line.indent, line.content), (4, 2, "b: c"));
/// reader.advance().unwrap();
/// assert!(reader.is_eof());
/// ```
#[derive(Debug)]
pub struct LineReader<'a> {
    lines: Enumerate<Lines<'a>>,
    current: Option<Line<'a>>,
    last_number: usize,
}

impl<'a> LineReader<'a> {
    /// Create a reader positioned on the first retained line.
    ///
    /// A leading UTF-8 byte-order mark is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NonSpaceIndent`] if that line is indented with
    /// anything other than spaces.
    pub fn new(text: &'a str) -> Result<Self, FormatError> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut reader = Self {
            lines: text.lines().enumerate(),
            current: None,
            last_number: 0,
        };
        reader.advance()?;
        Ok(reader)
    }

    /// The line under the cursor, or `None` at end of input.
    #[must_use]
    pub const fn current(&self) -> Option<&Line<'a>> {
        self.current.as_ref()
    }

    /// Whether the whole input has been consumed.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.current.is_none()
    }

    /// Line number of the current line, or one past the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.current
            .as_ref()
            .map_or(self.last_number + 1, |line| line.number)
    }

    /// Move to the next retained line.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NonSpaceIndent`] if the next retained line's
    /// indent contains a tab or other non-space character.
    pub fn advance(&mut self) -> Result<(), FormatError> {
        self.current = None;
        for (index, raw) in self.lines.by_ref() {
            let number = index + 1;
            self.last_number = number;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let body = raw.trim_start();
            let prefix = raw.get(..raw.len() - body.len()).unwrap_or_default();
            if prefix.chars().any(|c| c != ' ') {
                return Err(FormatError::NonSpaceIndent { line: number });
            }
            self.current = Some(Line {
                number,
                indent: prefix.len(),
                content: body.trim_end(),
            });
            break;
        }
        Ok(())
    }
}
