//! Pattern buffer with ANSI stripping and last-line search.
//!
//! Idle-prompt checks only look at the final line. Command-specific prompt
//! specs see the full text.

use std::fmt;

use regex::bytes::Regex;

/// Buffer for accumulating shell output and searching it for patterns.
///
/// Escape sequences are removed as data arrives. The `vte` parser keeps its
/// state between calls, so a sequence split across two reads is still
/// stripped.
pub struct PatternBuffer {
    /// The accumulated (cleaned) output.
    buffer: Vec<u8>,

    /// Escape sequence parser.
    parser: vte::Parser,
}

/// Collects printable output and the whitespace controls a shell emits.
struct Printable<'a> {
    out: &'a mut Vec<u8>,
}

impl vte::Perform for Printable<'_> {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.out
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.push(byte);
        }
    }
}

impl PatternBuffer {
    /// Create an empty pattern buffer.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            parser: vte::Parser::new(),
        }
    }

    /// Extend the buffer with new data, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let mut performer = Printable {
            out: &mut self.buffer,
        };
        self.parser.advance(&mut performer, data);
    }

    /// Search the entire buffer for a pattern.
    pub fn search_full(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        pattern.find(&self.buffer)
    }

    /// Byte offset where the final line starts.
    pub fn last_line_start(&self) -> usize {
        memchr::memrchr(b'\n', &self.buffer).map_or(0, |pos| pos + 1)
    }

    /// The final (possibly incomplete) line, without leading whitespace.
    ///
    /// A buffer ending in a newline has an empty last line.
    pub fn last_line(&self) -> &[u8] {
        self.buffer[self.last_line_start()..].trim_ascii_start()
    }

    /// Check whether the final line matches a pattern.
    pub fn last_line_matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.last_line())
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatternBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternBuffer")
            .field("len", &self.buffer.len())
            .finish()
    }
}
