//! The cursor capability the scanner reads through.
//!
//! The grammar engine owns the input and exposes it as a [`ScanCursor`]:
//! one character of lookahead, `advance`, and `mark_end` to commit the end of
//! the token under construction. Characters advanced past the last
//! `mark_end` are not part of the token; the host rewinds to the marked end
//! before the next call, so they are seen again.
//!
//! [`SourceCursor`] is the in-memory implementation used by
//! [`ScanSession`](crate::ScanSession), tests and benchmarks.

use std::fmt;

use crate::source_buffer::SourceBuffer;

/// Character source driven by the scanner.
pub trait ScanCursor {
    /// Current character, `'\0'` at end of input.
    fn lookahead(&self) -> char;

    /// Consume the lookahead character. Does nothing at end of input.
    ///
    /// `retain: false` before any retained character moves the token start
    /// forward instead of extending the token.
    fn advance(&mut self, retain: bool);

    /// Commit the current offset as the end of the token. The last call wins.
    fn mark_end(&mut self);

    /// Zero-based byte column on the current line.
    fn column(&self) -> u32;

    /// Diagnostic sink. Defaults to a `trace`-level event.
    fn log(&mut self, args: fmt::Arguments<'_>) {
        tracing::trace!(target: "fluent_scanner", "{args}");
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.lookahead() == '\0'
    }
}

/// [`ScanCursor`] over a [`SourceBuffer`].
///
/// Cheap to copy; a copy is an independent snapshot of the position.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    source_len: u32,
    pos: u32,
    column: u32,
    token_start: u32,
    marked_end: Option<u32>,
    retained: bool,
}

impl<'a> SourceCursor<'a> {
    /// Cursor at the start of `source`.
    pub fn new(source: &'a SourceBuffer) -> Self {
        Self::at(source, 0)
    }

    /// Cursor positioned at byte `offset`, clamped to the source length.
    ///
    /// The column is recomputed from the preceding newline.
    pub fn at(source: &'a SourceBuffer, offset: u32) -> Self {
        let mut cursor = Self {
            buf: source.as_sentinel_bytes(),
            source_len: source.len(),
            pos: 0,
            column: 0,
            token_start: 0,
            marked_end: None,
            retained: false,
        };
        cursor.reset_to(offset);
        cursor
    }

    /// Move to `offset` and start a fresh token there.
    pub fn reset_to(&mut self, offset: u32) {
        let pos = offset.min(self.source_len);
        let line = &self.buf[..pos as usize];
        let line_start = memchr::memrchr(b'\n', line).map_or(0, |nl| nl + 1);
        self.pos = pos;
        self.column = u32::try_from(line.len() - line_start).unwrap_or(u32::MAX);
        self.begin_token();
    }

    /// Forget the marked end and start a new token at the current position.
    pub fn begin_token(&mut self) {
        self.token_start = self.pos;
        self.marked_end = None;
        self.retained = false;
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Start of the token under construction.
    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// End of the token: the last `mark_end`, or the current position if
    /// none was made.
    #[inline]
    pub fn token_end(&self) -> u32 {
        self.marked_end.unwrap_or(self.pos)
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }
}

impl ScanCursor for SourceCursor<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        let pos = self.pos as usize;
        let byte = self.buf[pos];
        if byte.is_ascii() {
            return char::from(byte);
        }
        // Padding guarantees four readable bytes past any position.
        let width = Self::utf8_char_width(byte) as usize;
        std::str::from_utf8(&self.buf[pos..pos + width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn advance(&mut self, retain: bool) {
        if self.pos >= self.source_len {
            return;
        }
        let byte = self.buf[self.pos as usize];
        let width = Self::utf8_char_width(byte);
        self.pos = (self.pos + width).min(self.source_len);
        if byte == b'\n' {
            self.column = 0;
        } else {
            self.column += width;
        }
        if retain {
            self.retained = true;
        } else if !self.retained {
            self.token_start = self.pos;
            // A mark behind the new start would give a negative span.
            if self.marked_end.is_some_and(|end| end < self.pos) {
                self.marked_end = None;
            }
        }
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    #[inline]
    fn column(&self) -> u32 {
        self.column
    }
}
