//! Reference host: drives a [`Scanner`] over an in-memory source.
//!
//! The session plays the grammar engine's part. For every call it places a
//! fresh [`SourceCursor`] at the committed offset, runs the scanner and
//! either commits the token's marked end or leaves the offset untouched.
//! Text matched by the grammar's own tokens is skipped with
//! [`advance_to`](ScanSession::advance_to).

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::ScannerConfig;
use crate::cursor::SourceCursor;
use crate::scanner::Scanner;
use crate::source_buffer::{EncodingIssue, SourceBuffer};
use crate::state::{ScannerState, StateError, MAX_STATE_WIDTH};
use crate::token::{Token, ValidTokens};

/// Committed offset plus encoded scanner state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    offset: u32,
    state: SmallVec<[u8; MAX_STATE_WIDTH]>,
}

impl Snapshot {
    /// Rebuild a snapshot from a stored offset and state bytes.
    pub fn new(offset: u32, state: &[u8]) -> Self {
        Self {
            offset,
            state: SmallVec::from_slice(state),
        }
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The state exactly as the engine would store it.
    #[inline]
    pub fn state_bytes(&self) -> &[u8] {
        &self.state
    }
}

/// A scanner bound to one source text.
#[derive(Clone, Debug)]
pub struct ScanSession {
    source: SourceBuffer,
    scanner: Scanner,
    offset: u32,
}

impl ScanSession {
    /// Session with the full rule set, positioned after any leading BOM.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ScannerConfig::full())
    }

    pub fn with_config(source: &str, config: ScannerConfig) -> Self {
        let source = SourceBuffer::new(source);
        for issue in source.encoding_issues() {
            debug!(kind = ?issue.kind, pos = issue.pos, "encoding issue in source");
        }
        let offset = source.content_start();
        Self {
            source,
            scanner: Scanner::with_config(config),
            offset,
        }
    }

    /// Ask the scanner for one of the `valid` kinds at the committed offset.
    ///
    /// On success the offset moves to the token's end. On failure nothing
    /// changes, so the caller can try its own tokens at the same place.
    pub fn scan(&mut self, valid: ValidTokens) -> Option<Token> {
        let mut cursor = SourceCursor::at(&self.source, self.offset);
        let Some(kind) = self.scanner.scan(&mut cursor, valid) else {
            trace!(offset = self.offset, ?valid, "no external token");
            return None;
        };
        let token = Token {
            kind,
            start: cursor.token_start(),
            end: cursor.token_end(),
        };
        trace!(?token, depth = self.scanner.state().pattern_depth(), "committed");
        self.offset = token.end;
        Some(token)
    }

    /// Move the committed offset, e.g. past a token the grammar matched
    /// itself. Clamped to the source length.
    pub fn advance_to(&mut self, offset: u32) {
        self.offset = offset.min(self.source.len());
    }

    /// Move the committed offset forward by `len` bytes.
    pub fn skip(&mut self, len: u32) {
        self.advance_to(self.offset.saturating_add(len));
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn state(&self) -> ScannerState {
        self.scanner.state()
    }

    #[inline]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        self.source.encoding_issues()
    }

    /// Source text covered by `token`.
    pub fn text(&self, token: &Token) -> &str {
        self.source.slice(token.start, token.end).unwrap_or_default()
    }

    /// Source text from the committed offset to the end.
    pub fn rest(&self) -> &str {
        self.source
            .slice(self.offset, self.source.len())
            .unwrap_or_default()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(offset = self.offset))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            offset: self.offset,
            state: self.scanner.state().to_bytes(self.scanner.config()),
        }
    }

    /// Return to a snapshot. The state bytes are decoded strictly; on error
    /// the session is left unchanged.
    #[tracing::instrument(level = "trace", skip_all, fields(offset = snapshot.offset))]
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), StateError> {
        let state = ScannerState::decode(&snapshot.state, self.scanner.config())?;
        self.scanner.set_state(state);
        self.advance_to(snapshot.offset);
        Ok(())
    }
}
