//! Persistent scanner state and its fixed-width encoding.
//!
//! The grammar engine snapshots the scanner between tokens for incremental
//! re-lexing and speculative parses, so the whole state must survive a
//! byte round trip:
//!
//! ```text
//! byte 0: pattern_depth   (0..=max_nested_patterns)
//! byte 1: skip flag 0 / 1 (only when Features::SKIP_FLAG is enabled)
//! ```
//!
//! An empty buffer always decodes to the initial state.

use smallvec::SmallVec;
use thiserror::Error;

use crate::config::ScannerConfig;

/// Largest encoding across all configurations.
pub const MAX_STATE_WIDTH: usize = 2;

/// Nesting depth of open values plus the skip flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScannerState {
    pattern_depth: u8,
    skip: bool,
}

/// Rejection reasons for [`ScannerState::decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("scanner state is {found} bytes, expected {expected}")]
    WrongWidth { expected: usize, found: usize },
    #[error("pattern depth {depth} exceeds the nesting ceiling {max}")]
    DepthOutOfRange { depth: u8, max: u8 },
    #[error("skip flag byte must be 0 or 1, found {0}")]
    InvalidSkipByte(u8),
}

impl ScannerState {
    /// Initial state: no open value, skip flag clear.
    pub const fn new() -> Self {
        Self {
            pattern_depth: 0,
            skip: false,
        }
    }

    #[inline]
    pub fn pattern_depth(&self) -> u8 {
        self.pattern_depth
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        self.skip
    }

    /// Whether at least one value context is open.
    #[inline]
    pub fn in_value(&self) -> bool {
        self.pattern_depth > 0
    }

    /// Open one value level and clear the skip flag.
    pub(crate) fn open_value(&mut self, max: u8) {
        debug_assert!(
            self.pattern_depth < max,
            "value opened at nesting ceiling {max}"
        );
        self.pattern_depth += 1;
        self.skip = false;
    }

    /// Close the innermost value level.
    pub(crate) fn close_value(&mut self) {
        debug_assert!(self.pattern_depth > 0, "value closed at depth 0");
        self.pattern_depth = self.pattern_depth.saturating_sub(1);
    }

    pub(crate) fn set_skip(&mut self) {
        self.skip = true;
    }

    /// Recursion-guard reset back to the initial state.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Write the encoding into `buffer` and return the number of bytes written.
    ///
    /// A buffer shorter than the configured width receives a truncated
    /// encoding; the grammar engine always provides a larger one.
    pub fn serialize(&self, buffer: &mut [u8], config: &ScannerConfig) -> usize {
        let bytes = self.to_bytes(config);
        let n = bytes.len().min(buffer.len());
        buffer[..n].copy_from_slice(&bytes[..n]);
        n
    }

    /// Owned encoding, `config.state_width()` bytes long.
    pub fn to_bytes(&self, config: &ScannerConfig) -> SmallVec<[u8; MAX_STATE_WIDTH]> {
        let mut bytes = SmallVec::new();
        bytes.push(self.pattern_depth);
        if config.state_width() > 1 {
            bytes.push(u8::from(self.skip));
        }
        bytes
    }

    /// Restore from an engine-provided buffer. Never fails.
    ///
    /// Empty input yields the initial state. A missing second byte means the
    /// skip flag is clear and any non-zero second byte sets it. A depth above
    /// the ceiling is clamped so the nesting invariant holds even for a
    /// buffer written by a differently configured scanner.
    pub fn deserialize(buffer: &[u8], config: &ScannerConfig) -> Self {
        let Some(&depth) = buffer.first() else {
            return Self::new();
        };
        let skip = config.state_width() > 1 && buffer.get(1).is_some_and(|&b| b != 0);
        Self {
            pattern_depth: depth.min(config.max_nested_patterns()),
            skip,
        }
    }

    /// Strict decoding for snapshots the caller owns.
    ///
    /// Empty input is still the initial state, never an error.
    pub fn decode(buffer: &[u8], config: &ScannerConfig) -> Result<Self, StateError> {
        if buffer.is_empty() {
            return Ok(Self::new());
        }
        let expected = config.state_width();
        if buffer.len() != expected {
            return Err(StateError::WrongWidth {
                expected,
                found: buffer.len(),
            });
        }
        let depth = buffer[0];
        let max = config.max_nested_patterns();
        if depth > max {
            return Err(StateError::DepthOutOfRange { depth, max });
        }
        let skip = match buffer.get(1) {
            None | Some(0) => false,
            Some(1) => true,
            Some(&other) => return Err(StateError::InvalidSkipByte(other)),
        };
        Ok(Self {
            pattern_depth: depth,
            skip,
        })
    }
}
