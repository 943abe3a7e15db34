//! Scanner configuration: nesting ceiling and enabled rule set.
//!
//! Every generation of the scanner is the same state machine with some
//! rules switched off. [`ScannerConfig::full()`] enables everything;
//! [`ScannerConfig::minimal()`] reproduces the first five-kind scanner with
//! a boolean "inside a value" flag, no skip flag and a one-byte state.

use bitflags::bitflags;

use crate::token::ValidTokens;

/// Nesting ceiling of the full configuration.
///
/// Reaching it turns the next value-start request into an unfinished-line
/// recovery, bounding the work spent on input that never dedents.
pub const MAX_NESTED_PATTERNS: u8 = 10;

bitflags! {
    /// Optional dispatcher rules.
    ///
    /// Value-start, pure-text, value-end and blank-lines are always on.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Features: u8 {
        /// Skip token for a blank run that leaves an entry without a value.
        const SKIP = 1 << 0;
        /// Persist the skip flag (second state byte) and suppress pure text
        /// while it is set.
        const SKIP_FLAG = 1 << 1;
        /// Unfinished-line recovery once the nesting ceiling is reached.
        const RECURSION_GUARD = 1 << 2;
        /// Comment-block-close detection.
        const COMMENT_BLOCKS = 1 << 3;
        /// End-of-positional-arguments detection inside calls.
        const POSITIONAL_ARGS = 1 << 4;
        /// Blank lines are only recognized at column 0.
        const ANCHORED_BLANK_LINES = 1 << 5;
    }
}

/// Dispatcher configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    max_nested_patterns: u8,
    features: Features,
}

impl ScannerConfig {
    /// All rules, ceiling [`MAX_NESTED_PATTERNS`], eight token kinds.
    pub const fn full() -> Self {
        Self {
            max_nested_patterns: MAX_NESTED_PATTERNS,
            features: Features::SKIP
                .union(Features::SKIP_FLAG)
                .union(Features::RECURSION_GUARD)
                .union(Features::COMMENT_BLOCKS)
                .union(Features::POSITIONAL_ARGS),
        }
    }

    /// Five token kinds, a single nesting level, column-anchored blank lines.
    pub const fn minimal() -> Self {
        Self {
            max_nested_patterns: 1,
            features: Features::SKIP.union(Features::ANCHORED_BLANK_LINES),
        }
    }

    /// Replace the nesting ceiling. A ceiling of 0 is raised to 1 so that a
    /// value can always open.
    #[must_use]
    pub fn with_max_nested_patterns(mut self, max: u8) -> Self {
        self.max_nested_patterns = max.max(1);
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    #[inline]
    pub fn max_nested_patterns(&self) -> u8 {
        self.max_nested_patterns
    }

    #[inline]
    pub fn features(&self) -> Features {
        self.features
    }

    #[inline]
    pub fn has(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    /// Width of the serialized state: two bytes when the skip flag is tracked.
    pub fn state_width(&self) -> usize {
        if self.has(Features::SKIP_FLAG) {
            2
        } else {
            1
        }
    }

    /// Token kinds this configuration can emit.
    pub fn supported_tokens(&self) -> ValidTokens {
        let mut mask = ValidTokens::VALUE_START
            | ValidTokens::PURE_TEXT
            | ValidTokens::VALUE_END
            | ValidTokens::BLANK_LINES;
        if self.has(Features::SKIP) {
            mask |= ValidTokens::SKIP;
        }
        if self.has(Features::RECURSION_GUARD) {
            mask |= ValidTokens::UNFINISHED_LINE;
        }
        if self.has(Features::COMMENT_BLOCKS) {
            mask |= ValidTokens::COMMENT_BLOCK_CLOSE;
        }
        if self.has(Features::POSITIONAL_ARGS) {
            mask |= ValidTokens::END_POSITIONAL_ARGS;
        }
        mask
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests;
