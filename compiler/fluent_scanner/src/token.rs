//! Token kinds emitted by the scanner and the mask of acceptable kinds.
//!
//! Ordinals are stable: the grammar's `externals` list indexes these kinds
//! by position, so reordering the enum breaks every generated parse table.

use bitflags::bitflags;

/// Context-sensitive token kinds the scanner can emit.
///
/// The discriminant is the ordinal the grammar engine uses to index its
/// "valid symbols" array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Opens one value (pattern) nesting level. May span leading blanks.
    ValueStart = 0,
    /// A run of literal text inside a value, up to a placeable or the value end.
    PureText = 1,
    /// Closes the innermost open value.
    ValueEnd = 2,
    /// A blank run after `=` with nothing meaningful following (no value).
    Skip = 3,
    /// Vertical space between top-level entries.
    BlankLines = 4,
    /// Lossy recovery: the rest of a line once the nesting ceiling is hit.
    UnfinishedLine = 5,
    /// Zero-width end of a `#` comment block.
    CommentBlockClose = 6,
    /// End of a call's positional arguments, absorbing the `,` before a named one.
    EndPositionalArgs = 7,
}

impl TokenKind {
    /// All kinds, in ordinal order.
    pub const ALL: [TokenKind; 8] = [
        TokenKind::ValueStart,
        TokenKind::PureText,
        TokenKind::ValueEnd,
        TokenKind::Skip,
        TokenKind::BlankLines,
        TokenKind::UnfinishedLine,
        TokenKind::CommentBlockClose,
        TokenKind::EndPositionalArgs,
    ];

    /// Ordinal of this kind in the grammar's externals list.
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Look up a kind by ordinal.
    pub const fn from_ordinal(ordinal: usize) -> Option<TokenKind> {
        if ordinal < Self::ALL.len() {
            Some(Self::ALL[ordinal])
        } else {
            None
        }
    }

    /// Single-bit mask for this kind.
    #[inline]
    pub const fn mask(self) -> ValidTokens {
        ValidTokens::from_bits_truncate(1 << (self as u8))
    }

    /// Name as it appears in the grammar's `externals`.
    pub const fn grammar_name(self) -> &'static str {
        match self {
            TokenKind::ValueStart => "_pattern_start",
            TokenKind::PureText => "pure_text",
            TokenKind::ValueEnd => "_pattern_end",
            TokenKind::Skip => "_pattern_skip",
            TokenKind::BlankLines => "_blank_lines",
            TokenKind::UnfinishedLine => "unfinished_line",
            TokenKind::CommentBlockClose => "_close_comment_block",
            TokenKind::EndPositionalArgs => "_end_positional_args",
        }
    }
}

bitflags! {
    /// Set of token kinds the grammar would accept at the current position.
    ///
    /// Bit `n` corresponds to the kind with ordinal `n`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValidTokens: u8 {
        const VALUE_START = 1 << 0;
        const PURE_TEXT = 1 << 1;
        const VALUE_END = 1 << 2;
        const SKIP = 1 << 3;
        const BLANK_LINES = 1 << 4;
        const UNFINISHED_LINE = 1 << 5;
        const COMMENT_BLOCK_CLOSE = 1 << 6;
        const END_POSITIONAL_ARGS = 1 << 7;
    }
}

impl ValidTokens {
    /// Build a mask from the engine's boolean array, indexed by ordinal.
    ///
    /// Entries beyond the known kinds are ignored, and a short array leaves
    /// the missing kinds unset.
    pub fn from_bools(valid: &[bool]) -> Self {
        valid
            .iter()
            .zip(TokenKind::ALL)
            .filter(|&(&ok, _)| ok)
            .fold(ValidTokens::empty(), |acc, (_, kind)| acc | kind.mask())
    }

    /// Whether `kind` is acceptable.
    #[inline]
    pub fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.mask())
    }
}

impl From<TokenKind> for ValidTokens {
    fn from(kind: TokenKind) -> Self {
        kind.mask()
    }
}

/// A token committed by the host: kind plus half-open byte span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive), the last `mark_end` of the call.
    pub end: u32,
}

impl Token {
    /// Byte length of the span. Zero-width tokens are legal; an inverted
    /// span has length 0.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
