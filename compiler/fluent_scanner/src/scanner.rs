//! Priority-ordered dispatcher over the context-sensitive token kinds.
//!
//! # Rule Order
//!
//! The first rule that fires wins; later rules are not consulted.
//!
//! 1. end of input: value-end, comment-block-close or skip
//! 2. skip: a blank run that stops right after `=`
//! 3. value-start: open one nesting level
//! 4. pure text: literal text up to `{` or the end of the value
//! 5. value-end: close the innermost level
//! 6. blank lines between entries
//! 7. unfinished line: recursion guard at the nesting ceiling
//! 8. comment-block-close
//! 9. end of positional arguments
//!
//! Rules share one cursor, so a rule that reads without firing leaves the
//! cursor advanced for the rules after it. Value-start after a failed skip
//! therefore spans the blank run that precedes a value on the next line.

use crate::classify::{
    consume_blank_run, is_blank, is_close_comment_block, is_end_positional_args,
};
use crate::config::{Features, ScannerConfig};
use crate::cursor::ScanCursor;
use crate::state::ScannerState;
use crate::token::{TokenKind, ValidTokens};

/// Result of the pure-text rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextScan {
    /// At least one character of text; the end is marked.
    Text,
    /// No text, and the value ends here.
    ValueEnds,
    /// No text (the lookahead opens a placeable).
    Empty,
}

/// External scanner for the Fluent grammar.
///
/// One instance per parse session. The engine snapshots it through
/// [`serialize`](Self::serialize) and restores it with
/// [`deserialize`](Self::deserialize).
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    state: ScannerState,
    config: ScannerConfig,
}

impl Scanner {
    /// Scanner with the full rule set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            state: ScannerState::new(),
            config,
        }
    }

    #[inline]
    pub fn state(&self) -> ScannerState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Replace the state wholesale, e.g. from a strictly decoded snapshot.
    pub fn set_state(&mut self, state: ScannerState) {
        self.state = state;
    }

    /// Write the state into the engine's buffer; returns bytes written.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        self.state.serialize(buffer, &self.config)
    }

    /// Restore the state from the engine's buffer. Empty input resets it.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.state = ScannerState::deserialize(buffer, &self.config);
    }

    /// Decide the next context-sensitive token.
    ///
    /// `valid` is the set of kinds the grammar accepts here; kinds the
    /// configuration does not support are ignored. Returns `None` when no
    /// rule applies, leaving the position to the grammar's own tokens. The
    /// state is only modified when a token is returned.
    pub fn scan<C: ScanCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        valid: ValidTokens,
    ) -> Option<TokenKind> {
        let valid = valid & self.config.supported_tokens();
        scan_trace!(cursor, "starting scan, valid {valid:?}, state {:?}", self.state);

        let result = self.dispatch(cursor, valid);

        debug_assert!(
            !matches!(result, Some(kind) if !valid.accepts(kind)),
            "emitted {result:?} outside of {valid:?}"
        );
        debug_assert!(self.state.pattern_depth() <= self.config.max_nested_patterns());
        match result {
            Some(kind) => scan_trace!(cursor, "return {kind:?}"),
            None => scan_trace!(cursor, "scan ended with no token"),
        }
        result
    }

    fn dispatch<C: ScanCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        valid: ValidTokens,
    ) -> Option<TokenKind> {
        if cursor.is_eof() {
            return self.end_of_input(valid);
        }

        if valid.accepts(TokenKind::Skip) && is_blank(cursor.lookahead()) {
            scan_trace!(cursor, "test pattern skip");
            if consume_blank_run(cursor).stopped {
                if self.config.has(Features::SKIP_FLAG) {
                    self.state.set_skip();
                }
                return Some(TokenKind::Skip);
            }
        }

        let max = self.config.max_nested_patterns();
        if valid.accepts(TokenKind::ValueStart)
            && self.state.pattern_depth() < max
            && !cursor.is_eof()
        {
            self.state.open_value(max);
            while matches!(cursor.lookahead(), ' ' | '\t') {
                cursor.advance(true);
            }
            return Some(TokenKind::ValueStart);
        }

        let mut text_attempted = false;
        let mut text_stopped = false;
        if valid.accepts(TokenKind::PureText) && self.state.in_value() && !self.state.is_skip() {
            scan_trace!(cursor, "test pure text");
            text_attempted = true;
            match scan_pure_text(cursor) {
                TextScan::Text => return Some(TokenKind::PureText),
                TextScan::ValueEnds => text_stopped = true,
                TextScan::Empty => {}
            }
        }

        if valid.accepts(TokenKind::ValueEnd) && self.state.in_value() {
            scan_trace!(cursor, "test pattern end");
            if text_stopped || (!text_attempted && blank_run_ends_value(cursor)) {
                self.state.close_value();
                cursor.mark_end();
                return Some(TokenKind::ValueEnd);
            }
        }

        if valid.accepts(TokenKind::BlankLines)
            && is_blank(cursor.lookahead())
            && (!self.config.has(Features::ANCHORED_BLANK_LINES) || cursor.column() == 0)
        {
            consume_blank_run(cursor);
            cursor.mark_end();
            return Some(TokenKind::BlankLines);
        }

        if valid.accepts(TokenKind::UnfinishedLine) && self.state.pattern_depth() >= max {
            scan_trace!(cursor, "nesting ceiling {max} reached, dropping line");
            while !cursor.is_eof() && cursor.lookahead() != '\n' {
                cursor.advance(true);
            }
            cursor.advance(true);
            cursor.mark_end();
            self.state.reset();
            return Some(TokenKind::UnfinishedLine);
        }

        if valid.accepts(TokenKind::CommentBlockClose) && is_close_comment_block(cursor) {
            return Some(TokenKind::CommentBlockClose);
        }

        if valid.accepts(TokenKind::EndPositionalArgs) && is_end_positional_args(cursor) {
            return Some(TokenKind::EndPositionalArgs);
        }

        None
    }

    /// Rule 1. Every open construct is closed by end of input.
    fn end_of_input(&mut self, valid: ValidTokens) -> Option<TokenKind> {
        if valid.accepts(TokenKind::ValueEnd) && self.state.in_value() {
            self.state.close_value();
            Some(TokenKind::ValueEnd)
        } else if valid.accepts(TokenKind::CommentBlockClose) {
            Some(TokenKind::CommentBlockClose)
        } else if valid.accepts(TokenKind::Skip) {
            Some(TokenKind::Skip)
        } else {
            None
        }
    }
}

/// Rule 4: literal text of a value.
///
/// The end is re-marked after each character and before each space run, so
/// spaces that precede a newline are left out of the text, while spaces
/// that precede `{` are kept. A newline run that continues the value is
/// folded into the text. Only `{` and a stopping blank run end the text
/// early; otherwise it extends to end of input, trailing blanks included.
fn scan_pure_text<C: ScanCursor + ?Sized>(cursor: &mut C) -> TextScan {
    let mut has_content = false;
    let end_of_text = |has_content: bool| {
        if has_content {
            TextScan::Text
        } else {
            TextScan::ValueEnds
        }
    };

    loop {
        if cursor.is_eof() {
            return end_of_text(has_content);
        }

        let mut started_with_space = false;
        if cursor.lookahead() == ' ' {
            cursor.mark_end();
            started_with_space = true;
            while cursor.lookahead() == ' ' {
                cursor.advance(true);
            }
        }

        if cursor.lookahead() == '\n' {
            if !started_with_space {
                cursor.mark_end();
            }
            let run = consume_blank_run(cursor);
            if run.stopped {
                scan_trace!(cursor, "value ends after text");
                return end_of_text(has_content);
            }
            has_content = true;
            cursor.mark_end();
        }

        if cursor.lookahead() == '{' {
            if started_with_space {
                has_content = true;
                cursor.mark_end();
            }
            scan_trace!(cursor, "break placeable start");
            return if has_content {
                TextScan::Text
            } else {
                TextScan::Empty
            };
        }

        cursor.advance(true);
        has_content = true;
        cursor.mark_end();
    }
}

/// Rule 5 when pure text was not attempted: a fresh blank run that consumes
/// something and stops ends the value.
fn blank_run_ends_value<C: ScanCursor + ?Sized>(cursor: &mut C) -> bool {
    let run = consume_blank_run(cursor);
    run.count > 0 && run.stopped
}
