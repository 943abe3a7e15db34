//! Character-level predicates shared by the dispatcher rules.
//!
//! Each predicate advances the cursor as it reads. Callers that must not
//! attribute those characters to their token call `mark_end` first.

use crate::cursor::ScanCursor;

/// Characters that end a value when they begin an indented continuation line.
///
/// `.` starts an attribute, `}` closes a placeable, `[` and `*[` start a
/// select variant.
#[inline]
pub fn is_stop_marker(c: char) -> bool {
    matches!(c, '.' | '}' | '[' | '*')
}

/// Whether `c` can begin a blank run.
#[inline]
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\n')
}

/// Outcome of [`consume_blank_run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlankRun {
    /// Characters consumed.
    pub count: u32,
    /// The run ended on a line that does not continue the current value.
    pub stopped: bool,
}

/// Consume spaces, then newlines each followed by optional indentation.
///
/// The run stops (value ends) when a newline is directly followed by a
/// non-space character, including end of input, or when indentation is
/// followed by a stop marker. Indentation followed by anything else is a
/// continuation line; the run returns without stopping.
pub fn consume_blank_run<C: ScanCursor + ?Sized>(cursor: &mut C) -> BlankRun {
    let mut run = BlankRun::default();
    scan_trace!(cursor, "start consuming spaces and newlines");

    while cursor.lookahead() == ' ' {
        cursor.advance(true);
        run.count += 1;
    }

    while cursor.lookahead() == '\n' {
        cursor.advance(true);
        run.count += 1;

        match cursor.lookahead() {
            '\n' => continue,
            ' ' => {}
            c => {
                scan_trace!(cursor, "stop non space: {c:?}");
                run.stopped = true;
                return run;
            }
        }

        while cursor.lookahead() == ' ' {
            cursor.advance(true);
            run.count += 1;
        }

        let c = cursor.lookahead();
        if is_stop_marker(c) {
            scan_trace!(cursor, "stop special: {c:?}");
            run.stopped = true;
            return run;
        }
    }

    scan_trace!(cursor, "finished consuming");
    run
}

/// Consume `[A-Za-z][A-Za-z_-]*`. Returns `false` without consuming anything
/// when the lookahead is not an ASCII letter.
pub fn consume_identifier<C: ScanCursor + ?Sized>(cursor: &mut C) -> bool {
    if !cursor.lookahead().is_ascii_alphabetic() {
        return false;
    }
    cursor.advance(true);
    while matches!(cursor.lookahead(), 'a'..='z' | 'A'..='Z' | '_' | '-') {
        cursor.advance(true);
    }
    true
}

/// Decide whether a `#` comment block ends at a newline or `#`.
///
/// Marks the end before reading so the close token stays zero-width. The
/// block continues only if the next line's `#` is followed by a space.
/// Any other starting character is not a block boundary.
pub fn is_close_comment_block<C: ScanCursor + ?Sized>(cursor: &mut C) -> bool {
    let is_hash = cursor.lookahead() == '#';
    if cursor.lookahead() != '\n' && !is_hash {
        return false;
    }

    cursor.mark_end();
    cursor.advance(true);

    if !is_hash && cursor.lookahead() == '#' {
        cursor.advance(true);
    }

    cursor.lookahead() != ' '
}

/// Decide whether a call's positional arguments end here.
///
/// Ends before `)`, or at a `,` that introduces a named argument
/// (`, name:`), in which case the token absorbs the comma and the blanks
/// after it.
pub fn is_end_positional_args<C: ScanCursor + ?Sized>(cursor: &mut C) -> bool {
    cursor.mark_end();
    consume_blank_run(cursor);

    match cursor.lookahead() {
        ')' => return true,
        ',' => cursor.advance(true),
        _ => return false,
    }

    consume_blank_run(cursor);
    cursor.mark_end();

    if !consume_identifier(cursor) {
        return false;
    }

    consume_blank_run(cursor);
    cursor.lookahead() == ':'
}
