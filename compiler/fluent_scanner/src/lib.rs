//! Context-sensitive external scanner for the Fluent localization grammar.
//!
//! The grammar engine handles everything it can express with regular and
//! context-free rules. This crate answers the questions it cannot:
//!
//! - does an indented continuation line extend the current value or end it?
//! - does a `#` comment block close here?
//! - has a call's positional-argument list ended (before a `name:` argument)?
//! - how to make progress on input whose values never dedent?
//!
//! The engine calls [`Scanner::scan`] once per lexical decision point with the
//! set of token kinds it would accept. The scanner reads characters through a
//! [`ScanCursor`], commits an end offset with `mark_end`, and reports the token
//! kind, or `None` when no context-sensitive token applies.
//!
//! # Crate Layout
//!
//! - [`token`]: token-kind ordinals and the acceptable-kind mask
//! - [`config`]: nesting ceiling and optional rule set
//! - [`state`]: persistent state and its fixed-width encoding
//! - [`cursor`]: the cursor capability and an in-memory implementation
//! - [`classify`]: blank-run, identifier, comment-close and argument predicates
//! - [`scanner`]: the priority-ordered dispatcher
//! - [`session`]: reference host that commits tokens and takes snapshots

/// Send a formatted trace line to the cursor's log sink.
///
/// Compiles to a constant-false branch without the `trace` feature.
macro_rules! scan_trace {
    ($cursor:expr, $($arg:tt)+) => {
        if cfg!(feature = "trace") {
            $crate::cursor::ScanCursor::log(&mut *$cursor, format_args!($($arg)+));
        }
    };
}

pub mod classify;
pub mod config;
pub mod cursor;
pub mod scanner;
pub mod session;
pub mod source_buffer;
pub mod state;
pub mod token;

pub use config::{Features, ScannerConfig, MAX_NESTED_PATTERNS};
pub use cursor::{ScanCursor, SourceCursor};
pub use scanner::Scanner;
pub use session::{ScanSession, Snapshot};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use state::{ScannerState, StateError};
pub use token::{Token, TokenKind, ValidTokens};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for scanner diagnostics.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=fluent_scanner=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the embedding program.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
