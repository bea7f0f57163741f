// error.rs - Idiomatic Rust error type for linex.
//
// The matcher itself never fails: a mismatch is a result, not an error.
// Errors come from the API layer (pattern checks, start positions)
// and keep their numeric code for callers of the low-level functions.

use std::fmt;

use crate::lexerror::*;

/// Error type for building a [`Lex`](crate::api::Lex) and running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Blocks nest deeper than the configured limit.
    NestingLimitOver { depth: usize, limit: u32 },
    /// Matching was asked to start beyond the end of the data.
    StartOutOfRange { start: usize, len: usize },
    /// A set opened at `at` is never closed.
    UnterminatedSet { at: usize },
    /// A group or option opened at `at` is never closed.
    UnterminatedBlock { at: usize },
    /// A close at `at` has no open block.
    UnmatchedClose { at: usize },
    /// A close at `at` ends a block of the other kind.
    MismatchedClose { at: usize },
    /// Unknown error code.
    Other(i32),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = lex_error_code_to_format(self.code());
        match self {
            LexError::NestingLimitOver { depth, limit } => {
                write!(f, "{}: depth {} exceeds {}", message, depth, limit)
            }
            LexError::StartOutOfRange { start, len } => {
                write!(f, "{}: {} > {}", message, start, len)
            }
            LexError::UnterminatedSet { at }
            | LexError::UnterminatedBlock { at }
            | LexError::UnmatchedClose { at }
            | LexError::MismatchedClose { at } => {
                write!(f, "syntax error: {} at {}", message, at)
            }
            LexError::Other(code) => write!(f, "lex error (code {})", code),
        }
    }
}

impl std::error::Error for LexError {}

/// Positions are unknown when converting from a bare code and come out as 0.
impl From<i32> for LexError {
    fn from(code: i32) -> Self {
        match code {
            LEXERR_NESTING_LIMIT_OVER => LexError::NestingLimitOver { depth: 0, limit: 0 },
            LEXERR_START_OUT_OF_RANGE => LexError::StartOutOfRange { start: 0, len: 0 },
            LEXERR_UNTERMINATED_SET => LexError::UnterminatedSet { at: 0 },
            LEXERR_UNTERMINATED_BLOCK => LexError::UnterminatedBlock { at: 0 },
            LEXERR_UNMATCHED_CLOSE => LexError::UnmatchedClose { at: 0 },
            LEXERR_MISMATCHED_CLOSE => LexError::MismatchedClose { at: 0 },
            _ => LexError::Other(code),
        }
    }
}

impl LexError {
    /// Returns the numeric code of this error.
    pub fn code(&self) -> i32 {
        match self {
            LexError::NestingLimitOver { .. } => LEXERR_NESTING_LIMIT_OVER,
            LexError::StartOutOfRange { .. } => LEXERR_START_OUT_OF_RANGE,
            LexError::UnterminatedSet { .. } => LEXERR_UNTERMINATED_SET,
            LexError::UnterminatedBlock { .. } => LEXERR_UNTERMINATED_BLOCK,
            LexError::UnmatchedClose { .. } => LEXERR_UNMATCHED_CLOSE,
            LexError::MismatchedClose { .. } => LEXERR_MISMATCHED_CLOSE,
            LexError::Other(code) => *code,
        }
    }

    /// True if the error describes the pattern's structure.
    pub fn is_syntax(&self) -> bool {
        lex_is_pattern_error(self.code())
    }
}
