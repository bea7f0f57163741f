// api.rs - Idiomatic Rust API for linex.
//
// Wraps the low-level entry points (lex_match_with, check_pattern) with
// Rust-native types: Lex, LexBuilder, Match, FindIter.

use std::iter::FusedIterator;
use std::ops::Range;

use log::debug;

use crate::error::LexError;
use crate::lexcheck::check_pattern;
use crate::lexexec::{lex_match_with, LexResult, MatchParam};
use crate::lexint::escape;
use crate::report::Report;

/// A checked pattern.
///
/// Matching is anchored: a pattern always runs from its start against the
/// data at the given position.
///
/// # Examples
///
/// ```
/// use linex::api::Lex;
///
/// let lex = Lex::new("#+[.#+]").unwrap();
/// assert!(lex.is_match("12.95"));
///
/// let m = lex.match_at(b"x 12.95 y", 2).unwrap();
/// assert_eq!(m.as_bytes(), b"12.95");
/// assert_eq!(m.start(), 2);
/// assert_eq!(m.end(), 7);
/// ```
#[derive(Clone)]
pub struct Lex {
    pattern: Vec<u8>,
    param: MatchParam,
}

impl Lex {
    /// Check a pattern with the global limits, accepting broken structure.
    pub fn new(pattern: &str) -> Result<Lex, LexError> {
        Self::new_bytes(pattern.as_bytes())
    }

    /// Check a pattern given as raw bytes.
    pub fn new_bytes(pattern: &[u8]) -> Result<Lex, LexError> {
        LexBuilder::new_bytes(pattern).build()
    }

    /// A pattern matching `literal` byte for byte.
    pub fn escaped(literal: &[u8]) -> Lex {
        Lex {
            pattern: escape(literal),
            param: MatchParam::default(),
        }
    }

    /// Create a [`LexBuilder`] for per-pattern limits.
    pub fn builder(pattern: &str) -> LexBuilder {
        LexBuilder::new(pattern)
    }

    /// The pattern bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pattern
    }

    /// Run the pattern against `data` from `start` and return the raw
    /// result.
    pub fn exec(&self, data: &[u8], start: usize) -> Result<LexResult, LexError> {
        if start > data.len() {
            return Err(LexError::StartOutOfRange {
                start,
                len: data.len(),
            });
        }
        Ok(lex_match_with(&self.pattern, 0, data, start, &self.param))
    }

    /// Match at `start`, or `None` on mismatch or an out-of-range start.
    pub fn match_at<'t>(&self, data: &'t [u8], start: usize) -> Option<Match<'t>> {
        let result = self.exec(data, start).ok()?;
        let end = result.data_end()?;
        Some(Match {
            data,
            start,
            end,
            pattern_end: result.pn,
        })
    }

    /// Check whether `data` matches at its start.
    pub fn is_match(&self, data: &str) -> bool {
        self.is_match_bytes(data.as_bytes())
    }

    /// Check whether `data` (as bytes) matches at its start.
    pub fn is_match_bytes(&self, data: &[u8]) -> bool {
        self.match_at(data, 0).is_some()
    }

    /// Apply the pattern repeatedly, each time from the end of the
    /// previous match.
    pub fn find_iter<'r, 't>(&'r self, data: &'t str) -> FindIter<'r, 't> {
        self.find_iter_bytes(data.as_bytes())
    }

    /// Apply the pattern repeatedly to `data` (as bytes).
    pub fn find_iter_bytes<'r, 't>(&'r self, data: &'t [u8]) -> FindIter<'r, 't> {
        FindIter {
            lex: self,
            data,
            next_start: 0,
            done: false,
        }
    }

    /// Match at the start of `data` and describe the result.
    pub fn report<'a>(&'a self, data: &'a [u8]) -> Report<'a> {
        let result = lex_match_with(&self.pattern, 0, data, 0, &self.param);
        Report::new(&self.pattern, data, result)
    }
}

impl std::fmt::Debug for Lex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lex")
            .field("pattern", &self.pattern.escape_ascii().to_string())
            .finish_non_exhaustive()
    }
}

// === LexBuilder ===

/// Builder for a [`Lex`] with its own limits.
///
/// # Examples
///
/// ```
/// use linex::api::Lex;
///
/// let lex = Lex::builder("(a(b)").strict(true).build();
/// assert!(lex.is_err());
///
/// let lex = Lex::builder("abc").max_ops(2).build().unwrap();
/// assert_eq!(lex.exec(b"abx", 0).unwrap().dn, 2);
/// ```
pub struct LexBuilder {
    pattern: Vec<u8>,
    param: MatchParam,
    strict: bool,
}

impl LexBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> Self {
        Self::new_bytes(pattern.as_bytes())
    }

    pub fn new_bytes(pattern: &[u8]) -> Self {
        LexBuilder {
            pattern: pattern.to_vec(),
            param: MatchParam::default(),
            strict: false,
        }
    }

    /// Limit the elements a match dispatches at the top level; 0 means
    /// unlimited.
    pub fn max_ops(mut self, n: usize) -> Self {
        self.param.max_ops = (n != 0).then_some(n);
        self
    }

    /// Deepest block nesting accepted and entered.
    pub fn nesting_limit(mut self, n: u32) -> Self {
        self.param.nesting_limit = n;
        self
    }

    /// Enable or disable rejection of unterminated sets and blocks and of
    /// stray closes.
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Check the pattern and produce a [`Lex`].
    pub fn build(self) -> Result<Lex, LexError> {
        check_pattern(&self.pattern, self.param.nesting_limit, self.strict)?;
        Ok(Lex {
            pattern: self.pattern,
            param: self.param,
        })
    }
}

// === Match ===

/// A successful match referencing the original data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'t> {
    data: &'t [u8],
    start: usize,
    end: usize,
    pattern_end: usize,
}

impl<'t> Match<'t> {
    /// Byte offset where matching started.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset after the last consumed byte.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched bytes.
    pub fn as_bytes(&self) -> &'t [u8] {
        &self.data[self.start..self.end]
    }

    /// The matched bytes as a `&str`, or `None` if they are not UTF-8.
    pub fn as_str(&self) -> Option<&'t str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// Pattern position where matching stopped.
    pub fn pattern_end(&self) -> usize {
        self.pattern_end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// === FindIter ===

/// Iterator over back-to-back matches. Ends at the first mismatch, at the
/// data end or after a zero-width match.
pub struct FindIter<'r, 't> {
    lex: &'r Lex,
    data: &'t [u8],
    next_start: usize,
    done: bool,
}

impl<'r, 't> Iterator for FindIter<'r, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        if self.done || self.next_start >= self.data.len() {
            return None;
        }
        let m = match self.lex.match_at(self.data, self.next_start) {
            Some(m) => m,
            None => {
                self.done = true;
                return None;
            }
        };
        if m.is_empty() {
            debug!("find_iter: zero-width match at {}, stopping", m.start());
            self.done = true;
        }
        self.next_start = m.end();
        Some(m)
    }
}

impl FusedIterator for FindIter<'_, '_> {}
