// lexexec.rs - Pattern interpreter.
// Interpreter loop, `+` retry, `~` scan driver, result encoding and the
// entry points lex_match / lex_match_ops / lex_match_with.
//
// The pattern bytes are the program: every step reads the opcode at the
// pattern cursor and consumes data, enters a block or scans. Nothing is
// compiled and nothing is allocated.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use log::trace;

use crate::lexhop::Hop;
use crate::lexint::*;
use crate::lexset::set_contains;
use crate::lexskip::{element_end, skip_run};

// ============================================================================
// Global Limits
// ============================================================================

static NESTING_LIMIT: AtomicU32 = AtomicU32::new(DEFAULT_NESTING_LIMIT);
static OPS_LIMIT: AtomicU64 = AtomicU64::new(DEFAULT_OPS_LIMIT);

pub fn lex_set_nesting_limit(n: u32) { NESTING_LIMIT.store(n, Ordering::Relaxed); }
pub fn lex_get_nesting_limit() -> u32 { NESTING_LIMIT.load(Ordering::Relaxed) }
pub fn lex_set_ops_limit(n: u64) { OPS_LIMIT.store(n, Ordering::Relaxed); }
pub fn lex_get_ops_limit() -> u64 { OPS_LIMIT.load(Ordering::Relaxed) }

// ============================================================================
// Results
// ============================================================================

/// Mismatch encoding `-pos - 1`. Applying it twice gives `pos` back.
#[inline]
pub const fn mismatch(pos: isize) -> isize {
    !pos
}

/// End positions of a match or mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LexResult {
    /// Next position in the pattern. On mismatch, the failing opcode.
    pub pn: usize,
    /// Next position in the data, or `mismatch(position)` of the first
    /// offending data byte.
    pub dn: isize,
}

impl LexResult {
    #[inline]
    pub fn matched(pn: usize, dn: usize) -> Self {
        LexResult { pn, dn: dn as isize }
    }

    #[inline]
    pub fn mismatched(pn: usize, at: usize) -> Self {
        LexResult { pn, dn: mismatch(at as isize) }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        self.dn >= 0
    }

    /// Data position after the match, `None` on mismatch.
    pub fn data_end(&self) -> Option<usize> {
        self.is_match().then_some(self.dn as usize)
    }

    /// Data position of the first offending byte, `None` on success.
    pub fn mismatch_at(&self) -> Option<usize> {
        (!self.is_match()).then(|| mismatch(self.dn) as usize)
    }

    /// Packs into one word: `pn` in the high half, `dn` in the low half.
    /// `None` if `pn` does not fit in 32 bits or `dn` in a signed 32-bit
    /// value.
    pub fn pack(&self) -> Option<u64> {
        let pn = u32::try_from(self.pn).ok()?;
        let dn = i32::try_from(self.dn).ok()?;
        Some((u64::from(pn) << 32) | u64::from(dn as u32))
    }

    pub fn unpack(word: u64) -> LexResult {
        LexResult {
            pn: (word >> 32) as usize,
            dn: word as u32 as i32 as isize,
        }
    }
}

/// Per-call parameters; defaults come from the global limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchParam {
    /// Elements the top-level block may dispatch; `None` is unlimited.
    pub max_ops: Option<usize>,
    /// Deepest block the matcher enters.
    pub nesting_limit: u32,
}

impl Default for MatchParam {
    fn default() -> Self {
        let ops = lex_get_ops_limit();
        MatchParam {
            max_ops: (ops != 0).then_some(ops as usize),
            nesting_limit: lex_get_nesting_limit(),
        }
    }
}

// ============================================================================
// Interpreter
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Continue at pattern `p`, data `d`.
    Next { p: usize, d: usize },
    /// Data byte `d` failed the opcode at `p`.
    Fail { p: usize, d: usize },
    /// A boundary ended the whole match.
    Halt { p: usize, d: usize },
}

impl From<Step> for LexResult {
    fn from(step: Step) -> Self {
        match step {
            Step::Next { p, d } | Step::Halt { p, d } => LexResult::matched(p, d),
            Step::Fail { p, d } => LexResult::mismatched(p, d),
        }
    }
}

struct Matcher<'a> {
    pattern: &'a [u8],
    data: &'a [u8],
    depth: u32,
    nesting_limit: u32,
}

impl<'a> Matcher<'a> {
    /// Runs the block starting at `p0` until its close, the pattern end,
    /// a boundary, the data end or the `ops` budget.
    fn block(&mut self, p0: usize, d0: usize, mut ops: Option<usize>) -> Step {
        let pattern = self.pattern;
        let mut p = p0;
        let mut d = d0;
        while p < pattern.len() {
            let op = pattern[p];
            if is_block_close(op) {
                return Step::Next { p: p + 1, d };
            }
            if op == OP_BOUNDARY {
                if p == p0 {
                    p += 1;
                    continue;
                }
                return Step::Halt { p: p + 1, d };
            }
            if d >= self.data.len() {
                break;
            }
            if let Some(n) = ops.as_mut() {
                if *n == 0 {
                    break;
                }
                *n -= 1;
            }
            match op {
                // nothing to repeat
                OP_PLUS => p += 1,
                OP_SCAN => match self.scan(p, d) {
                    Step::Next { p: np, d: nd } => {
                        p = np;
                        d = nd;
                    }
                    other => return other,
                },
                _ => {
                    let end = element_end(pattern, p);
                    match self.element(p, end, d) {
                        Step::Next { d: nd, .. } => d = nd,
                        other => return other,
                    }
                    if pattern.get(end) == Some(&OP_PLUS) {
                        match self.retry(p, end, d) {
                            Step::Next { p: np, d: nd } => {
                                p = np;
                                d = nd;
                            }
                            other => return other,
                        }
                    } else {
                        p = end;
                    }
                }
            }
        }
        Step::Next { p, d }
    }

    /// Matches the element `p..end` once at `d` (`d` is in the data).
    fn element(&mut self, p: usize, end: usize, d: usize) -> Step {
        let pattern = self.pattern;
        let c = self.data[d];
        let hit = match pattern[p] {
            OP_ANY => true,
            OP_NON_WHITESPACE => !is_whitespace(c),
            OP_WHITESPACE => is_whitespace(c),
            OP_NEWLINE => is_newline(c),
            OP_LETTER => is_letter(c),
            OP_DIGIT => is_digit(c),
            OP_ESCAPE => c == pattern.get(p + 1).copied().unwrap_or(OP_ESCAPE),
            OP_SET_OPEN => set_contains(pattern, p + 1, c),
            OP_GROUP_OPEN => return self.enter(p, end, d, false),
            OP_OPTION_OPEN => return self.enter(p, end, d, true),
            literal => literal == c,
        };
        if hit {
            Step::Next { p: end, d: d + 1 }
        } else {
            Step::Fail { p, d }
        }
    }

    /// Runs the body of the group or option opened at `p`. An option that
    /// fails matches nothing and continues after its close.
    fn enter(&mut self, p: usize, end: usize, d: usize, optional: bool) -> Step {
        let step = if self.depth >= self.nesting_limit {
            Step::Fail { p, d }
        } else {
            self.depth += 1;
            let step = self.block(p + 1, d, None);
            self.depth -= 1;
            step
        };
        match step {
            Step::Next { d: nd, .. } => Step::Next { p: end, d: nd },
            Step::Fail { .. } if optional => Step::Next { p: end, d },
            other => other,
        }
    }

    /// `+`: repeats the element `p..end` (already matched once) until it
    /// fails, stops advancing or runs out of data. Ends past the `+` run.
    fn retry(&mut self, p: usize, end: usize, d: usize) -> Step {
        let mut d = d;
        while d < self.data.len() {
            match self.element(p, end, d) {
                Step::Next { d: nd, .. } if nd > d => d = nd,
                halt @ Step::Halt { .. } => return halt,
                _ => break,
            }
        }
        Step::Next {
            p: skip_run(self.pattern, end, OP_PLUS),
            d,
        }
    }

    /// `~` at `p`: finds the first data position where the following
    /// element matches and continues there. Consecutive `~` act as one.
    fn scan(&mut self, p: usize, d0: usize) -> Step {
        let pattern = self.pattern;
        let target = skip_run(pattern, p, OP_SCAN);
        match pattern.get(target) {
            None => return Step::Next { p: target, d: d0 },
            Some(&b) if is_block_close(b) => return Step::Next { p: target, d: d0 },
            _ => {}
        }
        let hop = Hop::for_element(pattern, target);
        if let Some(hop) = &hop {
            trace!("scan at {}: hop over \"{}\"", d0, hop.run().escape_ascii());
        }
        let len = self.data.len();
        let mut d = d0;
        while d < len {
            if let Some(hop) = &hop {
                d = hop.next(self.data, d);
                if d >= len {
                    break;
                }
            }
            // probe the first element only
            match self.block(target, d, Some(1)) {
                Step::Fail { .. } => d += 1,
                _ => return Step::Next { p: target, d },
            }
        }
        Step::Fail { p, d: d0 }
    }
}

/// True if the opcode at `p` needs a data byte to succeed. A `~` run
/// with nothing after it in its block scans for nothing.
fn consumes(pattern: &[u8], p: usize) -> bool {
    match pattern.get(p).copied() {
        None | Some(OP_OPTION_OPEN | OP_BOUNDARY | OP_PLUS) => false,
        Some(op) if is_block_close(op) => false,
        Some(OP_SCAN) => pattern
            .get(skip_run(pattern, p, OP_SCAN))
            .is_some_and(|&op| !is_block_close(op)),
        Some(_) => true,
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Matches `pattern` from `p0` against `data` from `d0` with the global
/// limits.
///
/// A leading `` ` `` is a no-op; any later one ends the match. Running out
/// of data part way through the pattern is a success at the data end,
/// but a pattern whose first opcode needs data fails when no data is left.
///
/// # Examples
///
/// ```
/// use linex::lexexec::{lex_match, mismatch};
///
/// let r = lex_match(b"`####/##/##`", 0, b"1950/05/12", 0);
/// assert_eq!(r.dn, 10);
///
/// let r = lex_match(b"`{^b-fgx-y}`", 0, b"b", 0);
/// assert_eq!(r.dn, mismatch(0));
/// ```
pub fn lex_match(pattern: &[u8], p0: usize, data: &[u8], d0: usize) -> LexResult {
    lex_match_with(pattern, p0, data, d0, &MatchParam::default())
}

/// Like [`lex_match`] but dispatches at most `max_ops` top-level elements.
/// On exhaustion the current positions are returned, not a mismatch.
pub fn lex_match_ops(
    pattern: &[u8],
    p0: usize,
    data: &[u8],
    d0: usize,
    max_ops: Option<usize>,
) -> LexResult {
    let param = MatchParam {
        max_ops,
        ..MatchParam::default()
    };
    lex_match_with(pattern, p0, data, d0, &param)
}

/// Like [`lex_match`] with explicit limits. A `d0` past the data is taken
/// as the data end.
pub fn lex_match_with(
    pattern: &[u8],
    p0: usize,
    data: &[u8],
    d0: usize,
    param: &MatchParam,
) -> LexResult {
    let p0 = p0.min(pattern.len());
    let d0 = d0.min(data.len());
    let first = if pattern.get(p0) == Some(&OP_BOUNDARY) { p0 + 1 } else { p0 };
    if d0 == data.len() && param.max_ops != Some(0) && consumes(pattern, first) {
        return LexResult::mismatched(first, d0);
    }
    let mut matcher = Matcher {
        pattern,
        data,
        depth: 0,
        nesting_limit: param.nesting_limit,
    };
    matcher.block(p0, d0, param.max_ops).into()
}
