// lexset.rs - Set evaluator.
// Decides whether one data byte belongs to a `{ ... }` set by walking the
// set body in the pattern; nothing is precomputed.

use crate::lexint::*;

/// One member token of a set body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Member {
    /// A single byte: a literal, `\x` or `@x`.
    Byte(u8),
    /// `?`: any non-ASCII byte.
    NonAscii,
    /// The closing `}`.
    Close,
    /// `\` or `@` as the last pattern byte.
    Truncated,
}

/// Reads the member at `p`; returns it with the index of the next member.
fn member_at(pattern: &[u8], p: usize) -> (Member, usize) {
    match pattern[p] {
        OP_SET_CLOSE => (Member::Close, p + 1),
        SET_NON_ASCII => (Member::NonAscii, p + 1),
        OP_ESCAPE => match pattern.get(p + 1) {
            Some(&x) => (Member::Byte(x), p + 2),
            None => (Member::Truncated, p + 1),
        },
        SET_FOLD => match pattern.get(p + 1) {
            Some(&x) => (Member::Byte(x ^ FOLD_BIT), p + 2),
            None => (Member::Truncated, p + 1),
        },
        b => (Member::Byte(b), p + 1),
    }
}

/// Upper end of a range whose `-` sits just before `p`. `?` is the literal
/// `0x3F` here, so `{0-?}` spans `'0'..='?'`.
fn range_end(pattern: &[u8], p: usize) -> Option<(u8, usize)> {
    if p >= pattern.len() {
        return None;
    }
    match member_at(pattern, p) {
        (Member::Byte(hi), next) => Some((hi, next)),
        (Member::NonAscii, next) => Some((SET_NON_ASCII, next)),
        _ => None,
    }
}

/// Tests `c` against the set whose body starts at `p` (the index after
/// `{`). A leading `^` inverts the result.
///
/// Non-ASCII bytes are members only through `?`; literals and ranges
/// match ASCII bytes alone.
pub fn set_contains(pattern: &[u8], p: usize, c: u8) -> bool {
    let exclusive = pattern.get(p) == Some(&SET_EXCLUDE);
    let body = if exclusive { p + 1 } else { p };
    body_contains(pattern, body, c) != exclusive
}

fn body_contains(pattern: &[u8], body: usize, c: u8) -> bool {
    let ascii = is_ascii(c);
    let mut p = body;
    // last single-byte member, candidate low end of a range
    let mut low: Option<u8> = None;
    while p < pattern.len() {
        let raw = pattern[p];
        let (member, next) = member_at(pattern, p);
        match member {
            Member::Close | Member::Truncated => return false,
            Member::NonAscii => {
                if !ascii {
                    return true;
                }
                low = None;
                p = next;
            }
            Member::Byte(SET_RANGE) if raw == SET_RANGE && low.is_some() => {
                match (low, range_end(pattern, next)) {
                    (Some(lo), Some((hi, after))) => {
                        if ascii && lo <= c && c <= hi {
                            return true;
                        }
                        p = after;
                    }
                    _ => {
                        if c == SET_RANGE {
                            return true;
                        }
                        p = next;
                    }
                }
                low = None;
            }
            Member::Byte(b) => {
                if ascii && b == c {
                    return true;
                }
                low = Some(b);
                p = next;
            }
        }
    }
    false
}
