// lexskip.rs - Pattern skip helpers.
// Jump over a set, an option or a group without evaluating it.

use crate::lexint::*;

/// Returns the index after the `}` closing the set whose body starts at
/// `p`, or `None` if the pattern ends first. `\x` and `@x` are two-byte
/// members, so neither `\}` nor `@}` closes the set.
pub fn set_close(pattern: &[u8], p: usize) -> Option<usize> {
    let mut p = p;
    while p < pattern.len() {
        match pattern[p] {
            OP_SET_CLOSE => return Some(p + 1),
            OP_ESCAPE | SET_FOLD => p += 2,
            _ => p += 1,
        }
    }
    None
}

/// Skip beyond set: index after the set body starting at `p`, or the
/// pattern length for an unterminated set.
#[inline]
pub fn skip_set(pattern: &[u8], p: usize) -> usize {
    set_close(pattern, p).unwrap_or(pattern.len())
}

/// Skip beyond block: index after the close matching the opener just
/// before `p`.
///
/// `(` and `[` open, `)`, `]` and `}` close, mirroring where the
/// interpreter itself leaves a block. Sets are skipped whole.
pub fn skip_block(pattern: &[u8], p: usize) -> usize {
    let mut depth = 1usize;
    let mut p = p;
    while p < pattern.len() {
        let b = pattern[p];
        p += 1;
        match b {
            OP_ESCAPE => p += 1,
            OP_SET_OPEN => p = skip_set(pattern, p),
            OP_GROUP_OPEN | OP_OPTION_OPEN => depth += 1,
            OP_GROUP_CLOSE | OP_OPTION_CLOSE | OP_SET_CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return p;
                }
            }
            _ => {}
        }
    }
    pattern.len()
}

/// Skip beyond option: `p` is the index after `[`.
#[inline]
pub fn skip_option(pattern: &[u8], p: usize) -> usize {
    skip_block(pattern, p)
}

/// Skip beyond group: `p` is the index after `(`.
#[inline]
pub fn skip_group(pattern: &[u8], p: usize) -> usize {
    skip_block(pattern, p)
}

/// Index after the element that starts at `p` (excluding any `+`).
pub fn element_end(pattern: &[u8], p: usize) -> usize {
    match pattern[p] {
        OP_ESCAPE => (p + 2).min(pattern.len()),
        OP_SET_OPEN => skip_set(pattern, p + 1),
        OP_GROUP_OPEN => skip_group(pattern, p + 1),
        OP_OPTION_OPEN => skip_option(pattern, p + 1),
        _ => p + 1,
    }
}

/// Index of the first byte at or after `p` that is not `b`.
#[inline]
pub fn skip_run(pattern: &[u8], p: usize, b: u8) -> usize {
    let mut p = p;
    while p < pattern.len() && pattern[p] == b {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_close_honours_escapes() {
        assert_eq!(set_close(b"{ab}x", 1), Some(4));
        assert_eq!(set_close(b"{\\}}x", 1), Some(4));
        assert_eq!(set_close(b"{@}}", 1), Some(4));
        assert_eq!(set_close(b"{ab", 1), None);
        assert_eq!(set_close(b"{a\\", 1), None);
        assert_eq!(skip_set(b"{ab", 1), 3);
    }

    #[test]
    fn option_skips_nested_blocks_and_sets() {
        let p = b"a[b{x[]}]c";
        assert_eq!(skip_option(p, 2), 9);
        let p = b"[b+[c]+]d";
        assert_eq!(skip_option(p, 1), 8);
        let p = b"[\\]+##]#+";
        assert_eq!(skip_option(p, 1), 7);
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        assert_eq!(skip_option(b"[a", 1), 2);
        assert_eq!(skip_group(b"(a{b", 1), 4);
        assert_eq!(skip_group(b"(a\\", 1), 3);
    }

    #[test]
    fn group_closes_on_first_unbalanced_close() {
        assert_eq!(skip_group(b"(a(b(c)+)+)+", 1), 11);
        assert_eq!(skip_group(b"(a]b)", 1), 3);
    }

    #[test]
    fn element_extents() {
        let p = b"a\\+{^}(x)[y]~";
        assert_eq!(element_end(p, 0), 1);
        assert_eq!(element_end(p, 1), 3);
        assert_eq!(element_end(p, 3), 6);
        assert_eq!(element_end(p, 6), 9);
        assert_eq!(element_end(p, 9), 12);
        assert_eq!(element_end(p, 12), 13);
        assert_eq!(element_end(b"\\", 0), 1);
    }

    #[test]
    fn run_skipping() {
        assert_eq!(skip_run(b"a+++b", 1, OP_PLUS), 4);
        assert_eq!(skip_run(b"~~~", 0, OP_SCAN), 3);
        assert_eq!(skip_run(b"ab", 0, OP_PLUS), 0);
    }
}
