// lexint.rs - Internal constants and byte classification.
// Opcode bytes, config defaults, the ByteClass table, the hop projection
// (`shift`) and the literal escaper.

use bitflags::bitflags;

// === Opcodes ===
pub const OP_ESCAPE: u8 = b'\\';
pub const OP_ANY: u8 = b'?';
pub const OP_NON_WHITESPACE: u8 = b'^';
pub const OP_WHITESPACE: u8 = b'_';
pub const OP_NEWLINE: u8 = b'$';
pub const OP_LETTER: u8 = b'@';
pub const OP_DIGIT: u8 = b'#';
pub const OP_SET_OPEN: u8 = b'{';
pub const OP_SET_CLOSE: u8 = b'}';
pub const OP_GROUP_OPEN: u8 = b'(';
pub const OP_GROUP_CLOSE: u8 = b')';
pub const OP_OPTION_OPEN: u8 = b'[';
pub const OP_OPTION_CLOSE: u8 = b']';
pub const OP_PLUS: u8 = b'+';
pub const OP_SCAN: u8 = b'~';
pub const OP_BOUNDARY: u8 = b'`';

// === Set body syntax ===
pub const SET_EXCLUDE: u8 = b'^';
pub const SET_RANGE: u8 = b'-';
pub const SET_FOLD: u8 = b'@';
pub const SET_NON_ASCII: u8 = b'?';
pub const FOLD_BIT: u8 = 0x40;

/// Every byte the interpreter treats as an operator.
pub const LEX_OPS: &[u8; 16] = b"()[]{}#$+@^_\\?~`";

// === Config Constants ===
pub const DEFAULT_NESTING_LIMIT: u32 = 256;
/// 0 means unlimited.
pub const DEFAULT_OPS_LIMIT: u64 = 0;

bitflags! {
    /// Static classification of a single byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ByteClass: u8 {
        /// Reserved operator byte (see [`LEX_OPS`]).
        const OP = 1 << 0;
        /// Printable ASCII literal that may take part in a hop mask.
        const MASKABLE = 1 << 1;
        /// One of `' '`, `'\t'`, `'\n'`, `'\r'`.
        const WHITESPACE = 1 << 2;
        /// `'\n'` or `'\r'`.
        const NEWLINE = 1 << 3;
        const DIGIT = 1 << 4;
        /// `A-Z` or `a-z`.
        const LETTER = 1 << 5;
        /// `)`, `]` or `}`.
        const BLOCK_CLOSE = 1 << 6;
    }
}

const fn is_op_byte(b: u8) -> bool {
    let mut i = 0;
    while i < LEX_OPS.len() {
        if LEX_OPS[i] == b {
            return true;
        }
        i += 1;
    }
    false
}

const fn classify(b: u8) -> ByteClass {
    let mut bits = 0u8;
    let op = is_op_byte(b);
    if op {
        bits |= ByteClass::OP.bits();
    } else if b >= 32 && b < 127 {
        bits |= ByteClass::MASKABLE.bits();
    }
    if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
        bits |= ByteClass::WHITESPACE.bits();
    }
    if b == b'\n' || b == b'\r' {
        bits |= ByteClass::NEWLINE.bits();
    }
    if b.wrapping_sub(b'0') < 10 {
        bits |= ByteClass::DIGIT.bits();
    }
    // range test: (unsigned)(x - lower) < span
    if (b & 0xDF).wrapping_sub(b'A') < 26 {
        bits |= ByteClass::LETTER.bits();
    }
    if b == OP_GROUP_CLOSE || b == OP_OPTION_CLOSE || b == OP_SET_CLOSE {
        bits |= ByteClass::BLOCK_CLOSE.bits();
    }
    ByteClass::from_bits_retain(bits)
}

const fn build_class_table() -> [ByteClass; 256] {
    let mut table = [ByteClass::empty(); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
}

static BYTE_CLASS: [ByteClass; 256] = build_class_table();

#[inline]
pub fn byte_class(b: u8) -> ByteClass {
    BYTE_CLASS[b as usize]
}

/// True iff `b` is one of the reserved operator bytes `()[]{}#$+@^_\?~``.
#[inline]
pub fn is_op(b: u8) -> bool {
    byte_class(b).contains(ByteClass::OP)
}

/// True iff `b` is a printable ASCII byte that is not an operator.
#[inline]
pub fn is_maskable(b: u8) -> bool {
    byte_class(b).contains(ByteClass::MASKABLE)
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    byte_class(b).contains(ByteClass::WHITESPACE)
}

#[inline]
pub fn is_newline(b: u8) -> bool {
    byte_class(b).contains(ByteClass::NEWLINE)
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    byte_class(b).contains(ByteClass::DIGIT)
}

#[inline]
pub fn is_letter(b: u8) -> bool {
    byte_class(b).contains(ByteClass::LETTER)
}

#[inline]
pub fn is_block_close(b: u8) -> bool {
    byte_class(b).contains(ByteClass::BLOCK_CLOSE)
}

#[inline]
pub fn is_ascii(b: u8) -> bool {
    b < 0x80
}

/// Projects a byte onto a bit index of a 64-bit hop mask.
///
/// Printable ASCII 32..=95 maps to 0..=63; 96..=127 is case-folded onto
/// the upper half. Other bytes wrap into the same range, which only costs
/// a false candidate.
#[inline]
pub fn shift(b: u8) -> u32 {
    let folded = if b >= b'`' { b & 0xDF } else { b };
    (folded.wrapping_sub(32) & 63) as u32
}

/// Builds the hop mask for a run of bytes.
pub fn mask_of(run: &[u8]) -> u64 {
    run.iter().fold(0u64, |mask, &b| mask | (1u64 << shift(b)))
}

/// Returns a pattern that matches `literal` byte for byte: every operator
/// byte is prefixed with `\`.
pub fn escape(literal: &[u8]) -> Vec<u8> {
    let ops = literal.iter().filter(|&&b| is_op(b)).count();
    let mut out = Vec::with_capacity(literal.len() + ops);
    for &b in literal {
        if is_op(b) {
            out.push(OP_ESCAPE);
        }
        out.push(b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_are_not_maskable() {
        for &b in LEX_OPS.iter() {
            assert!(is_op(b), "{:?} must be an op", b as char);
            assert!(!is_maskable(b), "{:?} must not be maskable", b as char);
        }
    }

    #[test]
    fn op_count_matches_table() {
        let count = (0u8..=255).filter(|&b| is_op(b)).count();
        assert_eq!(count, LEX_OPS.len());
    }

    #[test]
    fn printable_ascii_is_partitioned() {
        for b in 32u8..127 {
            assert!(is_op(b) != is_maskable(b), "byte {}", b);
        }
    }

    #[test]
    fn literals_are_maskable() {
        for &b in b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ<> " {
            assert!(is_maskable(b));
        }
        for b in [0u8, 31, 127, 0x80, 0xFF] {
            assert!(!is_maskable(b));
        }
    }

    #[test]
    fn letter_and_digit_classes() {
        assert!(is_letter(b'a') && is_letter(b'Z'));
        for b in [b'@', b'[', b'`', b'{', b'0', 0xC3] {
            assert!(!is_letter(b), "byte {}", b);
        }
        assert!(is_digit(b'0') && is_digit(b'9'));
        assert!(!is_digit(b'/') && !is_digit(b':'));
        assert!(is_whitespace(b'\t') && !is_whitespace(b'x'));
        assert!(is_newline(b'\r') && !is_newline(b' '));
    }

    #[test]
    fn shift_stays_in_mask_range() {
        for b in 0u8..=255 {
            assert!(shift(b) < 64);
        }
        assert_eq!(shift(b' '), 0);
        assert_eq!(shift(b'_'), 63);
        assert_eq!(shift(b'a'), shift(b'A'));
        assert_eq!(shift(b'~'), shift(b'^'));
    }

    #[test]
    fn mask_sets_one_bit_per_folded_byte() {
        let mask = mask_of(b"Huck");
        assert_eq!(mask.count_ones(), 4);
        assert_ne!(mask & (1u64 << shift(b'h')), 0);
        assert_eq!(mask & (1u64 << shift(b'x')), 0);
    }

    #[test]
    fn escape_prefixes_ops() {
        assert_eq!(escape(b"a+b"), b"a\\+b".to_vec());
        assert_eq!(escape(b"`x`"), b"\\`x\\`".to_vec());
        assert_eq!(escape(b"plain"), b"plain".to_vec());
        assert!(escape(b"").is_empty());
    }
}
