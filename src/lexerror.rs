// lexerror.rs - Result and error codes with their messages.
//
// Codes are negative like the mismatch sentinel; `LEX_MISMATCH` is the
// sentinel of a mismatch at data position 0.

pub const LEX_NORMAL: i32 = 0;
pub const LEX_MISMATCH: i32 = -1;

pub const LEXERR_START_OUT_OF_RANGE: i32 = -31;
pub const LEXERR_NESTING_LIMIT_OVER: i32 = -16;

// Pattern structure (only reported by strict builds)
pub const LEXERR_UNTERMINATED_SET: i32 = -100;
pub const LEXERR_UNTERMINATED_BLOCK: i32 = -101;
pub const LEXERR_UNMATCHED_CLOSE: i32 = -102;
pub const LEXERR_MISMATCHED_CLOSE: i32 = -103;

/// Get the message for a code.
pub fn lex_error_code_to_format(code: i32) -> &'static str {
    match code {
        LEX_NORMAL => "success",
        LEX_MISMATCH => "mismatch",
        LEXERR_START_OUT_OF_RANGE => "start position out of range",
        LEXERR_NESTING_LIMIT_OVER => "nesting limit over",
        LEXERR_UNTERMINATED_SET => "end pattern in set",
        LEXERR_UNTERMINATED_BLOCK => "end pattern in group or option",
        LEXERR_UNMATCHED_CLOSE => "unmatched close",
        LEXERR_MISMATCHED_CLOSE => "close does not match its open",
        _ => "undefined error code",
    }
}

/// True for codes describing the pattern's structure.
pub fn lex_is_pattern_error(code: i32) -> bool {
    (-199..=-100).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_messages() {
        for code in [
            LEX_MISMATCH,
            LEXERR_START_OUT_OF_RANGE,
            LEXERR_NESTING_LIMIT_OVER,
            LEXERR_UNTERMINATED_SET,
            LEXERR_UNTERMINATED_BLOCK,
            LEXERR_UNMATCHED_CLOSE,
            LEXERR_MISMATCHED_CLOSE,
        ] {
            assert_ne!(lex_error_code_to_format(code), "undefined error code");
        }
        assert_eq!(lex_error_code_to_format(-9999), "undefined error code");
    }

    #[test]
    fn pattern_error_range() {
        assert!(lex_is_pattern_error(LEXERR_UNTERMINATED_SET));
        assert!(lex_is_pattern_error(LEXERR_MISMATCHED_CLOSE));
        assert!(!lex_is_pattern_error(LEXERR_NESTING_LIMIT_OVER));
        assert!(!lex_is_pattern_error(LEX_MISMATCH));
    }
}
