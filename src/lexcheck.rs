// lexcheck.rs - Structural pattern checks.
//
// The matcher accepts any byte sequence. These checks run once when a
// `Lex` is built: the nesting depth is always bounded, while unterminated
// sets and blocks and stray closes are rejected in strict mode only.

use log::debug;
use smallvec::SmallVec;

use crate::error::LexError;
use crate::lexint::*;
use crate::lexskip::set_close;

fn closer_of(open: u8) -> u8 {
    if open == OP_GROUP_OPEN {
        OP_GROUP_CLOSE
    } else {
        OP_OPTION_CLOSE
    }
}

/// Checks the block structure of `pattern`.
///
/// Depth counts open groups and options the same way the matcher counts
/// entered blocks, so a pattern passing with `nesting_limit` never hits
/// the runtime guard.
pub fn check_pattern(pattern: &[u8], nesting_limit: u32, strict: bool) -> Result<(), LexError> {
    let result = check_blocks(pattern, nesting_limit, strict);
    if let Err(err) = &result {
        debug!("rejected pattern \"{}\": {}", pattern.escape_ascii(), err);
    }
    result
}

fn check_blocks(pattern: &[u8], nesting_limit: u32, strict: bool) -> Result<(), LexError> {
    // (opener, index)
    let mut open: SmallVec<[(u8, usize); 16]> = SmallVec::new();
    let mut p = 0;
    while p < pattern.len() {
        let b = pattern[p];
        match b {
            OP_ESCAPE => {
                p += 2;
                continue;
            }
            OP_SET_OPEN => match set_close(pattern, p + 1) {
                Some(end) => {
                    p = end;
                    continue;
                }
                // the rest is set body
                None if strict => return Err(LexError::UnterminatedSet { at: p }),
                None => return Ok(()),
            },
            OP_GROUP_OPEN | OP_OPTION_OPEN => {
                open.push((b, p));
                if open.len() > nesting_limit as usize {
                    return Err(LexError::NestingLimitOver {
                        depth: open.len(),
                        limit: nesting_limit,
                    });
                }
            }
            OP_GROUP_CLOSE | OP_OPTION_CLOSE | OP_SET_CLOSE => match open.pop() {
                None if strict => return Err(LexError::UnmatchedClose { at: p }),
                None => {}
                Some((opener, _)) => {
                    if strict && closer_of(opener) != b {
                        return Err(LexError::MismatchedClose { at: p });
                    }
                }
            },
            _ => {}
        }
        p += 1;
    }
    match open.last() {
        Some(&(_, at)) if strict => Err(LexError::UnterminatedBlock { at }),
        _ => Ok(()),
    }
}
