// prelude.rs - Convenient re-exports for the idiomatic API.
//
//! # Prelude
//!
//! ```
//! use linex::prelude::*;
//!
//! let lex = Lex::new("~(Huck)").unwrap();
//! let m = lex.match_at(b"Tom and Huck", 0).unwrap();
//! assert_eq!(m.end(), 12);
//! ```

pub use crate::api::{FindIter, Lex, LexBuilder, Match};
pub use crate::error::LexError;
pub use crate::lexexec::{mismatch, LexResult};
pub use crate::report::Report;
