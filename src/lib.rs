//! # Linex
//!
//! Linear pattern matching without compilation: the pattern bytes are
//! interpreted directly against the data, one pass, no backtracking into
//! earlier data. Scans over literal runs are accelerated with a 64-bit
//! byte mask and [`memchr`](https://crates.io/crates/memchr).
//!
//! ## Quick Start
//!
//! ```rust
//! use linex::prelude::*;
//!
//! let lex = Lex::new("####/##/##").unwrap();
//! assert!(lex.is_match("1950/05/12"));
//!
//! let m = lex.match_at(b"born 1950/05/12", 5).unwrap();
//! assert_eq!(m.range(), 5..15);
//! ```
//!
//! For per-pattern limits and strict structure checks, use [`LexBuilder`](api::LexBuilder):
//!
//! ```rust
//! use linex::prelude::*;
//!
//! let lex = Lex::builder("`{^ }+`")
//!     .max_ops(64)
//!     .strict(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(lex.exec(b"word rest", 0).unwrap().dn, 4);
//! ```
//!
//! ## Low-Level API
//!
//! The interpreter takes and returns raw positions. A negative data
//! position encodes a mismatch at `mismatch(dn)`:
//!
//! ```rust
//! use linex::lexexec::{lex_match, mismatch};
//!
//! let r = lex_match(b"`ab#`", 0, b"abx", 0);
//! assert!(!r.is_match());
//! assert_eq!(mismatch(r.dn), 2);
//! assert_eq!(r.pn, 3);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`lexint`] | Opcodes, byte classes and limits |
//! | [`lexskip`] | Skipping sets, groups and options |
//! | [`lexset`] | Set membership |
//! | [`lexhop`] | Scan accelerator |
//! | [`lexexec`] | Interpreter and entry points |
//! | [`lexcheck`] | Structural pattern checks |
//! | [`lexerror`] | Error codes and messages |
//! | [`report`] | Result rendering |

pub mod api;
pub mod error;
pub mod lexcheck;
pub mod lexerror;
pub mod lexexec;
pub mod lexhop;
pub mod lexint;
pub mod lexset;
pub mod lexskip;
pub mod prelude;
pub mod report;
