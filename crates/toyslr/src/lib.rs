//! An SLR(1) parsing engine for a small imperative toy language.
//!
//! The grammar, its First/Follow sets, the LR(0) automaton and the parse
//! table are computed once by [`Engine::new`]. Each call to
//! [`Engine::parse`] then runs a shift-reduce machine over a token stream,
//! recovering from syntax errors, and returns a [`ParseReport`] from which
//! the rightmost derivation of an accepted program can be printed.
//!
//! ```
//! let engine = toyslr::Engine::new()?;
//! let report = engine.parse_str("{ ID = NUM ; }");
//! assert!(report.is_success());
//! println!("{}", report.derivation());
//! # Ok::<(), toyslr::EngineError>(())
//! ```

pub mod config;
pub mod derivation;
pub mod diagnostic;
pub mod first_follow;
pub mod grammar;
pub mod lexer;
pub mod lr0;
pub mod parse_table;
pub mod parser;
pub mod toy;
pub mod types;

mod engine;

pub use crate::{
    config::EngineConfig,
    derivation::Derivation,
    diagnostic::{Diagnostic, EngineError},
    engine::Engine,
    lexer::{tokenize, Token},
    parser::{Outcome, ParseReport},
};
