//! Parser combinators and grammar for camlet
//!
//! The parser is a backtracking combinator parser over the token stream
//! produced by the lexer. [`state`] holds the mutable parse state
//! (position, furthest-error tracking), [`combinators`] the generic
//! combinator machinery, and [`grammar`] the actual expression and type
//! scheme grammars.
//!
//! Alternatives are tried in order and the first successful parse wins;
//! a failed alternative restores the saved position before the next one
//! runs.

pub mod combinators;
pub mod grammar;
pub mod state;

pub use combinators::*;
pub use grammar::*;
pub use state::*;
