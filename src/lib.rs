//! camlet - Hindley-Milner type inference for a tiny ML-like language
//!
//! This library lexes and parses a small expression language (`let`,
//! `fun`, multi-argument application), infers principal types with a
//! level-based generalization algorithm, and prints them in a canonical
//! schematic form.

pub mod ast;
pub mod core;
pub mod fmt;
pub mod lexer;
pub mod parser;
pub mod types;
