//! Surface AST for camlet
//!
//! The AST comes in two halves, mirroring the two surface grammars:
//!
//! - [`expression`] - the expression language fed to type inference
//!   (identifiers, lambdas, applications, let bindings)
//! - [`scheme`] - type scheme syntax used to describe the built-in
//!   primitives (`forall[a] list[a] -> a`)
//!
//! Both are immutable once parsed; the inference engine never rewrites
//! expression nodes.

pub mod expression;
pub mod scheme;

pub use expression::*;
pub use scheme::*;
