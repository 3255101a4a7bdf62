//! Grammar module for camlet
//!
//! Parsing rules for the two surface languages:
//! - `expression`: the expression language (`let`, `fun`, application)
//! - `scheme`: type schemes describing the built-in primitives
//!
//! The entry points [`parse_expression`] and [`parse_scheme`] demand a
//! single complete parse; anything left in the token stream afterwards
//! is a parse error.

mod expression;
mod scheme;

pub use expression::expression;
pub use scheme::scheme;

use crate::ast::{Expression, Ident, SchemeExpr};
use crate::lexer::Token;

use super::combinators::BoxedParser;
use super::state::{ParseError, ParseResult, ParseState, Parser};

/// Parse an identifier
pub(crate) fn ident() -> BoxedParser<Ident> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Ident(_)) => {
            if let Some(Token::Ident(id)) = state.advance() {
                Ok(Ident {
                    value: id.value,
                    position: id.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("identifier")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("identifier");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a single complete expression from the token stream.
pub fn parse_expression(state: &mut ParseState) -> ParseResult<Expression> {
    match expression().parse(state) {
        Ok(expr) => {
            if state.has_next() {
                let err = state.error_here("trailing input after expression");
                return Err(err);
            }
            Ok(expr)
        }
        Err(err) => match state.furthest_error() {
            Some(furthest) => Err(furthest.clone()),
            None => Err(err),
        },
    }
}

/// Parse a single complete type scheme from the token stream.
pub fn parse_scheme(state: &mut ParseState) -> ParseResult<SchemeExpr> {
    match scheme().parse(state) {
        Ok(parsed) => {
            if state.has_next() {
                let err = state.error_here("trailing input after type scheme");
                return Err(err);
            }
            Ok(parsed)
        }
        Err(err) => match state.furthest_error() {
            Some(furthest) => Err(furthest.clone()),
            None => Err(err),
        },
    }
}
