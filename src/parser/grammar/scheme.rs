//! Type scheme parsers for the built-in primitives
//!
//! The arrow is right-associative, so `a -> b -> c` parses as
//! `a -> (b -> c)`. A parenthesized comma list is only meaningful as the
//! argument list of an arrow; `(a, b)` without a following `->` is
//! rejected.

use crate::ast::scheme::{SchemeExpr, TypeExpr};

use crate::parser::combinators::{
    BoxedParser, expect_arrow, expect_comma, expect_forall, expect_lbracket, expect_lparen,
    expect_rbracket, expect_rparen, many, optional,
};
use crate::parser::state::{ParseState, Parser};

use super::ident;

/// scheme := ("forall" "[" IDENT* "]")? ty
pub fn scheme() -> BoxedParser<SchemeExpr> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        let vars = if expect_forall().parse(state).is_ok() {
            (expect_lbracket() * many(ident()) - expect_rbracket()).parse(state)?
        } else {
            state.restore(pos);
            Vec::new()
        };

        let ty = ty().parse(state)?;
        Ok(SchemeExpr { vars, ty })
    })
}

/// ty := tyatom bracket* ("->" ty)?
///     | "(" ty ("," ty)* ")" ("->" ty)?
fn ty() -> BoxedParser<TypeExpr> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();

        if expect_lparen().parse(state).is_ok() {
            let first = ty().parse(state)?;
            let mut items = vec![first];
            loop {
                let p = state.position();
                if optional(expect_comma()).parse(state)?.is_some() {
                    match ty().parse(state) {
                        Ok(item) => items.push(item),
                        Err(_) => {
                            state.restore(p);
                            break;
                        }
                    }
                } else {
                    break;
                }
            }
            expect_rparen().parse(state)?;

            let p = state.position();
            if expect_arrow().parse(state).is_ok() {
                let ret = ty().parse(state)?;
                return Ok(TypeExpr::Arrow(items, Box::new(ret)));
            }
            state.restore(p);

            if items.len() == 1 {
                match items.pop() {
                    Some(item) => return Ok(item),
                    None => unreachable!(),
                }
            }
            let err = state.error_here("argument list without '->'");
            state.record_error(err.clone());
            return Err(err);
        }
        state.restore(pos);

        let mut t = (ident() >> TypeExpr::Name).parse(state)?;

        // bracket := "[" ty ("," ty)* "]"
        loop {
            let p = state.position();
            if expect_lbracket().parse(state).is_err() {
                state.restore(p);
                break;
            }
            let first = ty().parse(state)?;
            let mut args = vec![first];
            loop {
                let q = state.position();
                if optional(expect_comma()).parse(state)?.is_some() {
                    match ty().parse(state) {
                        Ok(arg) => args.push(arg),
                        Err(_) => {
                            state.restore(q);
                            break;
                        }
                    }
                } else {
                    break;
                }
            }
            expect_rbracket().parse(state)?;
            t = TypeExpr::App(Box::new(t), args);
        }

        let p = state.position();
        if expect_arrow().parse(state).is_ok() {
            let ret = ty().parse(state)?;
            return Ok(TypeExpr::Arrow(vec![t], Box::new(ret)));
        }
        state.restore(p);

        Ok(t)
    })
}
