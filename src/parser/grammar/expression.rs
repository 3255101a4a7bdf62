//! Expression parsers for the camlet language

use crate::ast::expression::{Expression, FunctionCall, Lambda, Let};

use crate::parser::combinators::{
    BoxedParser, expect_arrow, expect_comma, expect_equals, expect_fun, expect_in, expect_let,
    expect_lparen, expect_rparen, many, optional,
};
use crate::parser::state::{ParseState, Parser};

use super::ident;

/// expr := let | fun | app
pub fn expression() -> BoxedParser<Expression> {
    let_binding() | lambda() | application()
}

/// let := "let" IDENT "=" expr "in" expr
fn let_binding() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_let().parse(state)?.pos();
        let (name, value) =
            (ident() - expect_equals() + expression() - expect_in()).parse(state)?;
        let body = expression().parse(state)?;

        let position = start.merge(&body.position());
        Ok(Expression::Let(Let {
            name,
            value: Box::new(value),
            body: Box::new(body),
            position,
        }))
    })
}

/// fun := "fun" IDENT* "->" expr
fn lambda() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_fun().parse(state)?.pos();
        let params = (many(ident()) - expect_arrow()).parse(state)?;
        let body = expression().parse(state)?;

        let position = start.merge(&body.position());
        Ok(Expression::Lambda(Lambda {
            params,
            body: Box::new(body),
            position,
        }))
    })
}

/// call_args := expr ("," expr)*
fn call_args() -> BoxedParser<Vec<Expression>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = expression().parse(state)?;
        let mut args = vec![first];

        loop {
            let pos = state.position();
            if optional(expect_comma()).parse(state)?.is_some() {
                match expression().parse(state) {
                    Ok(arg) => args.push(arg),
                    Err(_) => {
                        state.restore(pos);
                        break;
                    }
                }
            } else {
                break;
            }
        }

        Ok(args)
    })
}

/// app := atom ("(" call_args ")")*
///
/// Application is left-associative: `f(a)(b)` applies the result of
/// `f(a)` to `b`.
fn application() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut expr = atom().parse(state)?;

        loop {
            let pos = state.position();
            if expect_lparen().parse(state).is_err() {
                state.restore(pos);
                break;
            }
            let args = call_args().parse(state)?;
            let end = expect_rparen().parse(state)?.pos();

            let position = expr.position().merge(&end);
            expr = Expression::FunctionCall(FunctionCall {
                func: Box::new(expr),
                args,
                position,
            });
        }

        Ok(expr)
    })
}

/// atom := "(" expr ")" | IDENT
fn atom() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();

        if expect_lparen().parse(state).is_ok() {
            let expr = expression().parse(state)?;
            expect_rparen().parse(state)?;
            return Ok(expr);
        }
        state.restore(pos);

        (ident() >> Expression::Ident).parse(state)
    })
}
