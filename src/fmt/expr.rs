//! Pretty printer for the surface expression AST

use std::fmt::{self, Display};

use crate::ast::expression::Expression;

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self, false))
    }
}

/// Render an expression; `atomic` asks for parentheses around forms that
/// would otherwise swallow what follows (lambdas and lets in function
/// position).
fn render(expr: &Expression, atomic: bool) -> String {
    match expr {
        Expression::Ident(ident) => ident.value.clone(),

        Expression::FunctionCall(call) => {
            let args: Vec<String> = call.args.iter().map(|arg| render(arg, false)).collect();
            format!("{}({})", render(&call.func, true), args.join(", "))
        }

        Expression::Lambda(lambda) => {
            let params: Vec<&str> = lambda
                .params
                .iter()
                .map(|param| param.value.as_str())
                .collect();
            let body = render(&lambda.body, false);
            let rendered = format!("fun {} -> {}", params.join(" "), body);
            if atomic {
                format!("({})", rendered)
            } else {
                rendered
            }
        }

        Expression::Let(binding) => {
            let rendered = format!(
                "let {} = {} in {}",
                binding.name.value,
                render(&binding.value, false),
                render(&binding.body, false)
            );
            if atomic {
                format!("({})", rendered)
            } else {
                rendered
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lachs::Span;

    use super::*;
    use crate::ast::expression::{FunctionCall, Ident, Lambda, Let};

    fn ident(name: &str) -> Expression {
        Expression::Ident(Ident {
            value: name.to_string(),
            position: Span::default(),
        })
    }

    #[test]
    fn test_display_call() {
        let expr = Expression::FunctionCall(FunctionCall {
            func: Box::new(ident("f")),
            args: vec![ident("x"), ident("y")],
            position: Span::default(),
        });
        assert_eq!(expr.to_string(), "f(x, y)");
    }

    #[test]
    fn test_display_lambda() {
        let expr = Expression::Lambda(Lambda {
            params: vec![Ident {
                value: "x".to_string(),
                position: Span::default(),
            }],
            body: Box::new(ident("x")),
            position: Span::default(),
        });
        assert_eq!(expr.to_string(), "fun x -> x");
    }

    #[test]
    fn test_display_lambda_in_call_position_is_parenthesized() {
        let lambda = Expression::Lambda(Lambda {
            params: vec![Ident {
                value: "x".to_string(),
                position: Span::default(),
            }],
            body: Box::new(ident("x")),
            position: Span::default(),
        });
        let expr = Expression::FunctionCall(FunctionCall {
            func: Box::new(lambda),
            args: vec![ident("y")],
            position: Span::default(),
        });
        assert_eq!(expr.to_string(), "(fun x -> x)(y)");
    }

    #[test]
    fn test_display_let() {
        let expr = Expression::Let(Let {
            name: Ident {
                value: "x".to_string(),
                position: Span::default(),
            },
            value: Box::new(ident("y")),
            body: Box::new(ident("x")),
            position: Span::default(),
        });
        assert_eq!(expr.to_string(), "let x = y in x");
    }
}
