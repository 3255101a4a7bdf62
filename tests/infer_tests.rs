//! End-to-end inference tests: source line in, printed type (or error) out

use camlet::core::core_env;
use camlet::fmt::print_type;
use camlet::lexer::Token;
use camlet::parser::{parse_expression, ParseState};
use camlet::types::error::TypeError;
use camlet::types::infer::Infer;

fn infer_str(input: &str) -> Result<String, TypeError> {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let expr = match parse_expression(&mut state) {
        Ok(expr) => expr,
        Err(err) => panic!("parsing failed: {}", err),
    };

    let mut env = core_env().expect("core environment failed to build");
    let mut infer = Infer::new();
    infer.top_typeof(&mut env, &expr).map(|ty| print_type(&ty))
}

fn assert_type(input: &str, expected: &str) {
    match infer_str(input) {
        Ok(printed) => assert_eq!(printed, expected, "wrong type for: {}", input),
        Err(err) => panic!("inference failed for {}: {}", input, err),
    }
}

#[test]
fn infer_primitives() {
    assert_type("one", "int");
    assert_type("true", "bool");
    assert_type("succ", "int -> int");
    assert_type("plus", "(int, int) -> int");
    assert_type("id", "forall[a] a -> a");
    assert_type("nil", "forall[a] list[a]");
    assert_type("map", "forall[a b] (a -> b, list[a]) -> list[b]");
}

#[test]
fn infer_identity_lambda() {
    assert_type("fun x -> x", "forall[a] a -> a");
}

#[test]
fn infer_constant_lambdas() {
    assert_type("fun x -> fun y -> x", "forall[a b] a -> b -> a");
    assert_type("fun x y -> x", "forall[a b] (a, b) -> a");
}

#[test]
fn infer_self_application_of_polymorphic_function() {
    assert_type("let f = fun x -> x in f(f)", "forall[a] a -> a");
}

#[test]
fn infer_let_polymorphism_at_two_types() {
    assert_type(
        "let f = fun x -> x in pair(f(one), f(true))",
        "pair[int, bool]",
    );
}

#[test]
fn infer_inner_let_generalizes() {
    assert_type("fun x -> let y = fun z -> z in y", "forall[a b] a -> b -> b");
}

#[test]
fn infer_monomorphic_parameter_is_not_generalized() {
    assert_type("fun x -> let y = x in y", "forall[a] a -> a");
    assert_type("fun x -> let y = fun z -> x in y", "forall[a b] a -> b -> a");
}

#[test]
fn infer_generalization_respects_captured_parameters() {
    // y's type mentions x's, so it must stay monomorphic inside the body
    assert_type(
        "fun x -> let y = fun z -> x(z) in y",
        "forall[a b] (a -> b) -> a -> b",
    );
    assert_type(
        "fun x -> let y = fun z -> x(z) in y(one)",
        "forall[a] (int -> a) -> a",
    );
}

#[test]
fn infer_nested_let_in_value_position() {
    assert_type(
        "fun x -> let y = let z = x(fun w -> w) in z in y",
        "forall[a b] ((a -> a) -> b) -> b",
    );
}

#[test]
fn infer_applications_of_primitives() {
    assert_type("succ(one)", "int");
    assert_type("plus(one, zero)", "int");
    assert_type("not(false)", "bool");
    assert_type("apply(succ, one)", "int");
    assert_type("apply_curry(succ)(one)", "int");
}

#[test]
fn infer_list_primitives() {
    assert_type("cons(one, nil)", "list[int]");
    assert_type("cons_curry(one)(nil)", "list[int]");
    assert_type("head(cons(one, nil))", "int");
    assert_type("tail(cons(true, nil))", "list[bool]");
    assert_type("map(succ, cons(one, nil))", "list[int]");
    assert_type("map_curry(succ)(cons(zero, nil))", "list[int]");
}

#[test]
fn infer_pair_primitives() {
    assert_type("pair(one, true)", "pair[int, bool]");
    assert_type("pair_curry(one)(true)", "pair[int, bool]");
    assert_type("first(pair(one, true))", "int");
    assert_type("second(pair(one, true))", "bool");
}

#[test]
fn infer_choose_collapses_both_sides() {
    assert_type("choose(id, succ)", "int -> int");
    assert_type("choose_curry(id)(succ)", "int -> int");
    assert_type("eq(one, zero)", "bool");
    assert_type("let f = fun x -> x in eq(f, succ)", "bool");
}

#[test]
fn infer_const_partial_application() {
    assert_type("const(one)", "forall[a] a -> int");
}

#[test]
fn infer_polymorphic_list_of_functions() {
    assert_type("let xs = cons(id, nil) in xs", "forall[a] list[a -> a]");
}

#[test]
fn infer_function_parameter() {
    assert_type("fun f -> f(one)", "forall[a] (int -> a) -> a");
}

#[test]
fn infer_no_spurious_occurs_check() {
    // kirang's example: sharing through k must not trip the cycle check
    assert_type(
        "fun x y k -> k(k(x, y), k(y, x))",
        "forall[a] (a, a, (a, a) -> a) -> a",
    );
}

#[test]
fn infer_shadowing_is_innermost_first() {
    assert_type("fun x -> let x = one in x", "forall[a] a -> int");
    assert_type("let x = one in let x = true in x", "bool");
}

#[test]
fn infer_self_application_is_cyclic() {
    assert_eq!(infer_str("fun x -> x(x)"), Err(TypeError::Cycle));
}

#[test]
fn infer_heiber_example_is_cyclic() {
    assert_eq!(
        infer_str("fun y -> y(fun z -> y(z))"),
        Err(TypeError::Cycle)
    );
}

#[test]
fn infer_applying_a_constant_fails() {
    assert!(matches!(
        infer_str("one(one)"),
        Err(TypeError::Mismatch { .. })
    ));
}

#[test]
fn infer_wrong_arity_fails() {
    assert_eq!(
        infer_str("plus(one)"),
        Err(TypeError::Arity {
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn infer_argument_type_mismatch_fails() {
    assert!(matches!(
        infer_str("succ(true)"),
        Err(TypeError::Mismatch { .. })
    ));
    assert!(matches!(
        infer_str("plus(one, true)"),
        Err(TypeError::Mismatch { .. })
    ));
    assert!(matches!(
        infer_str("eq(one, true)"),
        Err(TypeError::Mismatch { .. })
    ));
}

#[test]
fn infer_unbound_variable_fails() {
    assert!(matches!(
        infer_str("undefined_thing"),
        Err(TypeError::UnboundVariable { .. })
    ));
    // a let-bound name is not visible in its own value expression
    assert!(matches!(
        infer_str("let x = x in x"),
        Err(TypeError::UnboundVariable { .. })
    ));
}

#[test]
fn infer_error_in_bound_value_aborts() {
    assert!(matches!(
        infer_str("let x = one(one) in one"),
        Err(TypeError::Mismatch { .. })
    ));
}

#[test]
fn infer_is_principal_across_runs() {
    for input in [
        "fun x -> x",
        "let f = fun x -> x in f(f)",
        "fun x -> let y = fun z -> x(z) in y",
        "cons(id, nil)",
    ] {
        let first = infer_str(input).expect("first run failed");
        let second = infer_str(input).expect("second run failed");
        assert_eq!(first, second, "inference is not stable for: {}", input);
    }
}

#[test]
fn infer_engine_state_resets_between_runs() {
    let mut env = core_env().expect("core environment failed to build");
    let mut infer = Infer::new();

    // a failing inference must not poison the next one
    let bad = {
        let tokens = Token::lex("fun x -> x(x)").unwrap();
        let mut state = ParseState::new(tokens);
        parse_expression(&mut state).unwrap()
    };
    assert!(infer.top_typeof(&mut env, &bad).is_err());

    let good = {
        let tokens = Token::lex("fun x -> x").unwrap();
        let mut state = ParseState::new(tokens);
        parse_expression(&mut state).unwrap()
    };
    let ty = infer.top_typeof(&mut env, &good).unwrap();
    assert_eq!(print_type(&ty), "forall[a] a -> a");
}
