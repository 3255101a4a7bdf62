use camlet::ast::scheme::TypeExpr;
use camlet::core::scheme_type;
use camlet::fmt::print_type;
use camlet::lexer::Token;
use camlet::parser::{parse_scheme, ParseState};

fn parse(input: &str) -> camlet::ast::scheme::SchemeExpr {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    match parse_scheme(&mut state) {
        Ok(scheme) => scheme,
        Err(err) => panic!("parsing failed: {}", err),
    }
}

/// Parse a scheme, build the engine type and print it back.
fn roundtrip(input: &str) -> String {
    let ty = scheme_type(input).expect("scheme failed to build");
    print_type(&ty)
}

#[test]
fn parse_bare_constructor() {
    let scheme = parse("int");
    assert!(scheme.vars.is_empty());
    assert!(matches!(&scheme.ty, TypeExpr::Name(n) if n.value == "int"));
}

#[test]
fn parse_forall_binders() {
    let scheme = parse("forall[a b] (a, b) -> a");
    assert_eq!(scheme.vars.len(), 2);
    assert_eq!(scheme.vars[0].value, "a");
    assert_eq!(scheme.vars[1].value, "b");
    assert!(matches!(&scheme.ty, TypeExpr::Arrow(params, _) if params.len() == 2));
}

#[test]
fn parse_arrow_is_right_associative() {
    let scheme = parse("int -> int -> int");
    if let TypeExpr::Arrow(params, ret) = &scheme.ty {
        assert_eq!(params.len(), 1);
        assert!(matches!(&**ret, TypeExpr::Arrow(..)));
    } else {
        panic!("expected an arrow");
    }
}

#[test]
fn parse_bracket_application() {
    let scheme = parse("pair[int, bool]");
    if let TypeExpr::App(head, args) = &scheme.ty {
        assert!(matches!(&**head, TypeExpr::Name(n) if n.value == "pair"));
        assert_eq!(args.len(), 2);
    } else {
        panic!("expected an application");
    }
}

#[test]
fn parse_parenthesized_arrow_argument() {
    let scheme = parse("(a -> b) -> a -> b");
    if let TypeExpr::Arrow(params, _) = &scheme.ty {
        assert_eq!(params.len(), 1);
        assert!(matches!(&params[0], TypeExpr::Arrow(..)));
    } else {
        panic!("expected an arrow");
    }
}

#[test]
fn parse_rejects_tuple_without_arrow() {
    let tokens = Token::lex("(a, b)").expect("lexing failed");
    let mut state = ParseState::new(tokens);
    assert!(parse_scheme(&mut state).is_err());
}

#[test]
fn parse_rejects_trailing_input() {
    let tokens = Token::lex("int int").expect("lexing failed");
    let mut state = ParseState::new(tokens);
    assert!(parse_scheme(&mut state).is_err());
}

// Printing a parsed scheme yields an alpha-equivalent scheme: already
// canonical inputs survive the roundtrip verbatim, others come back with
// canonical variable names.

#[test]
fn roundtrip_canonical_schemes() {
    for scheme in [
        "int",
        "int -> int",
        "(int, int) -> int",
        "forall[a] a -> a",
        "forall[a] list[a] -> a",
        "forall[a] (a, a) -> bool",
        "forall[a b] (a -> b, list[a]) -> list[b]",
        "forall[a b] (a -> b) -> list[a] -> list[b]",
        "forall[a b] pair[a, b] -> a",
        "forall[a b] a -> b -> a",
        "(int -> bool) -> bool",
    ] {
        assert_eq!(roundtrip(scheme), scheme);
    }
}

#[test]
fn roundtrip_renames_to_canonical_letters() {
    assert_eq!(roundtrip("forall[x y] x -> y"), "forall[a b] a -> b");
    assert_eq!(
        roundtrip("forall[t u] (t -> u, list[t]) -> list[u]"),
        "forall[a b] (a -> b, list[a]) -> list[b]"
    );
}

#[test]
fn roundtrip_unbound_names_are_constructors() {
    // `b` is not bound by the forall, so it is a constructor, not a variable
    assert_eq!(roundtrip("forall[a] a -> b"), "forall[a] a -> b");
    assert_eq!(roundtrip("list[elem]"), "list[elem]");
}
