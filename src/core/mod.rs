//! Built-in environment of primitives
//!
//! The starter environment every top-level inference runs against. Each
//! primitive is described by a scheme string in the surface type syntax;
//! the strings are parsed with the scheme grammar and converted into
//! engine types whose `forall`-bound variables carry `GENERIC_LEVEL`, so
//! a lookup instantiates them afresh at every use site.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::scheme::{SchemeExpr, TypeExpr};
use crate::lexer::Token;
use crate::parser::{parse_scheme, ParseError, ParseState};
use crate::types::env::TypeEnv;
use crate::types::ty::{Levels, Type, TypeVar, GENERIC_LEVEL};

/// The primitives and their schemes.
const PRIMITIVES: &[(&str, &str)] = &[
    ("head", "forall[a] list[a] -> a"),
    ("tail", "forall[a] list[a] -> list[a]"),
    ("nil", "forall[a] list[a]"),
    ("cons", "forall[a] (a, list[a]) -> list[a]"),
    ("cons_curry", "forall[a] a -> list[a] -> list[a]"),
    ("map", "forall[a b] (a -> b, list[a]) -> list[b]"),
    ("map_curry", "forall[a b] (a -> b) -> list[a] -> list[b]"),
    ("one", "int"),
    ("zero", "int"),
    ("succ", "int -> int"),
    ("plus", "(int, int) -> int"),
    ("true", "bool"),
    ("false", "bool"),
    ("not", "bool -> bool"),
    ("eq", "forall[a] (a, a) -> bool"),
    ("eq_curry", "forall[a] a -> a -> bool"),
    ("pair", "forall[a b] (a, b) -> pair[a, b]"),
    ("pair_curry", "forall[a b] a -> b -> pair[a, b]"),
    ("first", "forall[a b] pair[a, b] -> a"),
    ("second", "forall[a b] pair[a, b] -> b"),
    ("id", "forall[a] a -> a"),
    ("const", "forall[a b] a -> b -> a"),
    ("apply", "forall[a b] (a -> b, a) -> b"),
    ("apply_curry", "forall[a b] (a -> b) -> a -> b"),
    ("choose", "forall[a] (a, a) -> a"),
    ("choose_curry", "forall[a] a -> a -> a"),
];

/// A scheme string failed to lex or parse.
#[derive(Debug, Clone)]
pub enum SchemeError {
    Lex(String),
    Parse(ParseError),
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchemeError::Lex(detail) => write!(f, "Lex error: {}", detail),
            SchemeError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SchemeError {}

/// Build the core environment of primitives.
pub fn core_env() -> Result<TypeEnv, SchemeError> {
    let mut env = TypeEnv::empty();
    for (name, scheme) in PRIMITIVES {
        let ty = scheme_type(scheme)?;
        env.bind((*name).to_string(), ty);
    }
    Ok(env)
}

/// Parse a scheme string into an engine type.
pub fn scheme_type(source: &str) -> Result<Rc<Type>, SchemeError> {
    let tokens = Token::lex(source).map_err(|err| SchemeError::Lex(err.to_string()))?;
    let mut state = ParseState::new(tokens);
    let scheme = parse_scheme(&mut state).map_err(SchemeError::Parse)?;
    Ok(build_scheme(&scheme))
}

fn build_scheme(scheme: &SchemeExpr) -> Rc<Type> {
    let mut generics = HashMap::new();
    for (id, var) in scheme.vars.iter().enumerate() {
        let cell = Rc::new(RefCell::new(TypeVar::Unbound(id, GENERIC_LEVEL)));
        generics.insert(var.value.clone(), Rc::new(Type::Var(cell)));
    }
    build_ty(&scheme.ty, &generics)
}

fn build_ty(expr: &TypeExpr, generics: &HashMap<String, Rc<Type>>) -> Rc<Type> {
    match expr {
        TypeExpr::Name(name) => match generics.get(&name.value) {
            Some(var) => var.clone(),
            None => Rc::new(Type::Const(name.value.clone())),
        },

        TypeExpr::Arrow(params, ret) => {
            let params: Vec<Rc<Type>> =
                params.iter().map(|param| build_ty(param, generics)).collect();
            let ret = build_ty(ret, generics);
            // a node containing generic structure is itself generic
            let level = params
                .iter()
                .chain(std::iter::once(&ret))
                .map(|child| child.level())
                .max()
                .unwrap_or(0);
            Rc::new(Type::Arrow(params, ret, Levels::new(level)))
        }

        TypeExpr::App(head, args) => {
            let head = build_ty(head, generics);
            let args: Vec<Rc<Type>> = args.iter().map(|arg| build_ty(arg, generics)).collect();
            let level = std::iter::once(&head)
                .chain(args.iter())
                .map(|child| child.level())
                .max()
                .unwrap_or(0);
            Rc::new(Type::App(head, args, Levels::new(level)))
        }
    }
}
