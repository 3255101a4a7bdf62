use super::expression::Ident;

/// Parsed type scheme: an optional `forall[..]` binder list and a type.
///
/// Identifiers listed in `vars` become generic type variables when the
/// scheme is turned into an engine type; every other identifier is a
/// nullary type constructor.
#[derive(Debug, Clone)]
pub struct SchemeExpr {
    pub vars: Vec<Ident>,
    pub ty: TypeExpr,
}

/// Surface type syntax.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// Bare identifier: a constructor like `int`, or a `forall`-bound variable
    Name(Ident),
    /// Bracket application: `list[a]`, `pair[a, b]`
    App(Box<TypeExpr>, Vec<TypeExpr>),
    /// Arrow type: `a -> b` or `(a, b) -> c`
    Arrow(Vec<TypeExpr>, Box<TypeExpr>),
}
