use lachs::Span;

#[derive(Debug, Clone)]
pub enum Expression {
    Ident(Ident),
    Lambda(Lambda),
    FunctionCall(FunctionCall),
    Let(Let),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Ident(i) => i.position.clone(),
            Expression::Lambda(l) => l.position.clone(),
            Expression::FunctionCall(c) => c.position.clone(),
            Expression::Let(l) => l.position.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

/// Multi-parameter lambda: `fun x y -> body`
#[derive(Debug, Clone)]
pub struct Lambda {
    pub params: Vec<Ident>,
    pub body: Box<Expression>,
    pub position: Span,
}

/// Multi-argument application: `f(a, b)`
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub func: Box<Expression>,
    pub args: Vec<Expression>,
    pub position: Span,
}

/// Non-recursive let binding: `let x = value in body`
#[derive(Debug, Clone)]
pub struct Let {
    pub name: Ident,
    pub value: Box<Expression>,
    pub body: Box<Expression>,
    pub position: Span,
}
