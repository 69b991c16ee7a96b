use lachs::Span;

#[derive(Debug, Clone)]
pub enum Expression {
    Ident(Ident),
    Integer(Integer),
    Boolean(Boolean),
    String(StringLiteral),
    Lambda(Lambda),
    FunctionCall(FunctionCall),
    IfThenElse(IfThenElse),
    LetIn(LetIn),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Ident(i) => i.position.clone(),
            Expression::Integer(i) => i.position.clone(),
            Expression::Boolean(b) => b.position.clone(),
            Expression::String(s) => s.position.clone(),
            Expression::Lambda(l) => l.position.clone(),
            Expression::FunctionCall(f) => f.position.clone(),
            Expression::IfThenElse(i) => i.position.clone(),
            Expression::LetIn(l) => l.position.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Integer {
    pub value: i128,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Boolean {
    pub value: bool,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

/// Single-parameter lambda: `\x -> body`
#[derive(Debug, Clone)]
pub struct Lambda {
    pub param: Ident,
    pub body: Box<Expression>,
    pub position: Span,
}

/// Application of a function to a single argument: `f x`
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub func: Box<Expression>,
    pub arg: Box<Expression>,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct IfThenElse {
    pub condition: Box<Expression>,
    pub then_branch: Box<Expression>,
    pub else_branch: Box<Expression>,
    pub position: Span,
}

/// `let name = bound in body`; `name` is in scope inside `bound` as well,
/// so every binding is potentially recursive.
#[derive(Debug, Clone)]
pub struct LetIn {
    pub name: Ident,
    pub bound: Box<Expression>,
    pub body: Box<Expression>,
    pub position: Span,
}
