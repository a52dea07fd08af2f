//! AST node definitions.
//!
//! Each variant carries exactly the typed fields its grammar rule produces,
//! rather than an untyped child vector; the renderer recovers the original
//! child order from these fields.

/// The root node: the ordered top-level statements of one source file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program(pub Vec<Statement>);

/// A single statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    FunctionDecl(FunctionDecl),
    Assign(Assign),
    /// An expression followed by `;`
    Expr(Expression),
    VariableDecl(VariableDecl),
    Read(Identifier),
    Write(Identifier),
    If(If),
    While(While),
    Halt(Halt),
    Block(Block),
}

/// `function name ( params ) : type block`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Params,
    pub return_type: TypeName,
    pub body: Block,
}

/// A formal parameter list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(pub Vec<Param>);

/// `name : type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Identifier,
    pub ty: TypeName,
}

/// `set target <- value ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
    pub target: Identifier,
    pub value: Expression,
}

/// `let name : type = value ;` or `let name : type = value in block`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: Identifier,
    pub ty: TypeName,
    pub value: Expression,
    pub body: Option<Block>,
}

/// `if ( condition ) statement [ else statement ]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

/// `while ( condition ) statement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
    pub condition: Expression,
    pub body: Box<Statement>,
}

/// `halt [ code ] ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halt(pub Option<HaltCode>);

/// The exit code of a halt statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltCode {
    /// An integer literal, kept as its source text
    Integer(String),
    Variable(Identifier),
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block(pub Vec<Statement>);

/// An identifier leaf, carrying its source spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(pub String);

/// The expression wrapper node.
///
/// Always has exactly one child: either a relational [Expr::Binary] or a
/// single simple expression. Parenthesized sub-expressions reappear as
/// `Expression` nodes wherever a factor is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(pub Box<Expr>);

/// Any expression below the wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Binary(Binary),
    Unary(Unary),
    Call(Call),
    Cast(Cast),
    /// A parenthesized sub-expression; renders as the inner node
    Sub(Expression),
}

/// A literal leaf; the value is retained as its exact source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Real,
    Char,
    Str,
    Boolean,
    Unit,
}

/// A binary operator node with exactly two children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subt,
    Mult,
    Div,
    Or,
    And,
    Greater,
    Lesser,
    Equals,
    NotEquals,
    GreaterEquals,
    LesserEquals,
}

/// A unary operator applied to an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    pub op: UnaryOp,
    pub operand: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

impl UnaryOp {
    /// The source spelling of the operator
    pub fn spelling(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// `name ( args )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: Identifier,
    pub args: Args,
}

/// A call argument list; each argument is a full expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args(pub Vec<Expression>);

/// `( type ) expression`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
    pub ty: TypeName,
    pub operand: Expression,
}

/// A type keyword leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Real,
    Bool,
    Char,
    Str,
    Unit,
}

impl TypeName {
    /// Maps a type keyword spelling to its type, if it is one
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(TypeName::Int),
            "real" => Some(TypeName::Real),
            "bool" => Some(TypeName::Bool),
            "char" => Some(TypeName::Char),
            "string" => Some(TypeName::Str),
            "unit" => Some(TypeName::Unit),
            _ => None,
        }
    }

    /// The type keyword spelling
    pub fn spelling(&self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Real => "real",
            TypeName::Bool => "bool",
            TypeName::Char => "char",
            TypeName::Str => "string",
            TypeName::Unit => "unit",
        }
    }
}
