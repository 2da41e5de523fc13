// AST definitions for the modeling language

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Arithmetic binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `^` — lowered to an explicit `powf` call, never host infix arithmetic
    Pow,
}

/// Relational and boolean operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // NOT x / niet x
}

/// Expression nodes
///
/// Immutable once produced by the parser; the code generator only reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Bool(bool),
    Variable {
        name: String,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
}

/// Statement nodes
///
/// A model program is a flat sequence of these; `If` bodies nest further
/// sequences. The language has no `else` branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment {
        target: String,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        body: Vec<Statement>,
        location: SourceLocation,
    },
    /// Early termination of the iteration loop
    Stop { location: SourceLocation },
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Assignment { location, .. }
            | Statement::If { location, .. }
            | Statement::Stop { location } => *location,
        }
    }
}
