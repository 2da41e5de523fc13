//! Model source parsing
//!
//! - [`lexer`]: tokenizes raw model text
//! - [`parser`]: builds the [`ast`] statement sequence
//!
//! The external contract is a single function:
//! [`parser::parse`]`(source) -> Result<Vec<Statement>, SyntaxError>`.
//! The same grammar parses both program kinds (initial values and model
//! rules); the initial-values program simply never uses conditionals or
//! `stop`.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, Expr, LogicOp, SourceLocation, Statement, UnOp};
pub use parser::{parse, SyntaxError};
