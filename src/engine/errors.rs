//! Runtime error types for model execution
//!
//! The language can only fault in one way at run time: reading a variable
//! that was never assigned. Numeric trouble (division by zero, fractional
//! powers of negative bases) follows IEEE-754 and propagates as
//! `inf`/`NaN` values instead of raising — the modeling language is a
//! teaching tool and inherits that behavior on purpose. Early termination
//! via `stop` is a control-flow result, not an error.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime faults raised while executing a compiled program
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Read of a variable slot that was never assigned
    UnboundVariable {
        name: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UnboundVariable { location, .. } => *location,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnboundVariable { name, location } => {
                write!(
                    f,
                    "Unbound variable '{}' at line {}, column {}",
                    name, location.line, location.column
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
