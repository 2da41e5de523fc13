//! Code generator: AST → executable closure tree
//!
//! Translates a parsed statement sequence into a [`Program`] of boxed
//! closures over the [`Environment`]. Generation is pure: it reads the AST
//! once, allocates the closure tree, and never touches an environment itself.
//! All environment access happens when the generated program later runs.
//!
//! The AST is a closed sum type and every variant is matched exhaustively
//! below, so an "unrecognized node" cannot exist at run time.
//!
//! Translation rules worth calling out:
//! - `^` lowers to an explicit [`f64::powf`] call.
//! - Division by zero follows IEEE-754 (`inf`/`NaN`), it is not a fault.
//! - Unary minus is `-1.0 * x`.
//! - `stop` yields [`Flow::Stop`], a control-flow result distinct from a
//!   runtime fault.

use crate::engine::errors::RuntimeError;
use crate::parser::ast::{BinOp, Expr, LogicOp, Statement, UnOp};
use crate::state::{Environment, Value};

/// Outcome of running a compiled statement or program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Proceed to the next statement / iteration
    Continue,
    /// `stop` was reached: end the iteration loop
    Stop,
}

type ExprFn = Box<dyn Fn(&Environment) -> Result<Value, RuntimeError>>;
type StmtFn = Box<dyn Fn(&mut Environment) -> Result<Flow, RuntimeError>>;

/// A compiled statement sequence, executable against an [`Environment`]
pub struct Program {
    ops: Vec<StmtFn>,
}

impl Program {
    /// Execute each statement in order. `Stop` propagates out immediately;
    /// statements before it have already taken effect.
    pub fn run(&self, env: &mut Environment) -> Result<Flow, RuntimeError> {
        for op in &self.ops {
            if let Flow::Stop = op(env)? {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Generate executable code for a statement sequence
pub fn generate(statements: &[Statement]) -> Program {
    Program {
        ops: statements.iter().map(generate_statement).collect(),
    }
}

fn generate_statement(stmt: &Statement) -> StmtFn {
    match stmt {
        Statement::Assignment { target, value, .. } => {
            let target = target.clone();
            let value = generate_expr(value);
            Box::new(move |env| {
                let v = value(env)?;
                env.assign(&target, v);
                Ok(Flow::Continue)
            })
        }
        Statement::If { condition, body, .. } => {
            let condition = generate_expr(condition);
            let body = generate(body);
            Box::new(move |env| {
                if condition(env)?.truthy() {
                    body.run(env)
                } else {
                    Ok(Flow::Continue)
                }
            })
        }
        Statement::Stop { .. } => Box::new(|_| Ok(Flow::Stop)),
    }
}

/// Generate evaluation code for an expression
pub fn generate_expr(expr: &Expr) -> ExprFn {
    match expr {
        Expr::Number(n) => {
            let n = *n;
            Box::new(move |_| Ok(Value::Number(n)))
        }
        Expr::Bool(b) => {
            let b = *b;
            Box::new(move |_| Ok(Value::Bool(b)))
        }
        Expr::Variable { name, location } => {
            let name = name.clone();
            let location = *location;
            Box::new(move |env| env.read(&name, location))
        }
        Expr::Binary { op, left, right } => {
            let left = generate_expr(left);
            let right = generate_expr(right);
            match op {
                // Exponentiation is an explicit powf call, never infix math
                BinOp::Pow => Box::new(move |env| {
                    let base = left(env)?.as_number();
                    let exp = right(env)?.as_number();
                    Ok(Value::Number(f64::powf(base, exp)))
                }),
                BinOp::Add => Box::new(move |env| {
                    Ok(Value::Number(left(env)?.as_number() + right(env)?.as_number()))
                }),
                BinOp::Sub => Box::new(move |env| {
                    Ok(Value::Number(left(env)?.as_number() - right(env)?.as_number()))
                }),
                BinOp::Mul => Box::new(move |env| {
                    Ok(Value::Number(left(env)?.as_number() * right(env)?.as_number()))
                }),
                // IEEE-754: x/0 is inf or NaN, not a fault
                BinOp::Div => Box::new(move |env| {
                    Ok(Value::Number(left(env)?.as_number() / right(env)?.as_number()))
                }),
            }
        }
        Expr::Logical { op, left, right } => {
            let left = generate_expr(left);
            let right = generate_expr(right);
            match op {
                LogicOp::And => Box::new(move |env| {
                    // Both sides evaluate; short-circuiting is not required
                    let l = left(env)?.truthy();
                    let r = right(env)?.truthy();
                    Ok(Value::Bool(l && r))
                }),
                LogicOp::Or => Box::new(move |env| {
                    let l = left(env)?.truthy();
                    let r = right(env)?.truthy();
                    Ok(Value::Bool(l || r))
                }),
                LogicOp::Eq => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() == right(env)?.as_number()))
                }),
                LogicOp::Ne => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() != right(env)?.as_number()))
                }),
                LogicOp::Lt => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() < right(env)?.as_number()))
                }),
                LogicOp::Le => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() <= right(env)?.as_number()))
                }),
                LogicOp::Gt => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() > right(env)?.as_number()))
                }),
                LogicOp::Ge => Box::new(move |env| {
                    Ok(Value::Bool(left(env)?.as_number() >= right(env)?.as_number()))
                }),
            }
        }
        Expr::Unary { op, operand } => {
            let operand = generate_expr(operand);
            match op {
                UnOp::Neg => {
                    Box::new(move |env| Ok(Value::Number(-1.0 * operand(env)?.as_number())))
                }
                UnOp::Not => Box::new(move |env| Ok(Value::Bool(!operand(env)?.truthy()))),
            }
        }
    }
}
