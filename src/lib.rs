//! # Introduction
//!
//! modelrun compiles a small discrete-time physics modeling language into an
//! in-memory executable form and runs it for a bounded number of time steps,
//! recording the evolving state per step. The recorded history can be
//! browsed in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Code Generator → Engine → History → TUI
//! ```
//!
//! 1. [`parser`] — tokenises the two model programs (initial values and
//!    model rules) and builds their statement sequences.
//! 2. [`codegen`] — pure translation of the AST into a closure tree over the
//!    simulation environment.
//! 3. [`engine`] — runs initialization once, then the model rules for up to
//!    a configured number of iterations, with explicit `Continue`/`Stop`
//!    control flow and `Completed`/`Halted`/`Faulted` terminal states.
//! 4. [`state`] — the mutable simulation state: tagged [`state::Value`]s in
//!    a name-keyed [`state::Environment`].
//! 5. [`history`] — per-iteration record of tracked variables.
//! 6. [`ui`] — ratatui-based history browser; not part of the stable
//!    library API.
//!
//! ## The language
//!
//! Assignments (`s = s + v * dt`), conditionals without else
//! (`als … dan … eindals`), and `stop` for early termination. Arithmetic is
//! IEEE-754 double precision; `^` is exponentiation; division by zero
//! produces `inf`/`NaN` rather than an error.

pub mod codegen;
pub mod engine;
pub mod history;
pub mod parser;
pub mod state;
pub mod ui;
