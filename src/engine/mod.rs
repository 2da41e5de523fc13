//! Model execution
//!
//! - [`engine`]: the bounded-iteration run loop
//! - [`errors`]: runtime fault types
//!
//! # Execution model
//!
//! One [`engine::Engine`] drives one run: generated initialization executes
//! once, then the generated model rules execute once per iteration until the
//! iteration bound is reached, the model raises `stop`, or a fault occurs.
//! Each completed iteration appends one row to the history. Everything is
//! single-threaded and strictly sequential — each iteration depends on the
//! state the previous one left behind.

pub mod constants;
pub mod engine;
pub mod errors;

pub use constants::DEFAULT_MAX_ITERATIONS;
pub use engine::{Engine, EngineConfig, RunState, RunSummary};
pub use errors::RuntimeError;
