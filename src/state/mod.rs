//! Simulation state: tagged runtime [`value::Value`]s stored in a mutable
//! [`env::Environment`] keyed by variable name.

pub mod env;
pub mod value;

pub use env::Environment;
pub use value::Value;
