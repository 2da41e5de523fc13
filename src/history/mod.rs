//! Per-iteration state history
//!
//! One row is recorded for every completed iteration of the model rules
//! (including the iteration that raised `stop`, excluding one that faulted
//! mid-body). Row index equals the 0-based iteration number, and the row
//! count is bounded by the engine's iteration limit.
//!
//! Storage is column-oriented over a fixed tracked-variable set, resolved
//! once after initialization, so a million-step run stores a handful of
//! floats per step rather than a map clone per step.

use crate::state::{Environment, Value};
use rustc_hash::FxHashMap;

/// Recorded time series of tracked variables
#[derive(Debug, Clone, Default)]
pub struct History {
    columns: Vec<String>,
    column_index: FxHashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Fix the tracked column set. Called once, after initialization ran.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.column_index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        self.columns = columns;
        self.rows.clear();
    }

    /// Append one row with the current value of every tracked variable.
    ///
    /// A tracked name the model never assigned records as NaN; tracking is
    /// observability and must not fault the run.
    pub fn record(&mut self, env: &Environment) {
        let row = self
            .columns
            .iter()
            .map(|name| env.get(name).unwrap_or(Value::Number(f64::NAN)))
            .collect();
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of recorded iterations
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for iteration `step` (0-based)
    pub fn row(&self, step: usize) -> Option<&[Value]> {
        self.rows.get(step).map(|r| r.as_slice())
    }

    /// Value of `name` at iteration `step`
    pub fn value(&self, step: usize, name: &str) -> Option<Value> {
        let col = *self.column_index.get(name)?;
        self.rows.get(step).and_then(|r| r.get(col)).copied()
    }

    /// Full numeric time series of one tracked variable
    pub fn series(&self, name: &str) -> Option<Vec<f64>> {
        let col = *self.column_index.get(name)?;
        Some(self.rows.iter().map(|r| r[col].as_number()).collect())
    }
}
