//! The simulation environment: variable name → value slots
//!
//! Exactly one [`Environment`] exists per run. The initialization program
//! populates it, and every iteration of the model rules mutates it in place;
//! state deliberately persists and accumulates across steps. Reading a slot
//! that was never assigned is an [`UnboundVariable`](crate::engine::RuntimeError::UnboundVariable)
//! fault, not a silent default.

use crate::engine::errors::RuntimeError;
use crate::parser::ast::SourceLocation;
use crate::state::value::Value;
use rustc_hash::FxHashMap;

/// Mutable mapping of variable names to values
#[derive(Debug, Clone, Default)]
pub struct Environment {
    slots: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            slots: FxHashMap::default(),
        }
    }

    /// Read a slot, faulting if the variable was never assigned
    pub fn read(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnboundVariable {
                name: name.to_string(),
                location,
            })
    }

    /// Look up a slot without faulting
    pub fn get(&self, name: &str) -> Option<Value> {
        self.slots.get(name).copied()
    }

    /// Write a slot, creating it if absent
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.slots.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.slots.insert(name.to_string(), value);
            }
        }
    }

    /// All bound names in sorted order (stable across runs)
    pub fn names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.slots.iter()
    }
}
