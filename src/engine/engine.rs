// Bounded-iteration execution engine for compiled model programs

use crate::codegen::{Flow, Program};
use crate::engine::constants::DEFAULT_MAX_ITERATIONS;
use crate::engine::errors::RuntimeError;
use crate::history::History;
use crate::state::Environment;
use std::time::{Duration, Instant};

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// The iteration bound was reached without `stop` or fault
    Completed,
    /// The model raised `stop`; the stopping iteration is still recorded
    Halted,
    /// A runtime fault ended the run; history holds the completed iterations
    Faulted(RuntimeError),
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on recorded iterations (Nmax)
    pub max_iterations: usize,
    /// Variables to record per iteration; `None` tracks every variable
    /// bound after initialization, in sorted name order
    pub tracked: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tracked: None,
        }
    }
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state: RunState,
    /// Number of iterations that completed a full body execution
    /// (equals the history length)
    pub iterations: usize,
    pub elapsed: Duration,
}

/// The execution engine that owns and drives one simulation run
///
/// Owns the single [`Environment`] of the run. Initialization executes
/// exactly once against it, then the model rules execute once per iteration
/// against the same environment; state persists and accumulates across
/// steps by design. After [`run`](Engine::run) returns, the final
/// environment and the recorded history stay inspectable regardless of how
/// the run ended.
pub struct Engine {
    init: Program,
    step: Program,
    config: EngineConfig,
    env: Environment,
    history: History,
}

impl Engine {
    pub fn new(init: Program, step: Program, config: EngineConfig) -> Self {
        Engine {
            init,
            step,
            config,
            env: Environment::new(),
            history: History::new(),
        }
    }

    /// Run initialization once, then the model rules for up to
    /// `max_iterations` iterations, recording one history row per completed
    /// iteration.
    pub fn run(&mut self) -> RunSummary {
        // A fresh environment and history per run keeps repeat runs identical
        self.env = Environment::new();
        self.history = History::new();

        let started = Instant::now();

        // Initialization faults are fatal: the run never starts
        match self.init.run(&mut self.env) {
            Ok(_) => {} // a `stop` in initialization just ends it early
            Err(fault) => {
                return RunSummary {
                    state: RunState::Faulted(fault),
                    iterations: 0,
                    elapsed: started.elapsed(),
                };
            }
        }

        let columns = match &self.config.tracked {
            Some(names) => names.clone(),
            None => self.env.names_sorted(),
        };
        self.history.set_columns(columns);

        let state = self.run_loop();

        RunSummary {
            state,
            iterations: self.history.len(),
            elapsed: started.elapsed(),
        }
    }

    fn run_loop(&mut self) -> RunState {
        for _ in 0..self.config.max_iterations {
            match self.step.run(&mut self.env) {
                Ok(Flow::Continue) => {
                    self.history.record(&self.env);
                }
                Ok(Flow::Stop) => {
                    // Assignments before the `stop` took effect this
                    // iteration, so its snapshot is still recorded
                    self.history.record(&self.env);
                    return RunState::Halted;
                }
                Err(fault) => {
                    // The faulted iteration is excluded from history;
                    // rows for completed iterations are kept
                    return RunState::Faulted(fault);
                }
            }
        }
        RunState::Completed
    }

    /// The environment after the run (or before it, if `run` was not called)
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Recorded per-iteration history
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
