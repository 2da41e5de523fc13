// Constants for the execution engine

/// Default upper bound on recorded iterations per run.
/// Mirrors the classic model runner's Nmax of 1e6.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;
