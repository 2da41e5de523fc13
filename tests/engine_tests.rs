use modelrun::codegen::generate;
use modelrun::engine::{Engine, EngineConfig, RunState, RuntimeError};
use modelrun::parser::parse;
use modelrun::state::Value;

/// Parse and compile both programs, returning a ready engine
fn engine_for(init_src: &str, rules_src: &str, config: EngineConfig) -> Engine {
    let init_ast = parse(init_src).expect("init program should parse");
    let rules_ast = parse(rules_src).expect("rules program should parse");
    Engine::new(generate(&init_ast), generate(&rules_ast), config)
}

#[test]
fn test_completes_at_iteration_bound() {
    let init = "s = 0\nv = 2\ndt = 0.1\nt = 0";
    let rules = "s = s + v * dt\nt = t + dt";

    let mut engine = engine_for(
        init,
        rules,
        EngineConfig {
            max_iterations: 5,
            tracked: None,
        },
    );
    let summary = engine.run();

    assert_eq!(summary.state, RunState::Completed);
    assert_eq!(summary.iterations, 5);
    assert_eq!(engine.history().len(), 5);

    let s = engine.history().series("s").unwrap();
    assert_eq!(s.len(), 5);
    assert!((s[4] - 1.0).abs() < 1e-9);
}

#[test]
fn test_stop_halts_and_records_stopping_iteration() {
    let init = "t = 0";
    let rules = "t = t + 1\nals t >= 3 dan\n    stop\neindals";

    let mut engine = engine_for(
        init,
        rules,
        EngineConfig {
            max_iterations: 100,
            tracked: None,
        },
    );
    let summary = engine.run();

    // stop fires in the iteration with 0-based index 2, after the
    // assignment of that same iteration ran
    assert_eq!(summary.state, RunState::Halted);
    assert_eq!(engine.history().len(), 3);
    assert_eq!(engine.history().series("t"), Some(vec![1.0, 2.0, 3.0]));
}

#[test]
fn test_step_fault_keeps_partial_history() {
    let init = "x = 0";
    let rules = "x = x + 1\nals x > 2 dan\n    y = missing\neindals";

    let mut engine = engine_for(
        init,
        rules,
        EngineConfig {
            max_iterations: 100,
            tracked: None,
        },
    );
    let summary = engine.run();

    match &summary.state {
        RunState::Faulted(RuntimeError::UnboundVariable { name, .. }) => {
            assert_eq!(name, "missing");
        }
        other => panic!("Expected unbound-variable fault, got {:?}", other),
    }

    // Two iterations completed before the fault; the faulted third
    // iteration is excluded from history
    assert_eq!(summary.iterations, 2);
    assert_eq!(engine.history().series("x"), Some(vec![1.0, 2.0]));

    // But its partial mutation is still visible in the final environment
    assert_eq!(engine.env().get("x"), Some(Value::Number(3.0)));
    assert_eq!(engine.env().get("y"), None);
}

#[test]
fn test_initialization_fault_is_fatal() {
    let mut engine = engine_for(
        "a = b",
        "a = a + 1",
        EngineConfig {
            max_iterations: 10,
            tracked: None,
        },
    );
    let summary = engine.run();

    assert!(matches!(
        summary.state,
        RunState::Faulted(RuntimeError::UnboundVariable { .. })
    ));
    assert_eq!(summary.iterations, 0);
    assert!(engine.history().is_empty());
}

#[test]
fn test_runs_are_deterministic() {
    let init = "s = 0\nv = 3.5\ndt = 0.01";
    let rules = "v = v * 0.99\ns = s + v * dt";
    let config = EngineConfig {
        max_iterations: 50,
        tracked: None,
    };

    let mut first = engine_for(init, rules, config.clone());
    let mut second = engine_for(init, rules, config);
    let a = first.run();
    let b = second.run();

    assert_eq!(a.state, b.state);
    assert_eq!(first.history().series("s"), second.history().series("s"));
    assert_eq!(first.history().series("v"), second.history().series("v"));
}

#[test]
fn test_rerunning_one_engine_is_identical() {
    let mut engine = engine_for(
        "n = 0",
        "n = n + 1",
        EngineConfig {
            max_iterations: 4,
            tracked: None,
        },
    );

    let first = engine.run();
    let first_series = engine.history().series("n");
    let second = engine.run();

    assert_eq!(first.state, second.state);
    assert_eq!(first_series, engine.history().series("n"));
}

#[test]
fn test_tracked_subset() {
    let mut engine = engine_for(
        "s = 0\nt = 0\ndt = 0.1",
        "s = s + dt\nt = t + dt",
        EngineConfig {
            max_iterations: 3,
            tracked: Some(vec!["s".to_string()]),
        },
    );
    engine.run();

    assert_eq!(engine.history().columns(), &["s".to_string()][..]);
    assert!(engine.history().series("s").is_some());
    assert_eq!(engine.history().series("t"), None);
}

#[test]
fn test_default_tracking_resolves_after_initialization() {
    // `F` only comes into existence during the first step; with default
    // tracking (resolved after initialization) it is simply not a column
    let mut engine = engine_for(
        "m = 2\na = 0",
        "F = 10\na = F / m",
        EngineConfig {
            max_iterations: 2,
            tracked: None,
        },
    );
    engine.run();

    assert_eq!(engine.history().series("F"), None);
    assert_eq!(engine.history().series("a"), Some(vec![5.0, 5.0]));
    // The variable itself exists in the final environment
    assert_eq!(engine.env().get("F"), Some(Value::Number(10.0)));
}

#[test]
fn test_full_model_halts_on_distance() {
    // The classic accelerating-vehicle model: constant net force until the
    // distance bound trips the stop condition
    let init = "\
s = 0
v = 0
t = 0
dt = 0.01
Fmotor = 2000
Fw = 500
m = 1000
";
    let rules = "\
F = Fmotor - Fw
a = F / m
v = v + a * dt
s = s + v * dt
t = t + dt
als s > 100 dan
    stop
eindals
";

    let mut engine = engine_for(
        init,
        rules,
        EngineConfig {
            max_iterations: 10_000,
            tracked: None,
        },
    );
    let summary = engine.run();

    assert_eq!(summary.state, RunState::Halted);
    assert!(summary.iterations < 10_000);

    let s = engine.env().get("s").unwrap().as_number();
    assert!(s > 100.0);

    // a = F/m = 1.5 m/s^2 throughout the run
    let a = engine.env().get("a").unwrap().as_number();
    assert!((a - 1.5).abs() < 1e-12);

    // History is bounded by the stopping iteration and indexed by step
    assert_eq!(engine.history().len(), summary.iterations);
    let series = engine.history().series("s").unwrap();
    assert!(series[0] < series[series.len() - 1]);
}

#[test]
fn test_stop_during_initialization_ends_it_early() {
    // Not a fault: initialization simply ends at the stop, and the run
    // proceeds with whatever was assigned before it
    let mut engine = engine_for(
        "a = 1\nstop\nb = 2",
        "a = a + 1",
        EngineConfig {
            max_iterations: 2,
            tracked: None,
        },
    );
    let summary = engine.run();

    assert_eq!(summary.state, RunState::Completed);
    assert_eq!(engine.env().get("b"), None);
    assert_eq!(engine.env().get("a"), Some(Value::Number(3.0)));
}
