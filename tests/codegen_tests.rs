use modelrun::codegen::{generate, generate_expr, Flow};
use modelrun::engine::RuntimeError;
use modelrun::parser::{BinOp, Expr, SourceLocation, Statement, UnOp};
use modelrun::state::{Environment, Value};

fn loc() -> SourceLocation {
    SourceLocation::new(1, 1)
}

fn var(name: &str) -> Expr {
    Expr::Variable {
        name: name.to_string(),
        location: loc(),
    }
}

fn number(n: f64) -> Expr {
    Expr::Number(n)
}

#[test]
fn test_power_lowers_to_powf() {
    let env = Environment::new();

    // 4 ^ 0.5 must behave like an explicit pow call (sqrt), which no
    // integer-exponent shortcut could produce
    let expr = Expr::Binary {
        op: BinOp::Pow,
        left: Box::new(number(4.0)),
        right: Box::new(number(0.5)),
    };
    let value = generate_expr(&expr)(&env).unwrap();
    assert_eq!(value, Value::Number(2.0));

    // Spot-check equivalence with f64::powf over a few operand pairs,
    // including a negative base with fractional exponent (NaN domain)
    for (base, exp) in [(2.0, 10.0), (9.81, 2.5), (-8.0, 1.0 / 3.0), (0.0, 0.0)] {
        let expr = Expr::Binary {
            op: BinOp::Pow,
            left: Box::new(number(base)),
            right: Box::new(number(exp)),
        };
        let got = generate_expr(&expr)(&env).unwrap().as_number();
        let expected = f64::powf(base, exp);
        assert!(
            got == expected || (got.is_nan() && expected.is_nan()),
            "pow({}, {}) produced {}, expected {}",
            base,
            exp,
            got,
            expected
        );
    }
}

#[test]
fn test_assignment_composes_reads() {
    let mut env = Environment::new();
    env.assign("x", Value::Number(2.0));
    env.assign("y", Value::Number(3.0));

    let program = generate(&[Statement::Assignment {
        target: "z".to_string(),
        value: Expr::Binary {
            op: BinOp::Add,
            left: Box::new(var("x")),
            right: Box::new(var("y")),
        },
        location: loc(),
    }]);

    assert_eq!(program.run(&mut env).unwrap(), Flow::Continue);
    assert_eq!(env.get("x"), Some(Value::Number(2.0)));
    assert_eq!(env.get("y"), Some(Value::Number(3.0)));
    assert_eq!(env.get("z"), Some(Value::Number(5.0)));
}

#[test]
fn test_unary_operators() {
    let env = Environment::new();

    let not_true = Expr::Unary {
        op: UnOp::Not,
        operand: Box::new(Expr::Bool(true)),
    };
    assert_eq!(generate_expr(&not_true)(&env).unwrap(), Value::Bool(false));

    let neg_four = Expr::Unary {
        op: UnOp::Neg,
        operand: Box::new(number(4.0)),
    };
    assert_eq!(
        generate_expr(&neg_four)(&env).unwrap(),
        Value::Number(-4.0)
    );
}

#[test]
fn test_conditional_without_else_is_noop_when_false() {
    let mut env = Environment::new();
    env.assign("x", Value::Number(0.0));

    let program = generate(&[Statement::If {
        condition: Expr::Bool(false),
        body: vec![Statement::Assignment {
            target: "x".to_string(),
            value: number(99.0),
            location: loc(),
        }],
        location: loc(),
    }]);

    assert_eq!(program.run(&mut env).unwrap(), Flow::Continue);
    assert_eq!(env.get("x"), Some(Value::Number(0.0)));
}

#[test]
fn test_stop_interrupts_sequence() {
    let mut env = Environment::new();

    let program = generate(&[
        Statement::Assignment {
            target: "before".to_string(),
            value: number(1.0),
            location: loc(),
        },
        Statement::Stop { location: loc() },
        Statement::Assignment {
            target: "after".to_string(),
            value: number(2.0),
            location: loc(),
        },
    ]);

    // Stop is a control-flow result, not an error: assignments before it
    // took effect, assignments after it never ran
    assert_eq!(program.run(&mut env).unwrap(), Flow::Stop);
    assert_eq!(env.get("before"), Some(Value::Number(1.0)));
    assert_eq!(env.get("after"), None);
}

#[test]
fn test_division_by_zero_follows_ieee754() {
    let env = Environment::new();

    let one_over_zero = Expr::Binary {
        op: BinOp::Div,
        left: Box::new(number(1.0)),
        right: Box::new(number(0.0)),
    };
    let value = generate_expr(&one_over_zero)(&env).unwrap().as_number();
    assert!(value.is_infinite() && value > 0.0);

    let zero_over_zero = Expr::Binary {
        op: BinOp::Div,
        left: Box::new(number(0.0)),
        right: Box::new(number(0.0)),
    };
    assert!(generate_expr(&zero_over_zero)(&env).unwrap().as_number().is_nan());
}

#[test]
fn test_unbound_variable_read_faults() {
    let env = Environment::new();
    let err = generate_expr(&var("missing"))(&env).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::UnboundVariable { ref name, .. } if name == "missing"
    ));
}

#[test]
fn test_bool_coerces_in_arithmetic() {
    let env = Environment::new();
    let expr = Expr::Binary {
        op: BinOp::Add,
        left: Box::new(Expr::Bool(true)),
        right: Box::new(number(1.0)),
    };
    assert_eq!(generate_expr(&expr)(&env).unwrap(), Value::Number(2.0));
}

#[test]
fn test_generation_never_touches_environment() {
    // Generating code for a program that reads and writes variables must
    // not create any slot: all environment access is deferred to run time
    let program = generate(&[Statement::Assignment {
        target: "z".to_string(),
        value: var("x"),
        location: loc(),
    }]);

    let env = Environment::new();
    assert!(env.is_empty());
    assert_eq!(program.len(), 1);
}
