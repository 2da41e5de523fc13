// modelrun: discrete-time physics model interpreter with history browsing

mod codegen;
mod engine;
mod history;
mod parser;
mod state;
mod ui;

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use engine::{Engine, EngineConfig, RunState};
use ui::App;

struct Args {
    init_file: String,
    rules_file: String,
    max_iterations: Option<usize>,
    tracked: Option<Vec<String>>,
    tui: bool,
}

fn usage(program_name: &str) -> ! {
    eprintln!(
        "Usage: {} <startwaarden> <modelregels> [-n steps] [--track v1,v2] [--tui]",
        program_name
    );
    eprintln!();
    eprintln!("  <startwaarden>   file with the initial-value assignments");
    eprintln!("  <modelregels>    file with the per-step model rules");
    eprintln!("  -n steps         maximum number of iterations (default 1000000)");
    eprintln!("  --track v1,v2    variables to record per step (default: all)");
    eprintln!("  --tui            browse the recorded history interactively");
    process::exit(1);
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let program_name = argv.first().map(|s| s.as_str()).unwrap_or("modelrun");

    let mut positional = Vec::new();
    let mut max_iterations = None;
    let mut tracked = None;
    let mut tui = false;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-n" => {
                i += 1;
                let value = argv.get(i).unwrap_or_else(|| {
                    eprintln!("Error: -n requires a value");
                    usage(program_name);
                });
                match value.parse::<usize>() {
                    Ok(n) => max_iterations = Some(n),
                    Err(_) => {
                        eprintln!("Error: invalid iteration count '{}'", value);
                        usage(program_name);
                    }
                }
            }
            "--track" => {
                i += 1;
                let value = argv.get(i).unwrap_or_else(|| {
                    eprintln!("Error: --track requires a value");
                    usage(program_name);
                });
                tracked = Some(value.split(',').map(|s| s.trim().to_string()).collect());
            }
            "--tui" => tui = true,
            other if other.starts_with('-') => {
                eprintln!("Error: unknown option '{}'", other);
                usage(program_name);
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        eprintln!("Error: expected two input files");
        usage(program_name);
    }

    Args {
        init_file: positional.remove(0),
        rules_file: positional.remove(0),
        max_iterations,
        tracked,
        tui,
    }
}

fn load_program(path: &str) -> Vec<parser::Statement> {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        process::exit(1);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", path, e);
            process::exit(1);
        }
    };

    match parser::parse(&source) {
        Ok(statements) => statements,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();

    let init_ast = load_program(&args.init_file);
    let rules_ast = load_program(&args.rules_file);

    let init = codegen::generate(&init_ast);
    let step = codegen::generate(&rules_ast);

    let mut config = EngineConfig::default();
    if let Some(n) = args.max_iterations {
        config.max_iterations = n;
    }
    config.tracked = args.tracked;

    let mut engine = Engine::new(init, step, config);
    let summary = engine.run();

    match &summary.state {
        RunState::Completed => eprintln!(
            "Run completed: {} iterations in {:?}",
            summary.iterations, summary.elapsed
        ),
        RunState::Halted => eprintln!(
            "Run halted by 'stop' after {} iterations in {:?}",
            summary.iterations, summary.elapsed
        ),
        RunState::Faulted(fault) => eprintln!(
            "Run faulted after {} iterations in {:?}: {}",
            summary.iterations, summary.elapsed, fault
        ),
    }

    // Final state of every bound variable
    println!("Final state:");
    for name in engine.env().names_sorted() {
        if let Some(value) = engine.env().get(&name) {
            println!("  {} = {}", name, value);
        }
    }

    if !args.tui {
        return Ok(());
    }

    if engine.history().is_empty() {
        eprintln!("No recorded history to browse.");
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run the history browser
    let mut app = App::new(engine, summary);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
