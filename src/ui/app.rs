//! History browser application state and event loop

use crate::engine::{Engine, RunSummary};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Variables,
    Chart,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Variables => FocusedPane::Chart,
            FocusedPane::Chart => FocusedPane::Variables,
        }
    }
}

/// The history browser application
pub struct App {
    /// The finished engine whose history is being browsed
    pub engine: Engine,

    /// Summary of the run that produced the history
    pub summary: RunSummary,

    /// Currently selected iteration (0-based)
    pub step: usize,

    /// Index of the selected variable in the tracked column set
    pub selected_var: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a browser over a finished run
    pub fn new(engine: Engine, summary: RunSummary) -> Self {
        App {
            engine,
            summary,
            step: 0,
            selected_var: 0,
            focused_pane: FocusedPane::Variables,
            should_quit: false,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    fn last_step(&self) -> usize {
        self.engine.history().len().saturating_sub(1)
    }

    /// Run the TUI event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Advance automatically in play mode
            if self.is_playing {
                if self.last_play_time.elapsed() >= Duration::from_millis(100) {
                    if self.step < self.last_step() {
                        self.step += 1;
                    } else {
                        self.is_playing = false;
                    }
                    self.last_play_time = Instant::now();
                }
            }

            // Poll with timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI: variable table left, series chart right, status bar below
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[0]);

        super::panes::render_variables_pane(
            frame,
            columns[0],
            &self.engine,
            self.step,
            self.selected_var,
            self.focused_pane == FocusedPane::Variables,
        );

        super::panes::render_chart_pane(
            frame,
            columns[1],
            &self.engine,
            self.selected_var,
            self.step,
            self.focused_pane == FocusedPane::Chart,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.summary.state,
            self.step,
            self.engine.history().len(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step = self.step.saturating_sub(1);
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.step < self.last_step() {
                    self.step += 1;
                }
            }
            KeyCode::PageUp => {
                self.is_playing = false;
                self.step = self.step.saturating_sub(100);
            }
            KeyCode::PageDown => {
                self.is_playing = false;
                self.step = (self.step + 100).min(self.last_step());
            }
            KeyCode::Up => {
                self.selected_var = self.selected_var.saturating_sub(1);
            }
            KeyCode::Down => {
                let vars = self.engine.history().columns().len();
                if self.selected_var + 1 < vars {
                    self.selected_var += 1;
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing && self.step >= self.last_step() {
                        self.step = 0;
                    }
                    self.last_play_time = Instant::now();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.step = self.last_step();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.step = 0;
            }
            _ => {}
        }
    }
}
