//! Stateless render functions for the history browser panes

use crate::engine::{Engine, RunState};
use crate::state::Value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

/// Render the variable table for the selected iteration
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    engine: &Engine,
    step: usize,
    selected: usize,
    focused: bool,
) {
    let history = engine.history();
    let border_color = if focused {
        DEFAULT_THEME.border_focused
    } else {
        DEFAULT_THEME.border_normal
    };

    let title = if history.is_empty() {
        " Variables (final state) ".to_string()
    } else {
        format!(" Variables @ step {} ", step)
    };

    let rows: Vec<Row> = if let Some(row) = history.row(step) {
        history
            .columns()
            .iter()
            .zip(row.iter())
            .enumerate()
            .map(|(i, (name, value))| variable_row(name, value, i == selected))
            .collect()
    } else {
        // No history (init fault or zero iterations): fall back to the
        // final environment so the terminal state is still inspectable
        let names = engine.env().names_sorted();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = engine.env().get(name).unwrap_or(Value::Number(f64::NAN));
                variable_row(name, &value, i == selected)
            })
            .collect()
    };

    let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
        .header(
            Row::new(vec!["name", "value"]).style(
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(table, area);
}

fn variable_row(name: &str, value: &Value, selected: bool) -> Row<'static> {
    let name_style = if selected {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Row::new(vec![
        Span::styled(name.to_string(), name_style),
        Span::styled(
            format_value(value),
            Style::default().fg(DEFAULT_THEME.number),
        ),
    ])
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) if n.is_nan() => "NaN".to_string(),
        Value::Number(n) if n.is_infinite() => {
            if *n > 0.0 { "inf".to_string() } else { "-inf".to_string() }
        }
        Value::Number(n) => format!("{:.6}", n),
    }
}

/// Render a line chart of the selected variable across the whole run
pub fn render_chart_pane(
    frame: &mut Frame,
    area: Rect,
    engine: &Engine,
    selected: usize,
    step: usize,
    focused: bool,
) {
    let history = engine.history();
    let border_color = if focused {
        DEFAULT_THEME.border_focused
    } else {
        DEFAULT_THEME.border_normal
    };

    let name = match history.columns().get(selected) {
        Some(name) => name.clone(),
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Series ")
                .border_style(Style::default().fg(border_color));
            frame.render_widget(
                Paragraph::new("no recorded history").block(block),
                area,
            );
            return;
        }
    };

    let series = history.series(&name).unwrap_or_default();

    // Downsample long runs so the chart stays responsive
    let stride = (series.len() / 1000).max(1);
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .step_by(stride)
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let (y_min, y_max) = bounds(&points);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let cursor = [(step as f64, series.get(step).copied().unwrap_or(0.0))];
    let datasets = vec![
        Dataset::default()
            .name(name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(DEFAULT_THEME.primary))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(DEFAULT_THEME.secondary))
            .data(&cursor),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} over {} steps ", name, series.len()))
                .border_style(Style::default().fg(border_color)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{}", x_max as usize)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(DEFAULT_THEME.comment))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.3}", y_min)),
                    Span::raw(format!("{:.3}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Y-axis bounds with a little headroom; degenerate series get a unit band
fn bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, y) in points {
        min = min.min(*y);
        max = max.max(*y);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &RunState,
    step: usize,
    total_steps: usize,
    is_playing: bool,
) {
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let (state_text, state_color) = match state {
        RunState::Completed => (" COMPLETED ", DEFAULT_THEME.success),
        RunState::Halted => (" HALTED ", DEFAULT_THEME.secondary),
        RunState::Faulted(_) => (" FAULTED ", DEFAULT_THEME.error),
    };

    let mut left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", step + 1, total_steps.max(1)),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            state_text,
            Style::default()
                .bg(state_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let RunState::Faulted(fault) = state {
        left_spans.push(Span::styled(
            format!(" {} ", fault),
            Style::default()
                .bg(DEFAULT_THEME.bar_bg)
                .fg(DEFAULT_THEME.error),
        ));
    }

    let left = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.fg);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" variable ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled(" ↵/⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ];
    if is_playing {
        right_spans.push(Span::styled(
            " ▶ PLAYING ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right, layout[1]);
}
