//! UI module
//!
//! Draws the demo scene and, on top of it, the FPS overlay.

mod help;
pub mod overlay;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::{AppState, BASE_FRAME_MS};

/// Main render function - draws the entire UI
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    if size.width < 30 || size.height < 10 {
        render_size_warning(frame, size);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Scene
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_title_bar(frame, main_chunks[0]);
    render_scene(frame, main_chunks[1], state);
    render_status_bar(frame, main_chunks[2], state);

    if let (Some(report), Some(monitor)) = (&state.last_report, state.overlay.monitor()) {
        overlay::render_overlay(
            frame,
            main_chunks[1],
            report,
            monitor.position(),
            state.capabilities,
        );
    }

    if state.show_help {
        help::render_help_overlay(frame, size);
    }
}

/// Render warning when terminal is too small
fn render_size_warning(frame: &mut Frame, area: Rect) {
    let warning = Paragraph::new("Terminal too small!\nMinimum: 30x10")
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(warning, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " fpsmon ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" │ "),
        Span::styled("[?]", Style::default().fg(Color::Green)),
        Span::raw(" Help  "),
        Span::styled("[Q]", Style::default().fg(Color::Red)),
        Span::raw(" Quit "),
    ]);

    let widget =
        Paragraph::new(title).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(widget, area);
}

/// The synthetic workload the overlay is measuring
fn render_scene(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Workload ",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let key_style = Style::default().fg(Color::Green);
    let value_style = Style::default().fg(Color::Yellow);
    let budget = BASE_FRAME_MS + state.workload.extra_load_ms;

    let lines = vec![
        Line::from(vec![
            Span::raw("Frame budget: "),
            Span::styled(format!("{}ms", budget), value_style),
            Span::raw(format!(
                " ({} base + {} extra)",
                BASE_FRAME_MS, state.workload.extra_load_ms
            )),
        ]),
        Line::from(vec![
            Span::raw("Frames drawn: "),
            Span::styled(state.frames_drawn.to_string(), value_style),
        ]),
        Line::from(vec![
            Span::raw("Sampling:     "),
            Span::styled(
                if state.sampling() { "running" } else { "paused" },
                value_style,
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[+/-]", key_style),
            Span::raw(" load  "),
            Span::styled("[J]", key_style),
            Span::raw(" jank  "),
            Span::styled("[Space]", key_style),
            Span::raw(" collapse  "),
            Span::styled("[T]", key_style),
            Span::raw(" toggle  "),
            Span::styled("[P]", key_style),
            Span::raw(" pause"),
        ]),
    ];

    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let info = format!("Colors: {}", state.capabilities.color_support.name());

    let spacing = (area.width as usize)
        .saturating_sub(state.status_message.chars().count())
        .saturating_sub(info.len())
        .saturating_sub(2);

    let status = Line::from(vec![
        Span::raw(" "),
        Span::styled(&state.status_message, Style::default().fg(Color::White)),
        Span::raw(" ".repeat(spacing)),
        Span::styled(&info, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]);

    let widget =
        Paragraph::new(status).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(widget, area);
}
