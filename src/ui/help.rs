//! Help overlay rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let overlay_width = (area.width as f32 * 0.7).min(50.0) as u16;
    let overlay_height = (area.height as f32 * 0.8).min(20.0) as u16;

    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let widget = Paragraph::new(create_help_text()).style(Style::default().fg(Color::White));
    frame.render_widget(widget, inner);
}

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Green)),
        Span::styled(description, Style::default().fg(Color::White)),
    ])
}

/// Create help text content
fn create_help_text() -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    vec![
        Line::from(Span::styled("Global", section_style)),
        key_line("Q", "Quit application"),
        key_line("?", "Toggle help overlay"),
        Line::from(""),
        Line::from(Span::styled("Overlay", section_style)),
        key_line("Space Enter", "Collapse / expand panel"),
        key_line("T", "Show / hide overlay"),
        key_line("P", "Pause / resume sampling"),
        Line::from(""),
        Line::from(Span::styled("Workload", section_style)),
        key_line("+ -", "Add / remove 5ms of load"),
        key_line("J", "Stall one frame for 120ms"),
        Line::from(""),
        Line::from(Span::styled(
            "       [Press ? or Esc to close]",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal_padding = area.width.saturating_sub(width) / 2;
    let vertical_padding = area.height.saturating_sub(height) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_padding),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
