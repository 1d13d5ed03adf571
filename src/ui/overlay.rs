//! FPS overlay panel
//!
//! Header with the live rate, and while expanded the history graph, the
//! MIN/AVG/MAX/FRAME row and a legend.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::classifier::Status;
use crate::color::{blend_over, to_terminal_color, Rgb};
use crate::config::Position;
use crate::graph::{GraphLayout, GUIDE_ALPHA, GUIDE_DASH};
use crate::monitor::{DetailStats, FrameReport};
use crate::terminal_capabilities::TerminalCapabilities;
use crate::theme::{self, Palette};

/// Panel width while expanded, borders included
pub const EXPANDED_WIDTH: u16 = 44;
/// Panel height while expanded, borders included
pub const EXPANDED_HEIGHT: u16 = 14;
/// Panel size while collapsed, borders included
pub const COLLAPSED_SIZE: (u16, u16) = (24, 3);
/// Rows given to the history graph
const GRAPH_ROWS: u16 = 8;
/// Distance kept from the screen edges
const MARGIN: u16 = 1;

/// Rect of a `width` x `height` panel anchored to a corner of `area`
pub fn anchored_rect(area: Rect, width: u16, height: u16, position: Position) -> Rect {
    let width = width.min(area.width.saturating_sub(MARGIN * 2));
    let height = height.min(area.height.saturating_sub(MARGIN * 2));

    let x = if position.is_left() {
        area.x + MARGIN
    } else {
        (area.x + area.width).saturating_sub(width + MARGIN)
    };
    let y = if position.is_top() {
        area.y + MARGIN
    } else {
        (area.y + area.height).saturating_sub(height + MARGIN)
    };

    Rect::new(x, y, width, height)
}

/// Colors resolved for the current terminal
struct Painter {
    palette: Palette,
    caps: TerminalCapabilities,
}

impl Painter {
    fn color(&self, rgb: Rgb) -> Color {
        to_terminal_color(rgb, self.caps.color_support)
    }

    fn status(&self, status: Status) -> Color {
        self.color(self.palette.status(status))
    }

    /// Status color faded toward the graph background
    fn faded(&self, status: Status, alpha: f64) -> Color {
        self.color(blend_over(self.palette.status(status), self.palette.graph, alpha))
    }
}

/// Render the overlay panel for `report`
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    report: &FrameReport,
    position: Position,
    caps: TerminalCapabilities,
) {
    let painter = Painter {
        palette: theme::active(),
        caps,
    };

    let (width, height) = match report.detail {
        Some(_) => (EXPANDED_WIDTH, EXPANDED_HEIGHT),
        None => COLLAPSED_SIZE,
    };
    let panel = anchored_rect(area, width, height, position);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(painter.color(painter.palette.faint)))
        .style(Style::default().bg(painter.color(painter.palette.panel)));

    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let Some(detail) = &report.detail else {
        render_header(frame, inner, report, &painter, true);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Header
            Constraint::Length(GRAPH_ROWS), // Graph
            Constraint::Length(2),          // Stats
            Constraint::Length(1),          // Legend
        ])
        .split(inner);

    render_header(frame, chunks[0], report, &painter, false);
    render_graph(frame, chunks[1], detail, &painter);
    render_stats(frame, chunks[2], report, detail, &painter);
    render_legend(frame, chunks[3], &painter);
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    report: &FrameReport,
    painter: &Painter,
    collapsed: bool,
) {
    let status = report.stats.status;
    let mut dot_style = Style::default().fg(painter.status(status));
    if status == Status::Bad {
        dot_style = dot_style.add_modifier(Modifier::SLOW_BLINK);
    }

    let left = vec![
        Span::styled("● ", dot_style),
        Span::styled(
            report.stats.average_fps.to_string(),
            Style::default()
                .fg(painter.status(status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" FPS", Style::default().fg(painter.color(painter.palette.label))),
    ];
    let right = format!(
        "{:.1}ms {}",
        report.stats.average_frame_ms,
        if collapsed { "▼" } else { "▲" }
    );

    let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let spacing = (area.width as usize)
        .saturating_sub(left_width)
        .saturating_sub(right.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(spacing)));
    spans.push(Span::styled(
        right,
        Style::default().fg(painter.color(painter.palette.muted)),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_graph(frame: &mut Frame, area: Rect, detail: &DetailStats, painter: &Painter) {
    let layout = GraphLayout::default();
    let marker = if painter.caps.unicode {
        Marker::Braille
    } else {
        Marker::Block
    };

    let canvas = Canvas::default()
        .x_bounds([0.0, layout.width])
        .y_bounds([0.0, layout.height])
        .marker(marker)
        .background_color(painter.color(painter.palette.graph))
        .paint(|ctx| {
            // Canvas y grows upward; layout y is measured from the top
            for guide in layout.guide_lines() {
                let y = layout.height - guide.y;
                let color = painter.faded(guide.status, GUIDE_ALPHA);
                let [on, off] = GUIDE_DASH;
                let mut x = 0.0;
                while x < layout.width {
                    let end = (x + on).min(layout.width);
                    ctx.draw(&CanvasLine::new(x, y, end, y, color));
                    x += on + off;
                }
            }
            ctx.layer();

            for bar in layout.bars(&detail.bars) {
                let center = bar.x + bar.width / 2.0;
                let color = painter.faded(bar.status, bar.alpha);
                ctx.draw(&CanvasLine::new(center, 0.0, center, bar.height, color));
            }
        });

    frame.render_widget(canvas, area);
}

fn render_stats(
    frame: &mut Frame,
    area: Rect,
    report: &FrameReport,
    detail: &DetailStats,
    painter: &Painter,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let neutral = painter.color(painter.palette.label);
    let cells = [
        ("MIN", detail.min_fps.to_string(), painter.status(detail.min_status)),
        (
            "AVG",
            report.stats.average_fps.to_string(),
            painter.status(report.stats.status),
        ),
        ("MAX", detail.max_fps.to_string(), painter.status(detail.max_status)),
        (
            "FRAME",
            format!("{:.1}ms", report.stats.average_frame_ms),
            neutral,
        ),
    ];

    let label_style = Style::default()
        .fg(painter.color(painter.palette.faint))
        .add_modifier(Modifier::BOLD);

    for ((label, value, color), column) in cells.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(label, label_style)).centered(),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ];
        frame.render_widget(Paragraph::new(lines), *column);
    }
}

fn render_legend(frame: &mut Frame, area: Rect, painter: &Painter) {
    let text_style = Style::default().fg(painter.color(painter.palette.muted));
    let mut spans = Vec::new();

    for (status, label) in [
        (Status::Good, "≥55"),
        (Status::Warn, "30–55"),
        (Status::Bad, "<30"),
    ] {
        spans.push(Span::styled("■ ", Style::default().fg(painter.status(status))));
        spans.push(Span::styled(format!("{}  ", label), text_style));
    }
    spans.push(Span::styled(
        "fps",
        Style::default().fg(painter.color(painter.palette.faint)),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
}
