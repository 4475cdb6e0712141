//! Field rendering utilities for forms

use crate::state::Field;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows used by one field: bordered input box plus a message line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its inline error or hint underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &Field, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = if field.error().is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let key = field.key();
    let mut spans = if field.is_empty() {
        vec![Span::styled(
            key.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        vec![Span::raw(field.value())]
    };
    if is_active {
        // Cursor sits after the text, or before the placeholder
        let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
        if field.is_empty() {
            spans.insert(0, cursor);
        } else {
            spans.push(cursor);
        }
    }

    let mut block = Block::default()
        .title(format!(" {} ", key.label()))
        .borders(Borders::ALL)
        .border_style(border_style);
    if field.is_confirmed() {
        block = block.title_top(
            Line::from(Span::styled(" ✓ ", Style::default().fg(Color::Green))).right_aligned(),
        );
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    let message = match field.error_message() {
        Some(error) => Line::from(Span::styled(
            format!(" ⚠ {error}"),
            Style::default().fg(Color::Red),
        )),
        None if is_active => Line::from(Span::styled(
            format!(" {}", key.hint()),
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(message), chunks[1]);
}
