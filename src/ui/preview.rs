//! Preview card showing what will be registered

use crate::app::App;
use crate::state::SubmissionState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Style and text for the submission status line
fn status_line(state: &SubmissionState) -> Line<'static> {
    let (text, color) = match state {
        SubmissionState::Idle => ("Not submitted".to_string(), Color::DarkGray),
        SubmissionState::Submitting => ("Subscribing...".to_string(), Color::Yellow),
        SubmissionState::Succeeded => ("Subscribed".to_string(), Color::Green),
        SubmissionState::Failed(reason) => (format!("Failed: {reason}"), Color::Red),
    };
    Line::from(vec![
        Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(text, Style::default().fg(color)),
    ])
}

/// Draw the preview card
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let preview = app.form.preview();

    let mut lines = Vec::new();
    for entry in &preview.entries {
        lines.push(Line::from(Span::styled(
            entry.label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let value_style = if entry.is_set {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.value),
            value_style,
        )));
        lines.push(Line::from(""));
    }
    lines.push(status_line(app.form.submission()));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Preview Configuration ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}
