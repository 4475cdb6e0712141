//! Layout components (header, body split, status bar)

use crate::app::App;
use crate::platform::{PASTE_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen regions
pub struct AppLayout {
    pub header: Rect,
    pub form: Rect,
    pub preview: Rect,
    pub status_bar: Rect,
}

/// Split the screen into header, form, preview and status bar
pub fn create_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + preview
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        form: body[0],
        preview: body[1],
        status_bar: rows[2],
    }
}

/// Draw the title and tagline
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Subscribe to Shopify Status Updates",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Get real-time notifications about Shopify's system status directly in your Slack channel.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Draw the status bar: the latest message, or key help when there is none
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.state.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(vec![
            Span::styled(" Tab", Style::default().fg(Color::Cyan)),
            Span::raw(": next field  "),
            Span::styled(SUBMIT_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": subscribe  "),
            Span::styled(PASTE_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": paste  "),
            Span::styled(RESET_SHORTCUT, Style::default().fg(Color::Cyan)),
            Span::raw(": reset  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(": quit"),
        ])
        .style(Style::default().fg(Color::DarkGray)),
    };

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_full_height() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = create_layout(area);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.status_bar.y, 29);
        assert_eq!(layout.form.height, 26);
        assert_eq!(layout.form.height, layout.preview.height);
    }

    #[test]
    fn test_form_is_left_of_preview() {
        let layout = create_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.form.x, 0);
        assert_eq!(layout.preview.x, layout.form.width);
        assert_eq!(layout.form.width + layout.preview.width, 100);
    }
}
