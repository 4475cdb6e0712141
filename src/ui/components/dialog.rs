//! Modal error dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MAX_WIDTH: u16 = 60;

/// Center a `width` x `height` box inside `area`, shrinking it to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rows needed to show `message` wrapped at `inner_width` columns
fn wrapped_rows(message: &str, inner_width: u16) -> u16 {
    let inner_width = usize::from(inner_width.max(1));
    message
        .split('\n')
        .map(|line| line.chars().count().max(1).div_ceil(inner_width))
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let area = frame.area();
    let width = MAX_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(4);
    // borders + blank line + hint line
    let height = wrapped_rows(error_message, inner_width).saturating_add(4);
    let dialog_area = centered(area, width, height);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = error_message.split('\n').map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ]));

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    " Error ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}
