//! Subscription form: the four inputs and the action buttons

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FieldKey, Focus, SubmissionState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Label of the submit button for a given submission state
pub fn submit_label(state: &SubmissionState) -> &'static str {
    match state {
        SubmissionState::Submitting => "Processing...",
        SubmissionState::Failed(_) => "Retry",
        SubmissionState::Idle | SubmissionState::Succeeded => "Subscribe Now",
    }
}

/// Draw the subscription form
pub fn draw_subscribe_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Subscribe ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FieldKey::ALL
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Buttons
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let focus = app.state.focus;
    for key in FieldKey::ALL {
        draw_field(
            frame,
            chunks[key.index()],
            app.form.field(key),
            focus == Focus::Field(key),
        );
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(18)])
        .split(chunks[FieldKey::ALL.len()]);

    let submission = app.form.submission();
    render_button(
        frame,
        buttons[0],
        submit_label(submission),
        focus == Focus::SubmitButton,
        !submission.is_submitting(),
    );
    render_button(
        frame,
        buttons[1],
        "Setup Guide",
        focus == Focus::GuideButton,
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_label_tracks_state() {
        assert_eq!(submit_label(&SubmissionState::Idle), "Subscribe Now");
        assert_eq!(submit_label(&SubmissionState::Submitting), "Processing...");
        assert_eq!(submit_label(&SubmissionState::Succeeded), "Subscribe Now");
        assert_eq!(
            submit_label(&SubmissionState::Failed("x".to_string())),
            "Retry"
        );
    }
}
