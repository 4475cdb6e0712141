//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod preview;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    layout::draw_header(frame, areas.header);
    forms::draw_subscribe_form(frame, areas.form, app);
    preview::draw(frame, areas.preview, app);
    layout::draw_status_bar(frame, areas.status_bar, app);

    // Modal error dialog goes on top of everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
