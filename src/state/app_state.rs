//! Application state definitions

use super::forms::FieldKey;
use std::collections::VecDeque;

/// Which element of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldKey),
    SubmitButton,
    GuideButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldKey::Channel)
    }
}

impl Focus {
    /// Focus order: the four fields, then the buttons
    const ORDER: [Focus; 6] = [
        Focus::Field(FieldKey::Channel),
        Focus::Field(FieldKey::Webhook),
        Focus::Field(FieldKey::Email),
        Focus::Field(FieldKey::Company),
        Focus::SubmitButton,
        Focus::GuideButton,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let count = Self::ORDER.len();
        Self::ORDER[(self.position() + count - 1) % count]
    }

    /// The focused field, if focus is on an input
    pub fn field(self) -> Option<FieldKey> {
        match self {
            Focus::Field(key) => Some(key),
            _ => None,
        }
    }
}

/// UI state that lives alongside the form
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: Focus,
    /// One-line message shown in the status bar
    pub status_message: Option<String>,
    /// Errors waiting to be shown in the modal dialog, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently displayed
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Dismiss the displayed error, revealing the next one
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }
}
