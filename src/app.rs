//! Application state and core logic

use crate::gateway::{Registration, SubmissionGateway, SubmissionOutcome};
use crate::platform::PASTE_MODIFIER;
use crate::state::{AppState, Focus, FormController, FormError, SubmissionState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Gateway outcome tagged with the ticket it answers and the values that were sent
type OutcomeMessage = (Uuid, Registration, SubmissionOutcome);

/// Main application struct
pub struct App {
    /// The subscription form
    pub form: FormController,
    /// Focus, status line and error dialog state
    pub state: AppState,
    /// Registration backend
    gateway: Arc<dyn SubmissionGateway>,
    /// Finished gateway calls are sent back here
    outcome_tx: UnboundedSender<OutcomeMessage>,
    outcome_rx: UnboundedReceiver<OutcomeMessage>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(gateway: Arc<dyn SubmissionGateway>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            form: FormController::new(),
            state: AppState::default(),
            gateway,
            outcome_tx,
            outcome_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        let focused_field = self.state.focus.field();

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('v') if key.modifiers.contains(PASTE_MODIFIER) => {
                if let Err(err) = self.paste_from_clipboard() {
                    self.push_error(format!("Clipboard unavailable: {err}"));
                }
            }
            KeyCode::Enter => match self.state.focus {
                Focus::GuideButton => self.open_setup_guide(),
                // Enter inside an input submits the form, like the submit button
                Focus::Field(_) | Focus::SubmitButton => self.submit(),
            },
            KeyCode::Char(c) if !ctrl => {
                if let Some(key) = focused_field {
                    self.form.push_char(key, c);
                    self.after_edit();
                }
            }
            KeyCode::Backspace => {
                if let Some(key) = focused_field {
                    self.form.pop_char(key);
                    self.after_edit();
                }
            }
            _ => {}
        }
    }

    /// Insert pasted text into the focused field
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_errors() {
            return;
        }
        if let Some(key) = self.state.focus.field() {
            self.form.paste(key, text);
            self.after_edit();
        }
    }

    fn paste_from_clipboard(&mut self) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        let text = clipboard.get_text()?;
        self.handle_paste(&text);
        Ok(())
    }

    /// Edits clear any message about the previous attempt
    fn after_edit(&mut self) {
        if !self.form.submission().is_submitting() {
            self.state.status_message = None;
        }
    }

    /// Validate and, if valid, send the registration in the background
    pub fn submit(&mut self) {
        let retrying = matches!(self.form.submission(), SubmissionState::Failed(_));
        let started = if retrying {
            self.form.begin_retry()
        } else {
            self.form.begin_submit()
        };

        match started {
            Ok(Some(ticket)) => {
                self.state.status_message = Some("Processing...".to_string());
                let (id, registration) = ticket.into_parts();
                let gateway = Arc::clone(&self.gateway);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let outcome = gateway.register(&registration).await.into();
                    if tx.send((id, registration, outcome)).is_err() {
                        tracing::debug!(ticket = %id, "App closed before submission finished");
                    }
                });
            }
            Ok(None) => {
                let invalid = self.form.fields().iter().filter(|f| f.error().is_some()).count();
                self.state.status_message = Some(format!(
                    "Fix {invalid} field{} before subscribing",
                    if invalid == 1 { "" } else { "s" }
                ));
                if let Some(first) = self.form.fields().iter().find(|f| f.error().is_some()) {
                    self.state.focus = Focus::Field(first.key());
                }
            }
            Err(FormError::AlreadySubmitting) => {
                self.state.status_message = Some("Already subscribing, please wait".to_string());
            }
            Err(err) => self.push_error(err.to_string()),
        }
    }

    /// Clear the form
    pub fn reset(&mut self) {
        match self.form.reset() {
            Ok(()) => {
                self.state.focus = Focus::default();
                self.state.status_message = Some("Form cleared".to_string());
            }
            Err(err) => self.state.status_message = Some(err.to_string()),
        }
    }

    /// The setup guide is not bundled with this build
    pub fn open_setup_guide(&mut self) {
        tracing::debug!("Setup guide requested");
        self.state.status_message =
            Some("The setup guide is not available in this build".to_string());
    }

    /// Apply any gateway outcomes that arrived since the last call
    pub fn poll_outcomes(&mut self) {
        while let Ok((id, registration, outcome)) = self.outcome_rx.try_recv() {
            self.apply_outcome(id, &registration, outcome);
        }
    }

    fn apply_outcome(
        &mut self,
        id: Uuid,
        registration: &Registration,
        outcome: SubmissionOutcome,
    ) {
        if !self.form.resolve(id, outcome) {
            return;
        }
        match self.form.submission() {
            SubmissionState::Succeeded => {
                // The field may have been edited while the request was in flight
                self.state.status_message = Some(format!(
                    "Subscribed! Status updates will be posted to #{}",
                    registration.channel
                ));
            }
            SubmissionState::Failed(reason) => {
                let message = format!("Subscription failed: {reason}");
                self.state.status_message = Some("Subscription failed".to_string());
                self.state.push_error(message);
            }
            SubmissionState::Idle | SubmissionState::Submitting => {}
        }
    }
}
