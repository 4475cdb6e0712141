//! Subscription form controller and submission state machine
//!
//! The controller owns the four fields and the submission lifecycle:
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──gateway ok──▶ Succeeded
//!   ▲                          │
//!   │                          └──gateway err──▶ Failed(reason)
//!   └──────── edit / reset / retry ◀────────────────┘
//! ```
//!
//! Submission is split into [`FormController::begin_submit`] and
//! [`FormController::resolve`] so an event loop can keep editing fields while
//! the gateway call runs elsewhere. Each attempt is identified by a ticket id;
//! outcomes for any other id are dropped.

use super::error::FormError;
use super::field::{Field, FieldKey, FormFields};
use super::preview::{self, PreviewProjection};
use super::validation::{self, ValidationReport};
use crate::gateway::{Registration, SubmissionGateway, SubmissionOutcome};
use uuid::Uuid;

/// Lifecycle of a form-wide submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Succeeded or Failed
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed(_))
    }
}

/// Handle for one in-flight submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: Uuid,
    registration: Registration,
}

impl SubmissionTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Values captured when the submission started
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn into_parts(self) -> (Uuid, Registration) {
        (self.id, self.registration)
    }
}

/// Owns the form state and drives the submission state machine
#[derive(Debug, Clone, Default)]
pub struct FormController {
    fields: FormFields,
    submission: SubmissionState,
    in_flight: Option<Uuid>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, key: FieldKey) -> &Field {
        self.fields.get(key)
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// Current preview, derived from the fields on every call
    pub fn preview(&self) -> PreviewProjection {
        preview::project(&self.fields)
    }

    /// Replace a field's value and revalidate it
    #[allow(dead_code)]
    pub fn update_field(&mut self, key: FieldKey, value: impl Into<String>) -> &Field {
        self.edit(key, |field| field.set_value(value))
    }

    pub fn push_char(&mut self, key: FieldKey, c: char) -> &Field {
        self.edit(key, |field| field.push_char(c))
    }

    pub fn pop_char(&mut self, key: FieldKey) -> &Field {
        self.edit(key, Field::pop_char)
    }

    /// Append pasted text to a field
    pub fn paste(&mut self, key: FieldKey, text: &str) -> &Field {
        self.edit(key, |field| field.push_str(text))
    }

    fn edit(&mut self, key: FieldKey, apply: impl FnOnce(&mut Field)) -> &Field {
        // Editing after an outcome starts a new attempt. An in-flight request
        // keeps the values it was issued with.
        if self.submission.is_terminal() {
            self.submission = SubmissionState::Idle;
        }

        let field = self.fields.get_mut(key);
        apply(&mut *field);
        field.revalidate();
        field
    }

    /// Validate every field and write all verdicts back at once
    pub fn validate_all(&mut self) -> ValidationReport {
        let report = validation::validate_all(&self.fields);
        for key in FieldKey::ALL {
            self.fields.get_mut(key).set_error(report.error(key));
        }
        report
    }

    /// Start a submission.
    ///
    /// Returns `Ok(None)` when validation fails; the errors are then on the
    /// fields and nothing should be sent. On success the caller must pass the
    /// ticket's registration to the gateway exactly once and report the
    /// outcome through [`FormController::resolve`].
    pub fn begin_submit(&mut self) -> Result<Option<SubmissionTicket>, FormError> {
        if self.submission.is_submitting() {
            tracing::debug!("Submit rejected: a submission is already in flight");
            return Err(FormError::AlreadySubmitting);
        }

        let report = self.validate_all();
        if !report.is_valid() {
            tracing::debug!(
                invalid_fields = report.error_count(),
                "Submit blocked by validation errors"
            );
            self.submission = SubmissionState::Idle;
            return Ok(None);
        }

        let ticket = SubmissionTicket {
            id: Uuid::new_v4(),
            registration: self.fields.registration(),
        };
        self.in_flight = Some(ticket.id);
        self.submission = SubmissionState::Submitting;
        tracing::debug!(ticket = %ticket.id, "Submission started");

        Ok(Some(ticket))
    }

    /// Apply a gateway outcome.
    ///
    /// Returns false when the ticket is not the one in flight; the outcome is
    /// then ignored.
    pub fn resolve(&mut self, ticket_id: Uuid, outcome: SubmissionOutcome) -> bool {
        if self.in_flight != Some(ticket_id) {
            tracing::debug!(ticket = %ticket_id, "Ignoring outcome for stale submission");
            return false;
        }
        self.in_flight = None;

        self.submission = match outcome {
            SubmissionOutcome::Success => {
                tracing::debug!(ticket = %ticket_id, "Submission succeeded");
                SubmissionState::Succeeded
            }
            SubmissionOutcome::Failure(reason) => {
                tracing::debug!(ticket = %ticket_id, %reason, "Submission failed");
                SubmissionState::Failed(reason)
            }
        };
        true
    }

    /// Validate, submit through `gateway`, and wait for the outcome
    #[allow(dead_code)]
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<&SubmissionState, FormError>
    where
        G: SubmissionGateway + ?Sized,
    {
        if let Some(ticket) = self.begin_submit()? {
            let outcome = gateway.register(ticket.registration()).await.into();
            self.resolve(ticket.id(), outcome);
        }
        Ok(&self.submission)
    }

    /// Start a new attempt after a failure
    pub fn begin_retry(&mut self) -> Result<Option<SubmissionTicket>, FormError> {
        if !matches!(self.submission, SubmissionState::Failed(_)) {
            return Err(FormError::NothingToRetry);
        }
        self.begin_submit()
    }

    /// Retry a failed submission through `gateway`
    #[allow(dead_code)]
    pub async fn retry<G>(&mut self, gateway: &G) -> Result<&SubmissionState, FormError>
    where
        G: SubmissionGateway + ?Sized,
    {
        if !matches!(self.submission, SubmissionState::Failed(_)) {
            return Err(FormError::NothingToRetry);
        }
        self.submit(gateway).await
    }

    /// Empty every field and return to Idle
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.submission.is_submitting() {
            return Err(FormError::ResetWhileSubmitting);
        }
        self.fields.clear();
        self.submission = SubmissionState::Idle;
        self.in_flight = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockSubmissionGateway;
    use crate::state::forms::validation::ValidationError;
    use anyhow::anyhow;

    fn filled_controller() -> FormController {
        let mut form = FormController::new();
        form.update_field(FieldKey::Channel, "status");
        form.update_field(FieldKey::Webhook, "https://hooks.slack.com/x");
        form.update_field(FieldKey::Email, "a@b.com");
        form.update_field(FieldKey::Company, "Acme");
        form
    }

    fn gateway_expecting(times: usize) -> MockSubmissionGateway {
        let mut gateway = MockSubmissionGateway::new();
        gateway
            .expect_register()
            .times(times)
            .returning(|_| Ok(()));
        gateway
    }

    mod update_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_value_is_required_for_every_field() {
            let mut form = FormController::new();
            for key in FieldKey::ALL {
                let field = form.update_field(key, "");
                assert_eq!(field.error(), Some(ValidationError::Required), "{key}");
            }
        }

        #[test]
        fn test_revalidates_on_every_change() {
            let mut form = FormController::new();
            let field = form.update_field(FieldKey::Channel, "#status");
            assert_eq!(field.error(), Some(ValidationError::LeadingHash));

            let field = form.update_field(FieldKey::Channel, "status");
            assert!(field.error().is_none());
            assert!(field.is_confirmed());
        }

        #[test]
        fn test_is_idempotent() {
            let mut once = FormController::new();
            once.update_field(FieldKey::Email, "a@b");

            let mut twice = FormController::new();
            twice.update_field(FieldKey::Email, "a@b");
            twice.update_field(FieldKey::Email, "a@b");

            assert_eq!(once.field(FieldKey::Email), twice.field(FieldKey::Email));
            assert_eq!(once.submission(), twice.submission());
        }

        #[test]
        fn test_char_editing_revalidates() {
            let mut form = FormController::new();
            form.push_char(FieldKey::Channel, '#');
            assert_eq!(
                form.field(FieldKey::Channel).error(),
                Some(ValidationError::LeadingHash)
            );

            form.pop_char(FieldKey::Channel);
            assert_eq!(
                form.field(FieldKey::Channel).error(),
                Some(ValidationError::Required)
            );

            form.paste(FieldKey::Channel, "status");
            assert!(form.field(FieldKey::Channel).error().is_none());
        }

        #[test]
        fn test_preview_follows_edits() {
            let mut form = FormController::new();
            form.update_field(FieldKey::Company, "Acme");
            let preview = form.preview();
            assert_eq!(preview.entries[2].value, "Acme");
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_form_succeeds_and_keeps_values() {
            let mut form = filled_controller();
            let mut gateway = MockSubmissionGateway::new();
            gateway
                .expect_register()
                .withf(|r| {
                    r.channel == "status"
                        && r.webhook == "https://hooks.slack.com/x"
                        && r.email == "a@b.com"
                        && r.company == "Acme"
                })
                .times(1)
                .returning(|_| Ok(()));

            let state = form.submit(&gateway).await.unwrap();
            assert_eq!(state, &SubmissionState::Succeeded);

            assert_eq!(form.field(FieldKey::Channel).value(), "status");
            assert_eq!(form.field(FieldKey::Company).value(), "Acme");
            assert!(!form.fields().has_errors());
        }

        #[tokio::test]
        async fn test_leading_hash_blocks_submission() {
            let mut form = filled_controller();
            form.update_field(FieldKey::Channel, "#status");
            let gateway = gateway_expecting(0);

            let state = form.submit(&gateway).await.unwrap();
            assert_eq!(state, &SubmissionState::Idle);
            assert_eq!(
                form.field(FieldKey::Channel).error_message(),
                Some("omit the leading #".to_string())
            );
        }

        #[tokio::test]
        async fn test_empty_form_surfaces_every_error() {
            let mut form = FormController::new();
            let gateway = gateway_expecting(0);

            form.submit(&gateway).await.unwrap();

            assert_eq!(form.submission(), &SubmissionState::Idle);
            for key in FieldKey::ALL {
                assert_eq!(form.field(key).error(), Some(ValidationError::Required));
            }
        }

        #[tokio::test]
        async fn test_gateway_failure_is_reported_verbatim() {
            let mut form = filled_controller();
            let mut gateway = MockSubmissionGateway::new();
            gateway
                .expect_register()
                .times(1)
                .returning(|_| Err(anyhow!("channel_not_found")));

            let state = form.submit(&gateway).await.unwrap();
            assert_eq!(state, &SubmissionState::Failed("channel_not_found".to_string()));
        }

        #[test]
        fn test_begin_submit_enters_submitting() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");
            assert!(form.submission().is_submitting());
            assert_eq!(ticket.registration().channel, "status");
        }

        #[test]
        fn test_invalid_begin_submit_issues_no_ticket() {
            let mut form = FormController::new();
            assert_eq!(form.begin_submit(), Ok(None));
            assert_eq!(form.submission(), &SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_second_submit_while_in_flight_is_rejected() {
            let mut form = filled_controller();
            let gateway = gateway_expecting(1);

            let ticket = form.begin_submit().unwrap().expect("form is valid");
            assert_eq!(
                form.submit(&gateway).await,
                Err(FormError::AlreadySubmitting)
            );
            assert_eq!(form.begin_submit(), Err(FormError::AlreadySubmitting));

            let outcome = gateway.register(ticket.registration()).await.into();
            assert!(form.resolve(ticket.id(), outcome));
            assert_eq!(form.submission(), &SubmissionState::Succeeded);
        }

        #[test]
        fn test_outcome_is_applied_once() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");

            assert!(form.resolve(ticket.id(), SubmissionOutcome::Success));
            assert!(!form.resolve(
                ticket.id(),
                SubmissionOutcome::Failure("late".to_string())
            ));
            assert_eq!(form.submission(), &SubmissionState::Succeeded);
        }

        #[test]
        fn test_unknown_ticket_is_ignored() {
            let mut form = filled_controller();
            let _ticket = form.begin_submit().unwrap().expect("form is valid");

            assert!(!form.resolve(Uuid::new_v4(), SubmissionOutcome::Success));
            assert!(form.submission().is_submitting());
        }

        #[test]
        fn test_unresolved_submission_stays_submitting() {
            let mut form = filled_controller();
            let _ticket = form.begin_submit().unwrap();
            form.update_field(FieldKey::Company, "Other");
            assert!(form.submission().is_submitting());
        }

        #[test]
        fn test_edits_during_submission_do_not_change_snapshot() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");

            form.update_field(FieldKey::Channel, "renamed");
            form.update_field(FieldKey::Webhook, "");

            assert_eq!(ticket.registration().channel, "status");
            assert_eq!(ticket.registration().webhook, "https://hooks.slack.com/x");
            assert_eq!(form.field(FieldKey::Channel).value(), "renamed");
            assert!(form.submission().is_submitting());
        }

        #[test]
        fn test_edit_after_outcome_returns_to_idle() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");
            form.resolve(ticket.id(), SubmissionOutcome::Failure("boom".to_string()));

            form.update_field(FieldKey::Company, "Acme Corp");
            assert_eq!(form.submission(), &SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_resubmit_after_success_sends_again() {
            let mut form = filled_controller();
            let gateway = gateway_expecting(2);

            form.submit(&gateway).await.unwrap();
            let state = form.submit(&gateway).await.unwrap();
            assert_eq!(state, &SubmissionState::Succeeded);
        }
    }

    mod retry {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_retry_after_failure() {
            let mut form = filled_controller();
            let mut gateway = MockSubmissionGateway::new();
            let mut calls = 0;
            gateway.expect_register().times(2).returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(anyhow!("timeout"))
                } else {
                    Ok(())
                }
            });

            form.submit(&gateway).await.unwrap();
            assert_eq!(form.submission(), &SubmissionState::Failed("timeout".to_string()));

            let state = form.retry(&gateway).await.unwrap();
            assert_eq!(state, &SubmissionState::Succeeded);
        }

        #[tokio::test]
        async fn test_retry_without_failure_is_rejected() {
            let mut form = filled_controller();
            let gateway = gateway_expecting(0);
            assert_eq!(form.retry(&gateway).await, Err(FormError::NothingToRetry));
            assert_eq!(form.begin_retry(), Err(FormError::NothingToRetry));
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_clears_fields_and_state() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");
            form.resolve(ticket.id(), SubmissionOutcome::Success);

            form.reset().unwrap();

            assert!(form.fields().iter().all(Field::is_empty));
            assert!(!form.fields().has_errors());
            assert_eq!(form.submission(), &SubmissionState::Idle);
        }

        #[test]
        fn test_reset_while_submitting_is_rejected() {
            let mut form = filled_controller();
            let ticket = form.begin_submit().unwrap().expect("form is valid");

            assert_eq!(form.reset(), Err(FormError::ResetWhileSubmitting));
            assert_eq!(form.field(FieldKey::Company).value(), "Acme");

            assert!(form.resolve(ticket.id(), SubmissionOutcome::Success));
        }

        #[test]
        fn test_outcome_after_reset_is_ignored() {
            let mut form = filled_controller();
            let first = form.begin_submit().unwrap().expect("form is valid");
            form.resolve(first.id(), SubmissionOutcome::Success);
            form.reset().unwrap();

            assert!(!form.resolve(first.id(), SubmissionOutcome::Failure("late".to_string())));
            assert_eq!(form.submission(), &SubmissionState::Idle);
        }
    }
}
