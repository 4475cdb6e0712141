//! Errors raised by the subscription form

use thiserror::Error;

/// Errors returned by form operations that the caller must react to.
///
/// Per-field validation failures are not represented here: they are stored
/// on the field itself and rendered inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field name outside the fixed set was used
    #[error("unknown form field: {0}")]
    InvalidField(String),

    /// A submission is already in flight
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// Reset was requested while a submission is in flight
    #[error("cannot reset the form while a submission is in progress")]
    ResetWhileSubmitting,

    /// Retry was requested but the last attempt did not fail
    #[error("there is no failed submission to retry")]
    NothingToRetry,
}
