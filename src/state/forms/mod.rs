//! Form domain layer
//!
//! Typed fields, validation rules, the submission state machine, and the
//! preview projection for the subscription form. Nothing here depends on the
//! rendering layer.

mod controller;
mod error;
mod field;
mod preview;
mod validation;

pub use controller::{FormController, SubmissionState};
pub use error::FormError;
pub use field::{Field, FieldKey};
