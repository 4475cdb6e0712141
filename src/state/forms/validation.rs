//! Validation rules for the subscription form
//!
//! Every rule looks at a single field; no rule depends on another field's
//! value. A value that is blank after trimming is always `Required`.

use super::field::{FieldKey, FormFields};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scheme every webhook URL must start with
const HTTPS_SCHEME: &str = "https://";

/// Validation verdict for a single field.
///
/// The `Display` text is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required")]
    Required,
    #[error("omit the leading #")]
    LeadingHash,
    #[error("must be a valid HTTPS URL")]
    InvalidWebhookUrl,
    #[error("must be a valid email address")]
    InvalidEmail,
}

/// Validate one field value against the rule for its key
pub fn validate(key: FieldKey, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required);
    }

    match key {
        FieldKey::Channel => validate_channel(value),
        FieldKey::Webhook => validate_webhook(value),
        FieldKey::Email => validate_email(value),
        FieldKey::Company => Ok(()),
    }
}

fn validate_channel(value: &str) -> Result<(), ValidationError> {
    if value.starts_with('#') {
        Err(ValidationError::LeadingHash)
    } else {
        Ok(())
    }
}

fn validate_webhook(value: &str) -> Result<(), ValidationError> {
    match value.strip_prefix(HTTPS_SCHEME) {
        Some(rest) if !rest.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidWebhookUrl),
    }
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Outcome of validating every field at once
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    verdicts: BTreeMap<FieldKey, Option<ValidationError>>,
}

impl ValidationReport {
    /// Error for a key, `None` if the field passed
    pub fn error(&self, key: FieldKey) -> Option<ValidationError> {
        self.verdicts.get(&key).copied().flatten()
    }

    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.verdicts.values().all(Option::is_none)
    }

    /// Iterate over the fields that failed
    pub fn errors(&self) -> impl Iterator<Item = (FieldKey, ValidationError)> + '_ {
        self.verdicts
            .iter()
            .filter_map(|(key, verdict)| verdict.map(|err| (*key, err)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Validate every field, collecting all failures instead of stopping at the first
pub fn validate_all(fields: &FormFields) -> ValidationReport {
    let verdicts = fields
        .iter()
        .map(|field| (field.key(), validate(field.key(), field.value()).err()))
        .collect();
    ValidationReport { verdicts }
}
