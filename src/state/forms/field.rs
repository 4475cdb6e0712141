//! Form field value objects

use super::error::FormError;
use super::validation::{self, ValidationError};
use crate::gateway::Registration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the four subscription fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Channel,
    Webhook,
    Email,
    Company,
}

impl FieldKey {
    /// All keys in display order
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Channel,
        FieldKey::Webhook,
        FieldKey::Email,
        FieldKey::Company,
    ];

    /// Position of the key in display order
    pub fn index(self) -> usize {
        match self {
            FieldKey::Channel => 0,
            FieldKey::Webhook => 1,
            FieldKey::Email => 2,
            FieldKey::Company => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKey::Channel => "channel",
            FieldKey::Webhook => "webhook",
            FieldKey::Email => "email",
            FieldKey::Company => "company",
        }
    }

    /// Label shown on the input box
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Channel => "Slack Channel Name",
            FieldKey::Webhook => "Slack Webhook URL",
            FieldKey::Email => "Email Address",
            FieldKey::Company => "Company Name",
        }
    }

    /// Help text shown under the focused field
    pub fn hint(self) -> &'static str {
        match self {
            FieldKey::Channel => "Enter your Slack channel name without the # symbol",
            FieldKey::Webhook => "Find this in your Slack app settings",
            FieldKey::Email => "We'll send confirmation and important updates here",
            FieldKey::Company => "This helps us personalize your experience",
        }
    }

    /// Example value shown while the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldKey::Channel => "e.g., shopify-status",
            FieldKey::Webhook => "https://hooks.slack.com/services/...",
            FieldKey::Email => "your@company.com",
            FieldKey::Company => "Acme Inc",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| FormError::InvalidField(s.to_string()))
    }
}

/// A single form field: its raw value and the latest validation verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    key: FieldKey,
    value: String,
    error: Option<ValidationError>,
}

impl Field {
    /// Create an empty, unvalidated field
    pub fn new(key: FieldKey) -> Self {
        Self {
            key,
            value: String::new(),
            error: None,
        }
    }

    pub fn key(&self) -> FieldKey {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Inline error text, if the field is invalid
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|err| err.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// A field is confirmed once it holds a value that passed validation
    pub fn is_confirmed(&self) -> bool {
        !self.value.is_empty() && self.error.is_none()
    }

    /// Replace the value. The previous verdict no longer applies, so it is dropped.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = None;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
        self.error = None;
    }

    /// Append pasted text, dropping line breaks
    pub fn push_str(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        self.error = None;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
        self.error = None;
    }

    /// Clear the value and any verdict
    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }

    /// Recompute the verdict for the current value
    pub fn revalidate(&mut self) -> Option<ValidationError> {
        self.error = validation::validate(self.key, &self.value).err();
        self.error
    }

    pub(super) fn set_error(&mut self, error: Option<ValidationError>) {
        self.error = error;
    }
}

/// The fixed set of four fields, indexed by [`FieldKey`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    fields: [Field; 4],
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            fields: FieldKey::ALL.map(Field::new),
        }
    }
}

impl FormFields {
    pub fn get(&self, key: FieldKey) -> &Field {
        &self.fields[key.index()]
    }

    pub(super) fn get_mut(&mut self, key: FieldKey) -> &mut Field {
        &mut self.fields[key.index()]
    }

    /// Iterate over fields in display order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Replace a field's value and clear its error
    pub fn set_value(&mut self, key: FieldKey, value: impl Into<String>) -> &Field {
        let field = self.get_mut(key);
        field.set_value(value);
        field
    }

    /// Replace a field's value, looking the field up by name
    #[allow(dead_code)]
    pub fn set_value_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<&Field, FormError> {
        let key = name.parse::<FieldKey>()?;
        Ok(self.set_value(key, value))
    }

    /// Empty every field
    pub fn clear(&mut self) {
        self.fields.iter_mut().for_each(Field::clear);
    }

    /// True when any field carries an error
    #[allow(dead_code)]
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Snapshot the current values for submission
    pub fn registration(&self) -> Registration {
        Registration {
            channel: self.get(FieldKey::Channel).value.clone(),
            webhook: self.get(FieldKey::Webhook).value.clone(),
            email: self.get(FieldKey::Email).value.clone(),
            company: self.get(FieldKey::Company).value.clone(),
        }
    }
}
