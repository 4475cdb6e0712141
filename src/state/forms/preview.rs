//! Read-only preview of the subscription being configured

use super::field::{FieldKey, FormFields};

/// Shown in place of an empty value
pub const NOT_SET: &str = "Not set";

/// Fields that appear in the preview. The webhook URL is a credential and is never shown.
pub const PREVIEW_KEYS: [FieldKey; 3] = [FieldKey::Channel, FieldKey::Email, FieldKey::Company];

/// One line of the preview card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    #[allow(dead_code)]
    pub key: FieldKey,
    pub label: &'static str,
    pub value: String,
    /// False when `value` is the [`NOT_SET`] sentinel
    pub is_set: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewProjection {
    pub entries: Vec<PreviewEntry>,
}

fn preview_label(key: FieldKey) -> &'static str {
    match key {
        FieldKey::Channel => "Slack Channel",
        FieldKey::Webhook => "Webhook",
        FieldKey::Email => "Email",
        FieldKey::Company => "Company",
    }
}

/// Build the preview from the current field values
pub fn project(fields: &FormFields) -> PreviewProjection {
    let entries = PREVIEW_KEYS
        .into_iter()
        .map(|key| {
            let value = fields.get(key).value();
            let is_set = !value.is_empty();
            PreviewEntry {
                key,
                label: preview_label(key),
                value: if is_set {
                    value.to_string()
                } else {
                    NOT_SET.to_string()
                },
                is_set,
            }
        })
        .collect();
    PreviewProjection { entries }
}
