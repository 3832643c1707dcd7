use serde::{Deserialize, Serialize};

/// A column the ingestion schema recognizes, with the rule applied to its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Canonical (lower-case) column name.
    pub name: String,
    pub rule: FieldRule,
}

/// Per-field value rule. `Text` only requires presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRule {
    Text,
    Email,
    Phone,
    Date,
}

impl FieldRule {
    /// Human-readable name used in row issue messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldRule::Text => "text",
            FieldRule::Email => "email address",
            FieldRule::Phone => "phone number",
            FieldRule::Date => "date (YYYY-MM-DD)",
        }
    }
}
