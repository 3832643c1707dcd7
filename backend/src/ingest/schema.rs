//! Schema registry: the columns the ingestion pipeline recognizes and the rule
//! applied to each column's values.
//!
//! Matching is case-insensitive. The canonical key of a field is its lower-cased
//! name, and that key is what extracted records are keyed by regardless of how
//! the uploaded header spelled it.

use chrono::NaiveDate;
use common::model::field::{FieldRule, SchemaField};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("valid email regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ().\-]{5,}$").expect("valid phone regex"));

/// The user-data schema accepted by the upload endpoints.
///
/// `email` must look like an address. The phone and date rules are local
/// additions that the upstream user model never checked: `phone_number` must
/// be digits with optional `+ ( ) . -` separators, and both date columns must
/// be `YYYY-MM-DD`. A value that breaks a rule skips its whole row.
pub static USER_DATA_SCHEMA: Lazy<SchemaRegistry> = Lazy::new(|| {
    SchemaRegistry::new([
        ("user_id", FieldRule::Text),
        ("name", FieldRule::Text),
        ("email", FieldRule::Email),
        ("phone_number", FieldRule::Phone),
        ("country", FieldRule::Text),
        ("state", FieldRule::Text),
        ("city", FieldRule::Text),
        ("signup_date", FieldRule::Date),
        ("last_active_date", FieldRule::Date),
    ])
});

/// Immutable set of recognized fields, in declaration order.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    fields: Vec<SchemaField>,
}

impl SchemaRegistry {
    /// Builds a registry. Names are lower-cased; a repeated name keeps its first rule.
    pub fn new<'a>(fields: impl IntoIterator<Item = (&'a str, FieldRule)>) -> Self {
        let mut registry = SchemaRegistry { fields: Vec::new() };
        for (name, rule) in fields {
            let name = name.trim().to_lowercase();
            if registry.rule_for(&name).is_none() {
                registry.fields.push(SchemaField { name, rule });
            }
        }
        registry
    }

    /// Canonical key for a raw header name, if the schema knows it.
    pub fn canonical_key(&self, raw: &str) -> Option<&str> {
        let wanted = raw.trim().to_lowercase();
        self.fields
            .iter()
            .find(|f| f.name == wanted)
            .map(|f| f.name.as_str())
    }

    pub fn rule_for(&self, key: &str) -> Option<FieldRule> {
        self.fields.iter().find(|f| f.name == key).map(|f| f.rule)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Ordered `{name, rule}` list handed to clients.
    pub fn describe(&self) -> Vec<SchemaField> {
        self.fields.clone()
    }
}

/// Checks a non-empty, trimmed value against a field rule.
pub fn validate_value(rule: FieldRule, value: &str) -> bool {
    match rule {
        FieldRule::Text => true,
        FieldRule::Email => EMAIL_PATTERN.is_match(value),
        FieldRule::Phone => {
            PHONE_PATTERN.is_match(value) && value.chars().any(|c| c.is_ascii_digit())
        }
        FieldRule::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
    }
}
