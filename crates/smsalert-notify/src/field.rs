//! Field specifiers and the per-field renderer.

use smsalert_common::types::{AlertEvent, MessageRecord};
use std::fmt;

/// Selects one piece of event data to render into the outbound message.
///
/// Built-in fields are written in angle brackets (`<id>`, `<message>`,
/// `<source>`, `<timestamp>`, `<stream>`); anything else names a custom field
/// of the matching record.
///
/// # Examples
///
/// ```
/// use smsalert_notify::field::FieldSpecifier;
///
/// assert_eq!(FieldSpecifier::parse("<source>"), FieldSpecifier::Source);
/// assert_eq!(
///     FieldSpecifier::parse("facility"),
///     FieldSpecifier::Custom("facility".to_string())
/// );
/// assert_eq!(FieldSpecifier::Timestamp.to_string(), "<timestamp>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpecifier {
    Id,
    Message,
    Source,
    Timestamp,
    Stream,
    Custom(String),
}

impl FieldSpecifier {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "<id>" => FieldSpecifier::Id,
            "<message>" => FieldSpecifier::Message,
            "<source>" => FieldSpecifier::Source,
            "<timestamp>" => FieldSpecifier::Timestamp,
            "<stream>" => FieldSpecifier::Stream,
            other => FieldSpecifier::Custom(other.to_string()),
        }
    }

    /// Used when the `fields` option is left empty.
    pub fn defaults() -> Vec<FieldSpecifier> {
        vec![
            FieldSpecifier::Timestamp,
            FieldSpecifier::Stream,
            FieldSpecifier::Source,
            FieldSpecifier::Message,
        ]
    }

    /// Label written before the value when field names are included.
    pub fn label(&self) -> &str {
        match self {
            FieldSpecifier::Id => "id",
            FieldSpecifier::Message => "message",
            FieldSpecifier::Source => "source",
            FieldSpecifier::Timestamp => "timestamp",
            FieldSpecifier::Stream => "stream",
            FieldSpecifier::Custom(name) => name,
        }
    }

    /// Resolves the value of this field, or `None` for a custom field the
    /// record does not carry.
    pub fn resolve(&self, event: &AlertEvent, record: &MessageRecord) -> Option<String> {
        match self {
            FieldSpecifier::Id => Some(record.id.clone()),
            FieldSpecifier::Message => Some(record.message_text.clone()),
            FieldSpecifier::Source => Some(record.source.clone()),
            FieldSpecifier::Timestamp => Some(record.timestamp_text()),
            FieldSpecifier::Stream => Some(event.stream_title.clone()),
            FieldSpecifier::Custom(name) => record.custom_field_text(name),
        }
    }

    /// Renders `label: value;` (or `value;`), or `None` when the field is
    /// absent from the record.
    pub fn render(
        &self,
        event: &AlertEvent,
        record: &MessageRecord,
        include_name: bool,
    ) -> Option<String> {
        let value = self.resolve(event, record)?;
        if include_name {
            Some(format!("{}: {};", self.label(), value))
        } else {
            Some(format!("{value};"))
        }
    }
}

impl fmt::Display for FieldSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpecifier::Custom(name) => write!(f, "{name}"),
            builtin => write!(f, "<{}>", builtin.label()),
        }
    }
}

/// Splits a comma separated option into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
