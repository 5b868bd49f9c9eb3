use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One underlying log record that matched an alert condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    /// The record's message text
    #[serde(rename = "message")]
    pub message_text: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    /// User defined fields attached to the record, keyed by field name
    #[serde(default, rename = "fields")]
    pub custom_fields: BTreeMap<String, Value>,
}

impl MessageRecord {
    /// Renders the record timestamp as text.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::TimeZone;
    /// use smsalert_common::types::MessageRecord;
    ///
    /// let record = MessageRecord {
    ///     id: "a1".into(),
    ///     message_text: "disk full".into(),
    ///     source: "app1".into(),
    ///     timestamp: chrono::Utc.with_ymd_and_hms(2015, 2, 19, 10, 0, 0).unwrap(),
    ///     custom_fields: Default::default(),
    /// };
    /// assert_eq!(record.timestamp_text(), "2015-02-19T10:00:00.000Z");
    /// ```
    pub fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the text form of a custom field, or `None` if the record has no
    /// field with that name.
    pub fn custom_field_text(&self, name: &str) -> Option<String> {
        self.custom_fields.get(name).map(field_value_text)
    }
}

/// Plain string conversion of a custom field value.
///
/// Strings are rendered without quotes; every other scalar uses its JSON text.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use smsalert_common::types::field_value_text;
///
/// assert_eq!(field_value_text(&json!("eth0")), "eth0");
/// assert_eq!(field_value_text(&json!(42)), "42");
/// assert_eq!(field_value_text(&json!(true)), "true");
/// ```
pub fn field_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The occurrence that triggered an alarm callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Title of the stream the alert condition belongs to
    pub stream_title: String,
    #[serde(default)]
    pub result_description: String,
    /// Records that matched the condition; only the first one is rendered
    #[serde(default)]
    pub matching_messages: Vec<MessageRecord>,
}

impl AlertEvent {
    pub fn first_match(&self) -> Option<&MessageRecord> {
        self.matching_messages.first()
    }
}
