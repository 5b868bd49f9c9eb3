//! Renders an alert event into a single length-bounded short message.

use crate::config::AdapterConfig;
use crate::error::EventError;
use crate::field::FieldSpecifier;
use crate::utils::truncate_chars;
use smsalert_common::types::AlertEvent;

/// Composes the message text for `event`.
///
/// The text starts with the static prefix and the result description (each
/// followed by a space), then one fragment per configured field of the first
/// matching record, in configured order. With a non-zero
/// `max_message_length` the text is cut to exactly that many characters.
///
/// # Errors
///
/// Returns [`EventError::MissingStreamTitle`] if the event has no stream title.
pub fn compose(config: &AdapterConfig, event: &AlertEvent) -> Result<String, EventError> {
    if event.stream_title.is_empty() {
        return Err(EventError::MissingStreamTitle);
    }

    let max_len = config.max_message_length;
    let mut text = String::new();

    if !config.static_prefix_text.is_empty() {
        text.push_str(&config.static_prefix_text);
        text.push(' ');
    }
    if config.include_result_description {
        text.push_str(&event.result_description);
        text.push(' ');
    }

    if let Some(record) = event.first_match() {
        let mut len = text.chars().count();
        for spec in &config.field_specifiers {
            let Some(fragment) = spec.render(event, record, config.include_field_names) else {
                if let FieldSpecifier::Custom(name) = spec {
                    tracing::warn!(field = %name, "Field does not exist in message, skipping");
                }
                continue;
            };
            len += fragment.chars().count();
            text.push_str(&fragment);

            if max_len > 0 && len > max_len {
                break;
            }
        }
    }

    if max_len > 0 {
        let actual = text.chars().count();
        if truncate_chars(&mut text, max_len) {
            tracing::warn!(
                length = actual,
                max_length = max_len,
                "Composed message exceeds max_length, truncating"
            );
        }
    }

    tracing::debug!(message = %text, "Composed short message");
    Ok(text)
}
