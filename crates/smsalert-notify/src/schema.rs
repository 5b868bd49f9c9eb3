//! Configuration options an alarm callback asks its host for.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    /// Text input rendered as a password field
    Secret,
    Boolean,
    Number,
}

/// One option shown to the user when configuring the callback.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationField {
    pub key: &'static str,
    pub human_name: &'static str,
    pub kind: FieldKind,
    pub default: Value,
    pub description: &'static str,
    pub optional: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigurationRequest {
    pub fields: Vec<ConfigurationField>,
}

impl ConfigurationRequest {
    pub fn add_field(&mut self, field: ConfigurationField) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigurationField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Options understood by the Clickatell alarm callback.
pub fn clickatell_configuration() -> ConfigurationRequest {
    let mut request = ConfigurationRequest::default();
    request
        .add_field(ConfigurationField {
            key: "auth_token",
            human_name: "Clickatell AuthToken",
            kind: FieldKind::Secret,
            default: Value::from(""),
            description: "Authentication token for the Clickatell REST API",
            optional: false,
        })
        .add_field(ConfigurationField {
            key: "recipients",
            human_name: "Recipients of short message",
            kind: FieldKind::Text,
            default: Value::from(""),
            description: "Comma separated list of numbers in international format, e.g. 27999112345. No '00', ' ', '+' or '-', just numbers",
            optional: false,
        })
        .add_field(ConfigurationField {
            key: "include_result_description",
            human_name: "Include result description in short message",
            kind: FieldKind::Boolean,
            default: Value::from(true),
            description: "Set to true to include the alert result description, or false to omit it.",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "fields",
            human_name: "Fields to send in short message",
            kind: FieldKind::Text,
            default: Value::from(""),
            description: "Comma separated list of fields to send as message text, e.g. <message>, <id>, <timestamp>, <source>, <stream> or user defined fields. Built-in fields have to be surrounded by '<>'",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "include_field_names",
            human_name: "Include field names in short message",
            kind: FieldKind::Boolean,
            default: Value::from(true),
            description: "Set to true to prefix each field with its name, or false to send field contents only.",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "max_length",
            human_name: "MaxLength",
            kind: FieldKind::Number,
            default: Value::from(0),
            description: "Maximum length of short message (0 = unlimited)",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "max_credits",
            human_name: "MaxCredits",
            kind: FieldKind::Number,
            default: Value::from(0),
            description: "Maximum credits to spend on a short message",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "max_parts",
            human_name: "MaxParts",
            kind: FieldKind::Number,
            default: Value::from(0),
            description: "Maximum number of parts a short message can consist of",
            optional: true,
        })
        .add_field(ConfigurationField {
            key: "static_text",
            human_name: "Static text that prepends the short message",
            kind: FieldKind::Text,
            default: Value::from(""),
            description: "Optional phrase sent at the start of every short message.",
            optional: true,
        });
    request
}
