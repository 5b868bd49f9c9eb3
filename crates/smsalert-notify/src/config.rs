use crate::error::ConfigError;
use crate::field::{split_list, FieldSpecifier};
use crate::gateway::SmsGateway;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter configuration as supplied by the host, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Comma separated phone numbers in international format
    #[serde(default)]
    pub recipients: Option<String>,
    #[serde(default = "default_true")]
    pub include_result_description: bool,
    /// Comma separated field specifiers
    #[serde(default)]
    pub fields: Option<String>,
    #[serde(default = "default_true")]
    pub include_field_names: bool,
    #[serde(default)]
    pub max_length: i64,
    #[serde(default)]
    pub max_credits: i64,
    #[serde(default)]
    pub max_parts: i64,
    #[serde(default)]
    pub static_text: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            recipients: None,
            include_result_description: default_true(),
            fields: None,
            include_field_names: default_true(),
            max_length: 0,
            max_credits: 0,
            max_parts: 0,
            static_text: None,
        }
    }
}

impl RawConfig {
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }
}

/// Validated adapter configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub auth_token: String,
    pub recipients: Vec<String>,
    pub field_specifiers: Vec<FieldSpecifier>,
    pub include_field_names: bool,
    pub include_result_description: bool,
    pub static_prefix_text: String,
    /// Maximum message length in characters; 0 means unbounded
    pub max_message_length: usize,
    pub max_credits: u32,
    pub max_parts: u32,
}

impl AdapterConfig {
    /// Local validation of a raw configuration. Does not touch the network.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        let auth_token = raw
            .auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingAuthToken)?
            .to_string();

        let recipients = split_list(raw.recipients.as_deref().unwrap_or_default());
        if recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }
        for recipient in &recipients {
            if !recipient.chars().all(|c| c.is_ascii_digit()) {
                tracing::warn!(
                    recipient = %recipient,
                    "Recipient is not a plain international number (digits only)"
                );
            }
        }

        let mut field_specifiers: Vec<FieldSpecifier> =
            split_list(raw.fields.as_deref().unwrap_or_default())
                .iter()
                .map(|f| FieldSpecifier::parse(f))
                .collect();
        if field_specifiers.is_empty() {
            field_specifiers = FieldSpecifier::defaults();
            tracing::warn!(
                fields = %join_specifiers(&field_specifiers),
                "No fields were specified, using defaults"
            );
        }

        let max_message_length = usize::try_from(raw.max_length)
            .map_err(|_| ConfigError::InvalidMaxLength(raw.max_length))?;
        let max_credits = u32::try_from(raw.max_credits)
            .map_err(|_| ConfigError::InvalidMaxCredits(raw.max_credits))?;
        let max_parts = u32::try_from(raw.max_parts)
            .map_err(|_| ConfigError::InvalidMaxParts(raw.max_parts))?;

        Ok(Self {
            auth_token,
            recipients,
            field_specifiers,
            include_field_names: raw.include_field_names,
            include_result_description: raw.include_result_description,
            static_prefix_text: raw.static_text.clone().unwrap_or_default(),
            max_message_length,
            max_credits,
            max_parts,
        })
    }
}

fn join_specifiers(specs: &[FieldSpecifier]) -> String {
    specs.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}

/// Checks that the gateway accepts the token and logs recipients outside
/// coverage. Uncovered recipients are not an error.
pub async fn verify_remote(
    config: &AdapterConfig,
    gateway: &dyn SmsGateway,
) -> Result<(), ConfigError> {
    tracing::debug!(gateway = gateway.name(), "Connecting to SMS gateway");

    let balance = gateway
        .balance(&config.auth_token)
        .await
        .map_err(ConfigError::RemoteVerificationFailed)?;
    tracing::info!(gateway = gateway.name(), balance, "Current gateway balance");

    for recipient in &config.recipients {
        let routable = gateway
            .coverage(&config.auth_token, recipient)
            .await
            .map_err(ConfigError::RemoteVerificationFailed)?;
        if !routable {
            tracing::error!(
                recipient = %recipient,
                "Recipient is outside coverage, no message will be delivered to it"
            );
        }
    }

    tracing::info!(gateway = gateway.name(), "Gateway verification succeeded");
    Ok(())
}

/// Full validation: local checks, then remote verification.
pub async fn validate(
    raw: &RawConfig,
    gateway: &dyn SmsGateway,
) -> Result<AdapterConfig, ConfigError> {
    let config = AdapterConfig::from_raw(raw)?;
    verify_remote(&config, gateway).await?;
    Ok(config)
}
