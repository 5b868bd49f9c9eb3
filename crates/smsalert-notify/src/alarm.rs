use crate::composer::compose;
use crate::config::{self, AdapterConfig, RawConfig};
use crate::error::{ConfigError, GatewayError, Result};
use crate::gateway::{OutboundMessage, RecipientResult, SmsGateway};
use crate::plugin::CLICKATELL_METADATA;
use crate::schema::{clickatell_configuration, ConfigurationRequest};
use crate::utils::redact_sensitive_json;
use crate::{AlarmCallback, CallOutcome};
use async_trait::async_trait;
use serde_json::Value;
use smsalert_common::types::{field_value_text, AlertEvent};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Activation state of an adapter. Only `initialize` and `deactivate`
/// change it.
#[derive(Debug, Clone)]
pub enum AdapterState {
    Uninitialized,
    Active(Arc<AdapterConfig>),
    Failed,
}

struct Inner {
    state: AdapterState,
    /// Configuration as last handed to `initialize`, kept for `attributes`
    raw: Option<Value>,
}

/// Alarm callback that sends triggered alerts as SMS through an
/// [`SmsGateway`].
pub struct ClickatellAlarm {
    gateway: Arc<dyn SmsGateway>,
    send_attempts: u32,
    inner: RwLock<Inner>,
}

impl ClickatellAlarm {
    /// `send_attempts` below 2 means a single attempt per alert event.
    pub fn new(gateway: Arc<dyn SmsGateway>, send_attempts: u32) -> Self {
        Self {
            gateway,
            send_attempts: send_attempts.max(1),
            inner: RwLock::new(Inner {
                state: AdapterState::Uninitialized,
                raw: None,
            }),
        }
    }

    pub async fn state(&self) -> AdapterState {
        self.inner.read().await.state.clone()
    }

    pub async fn is_active(&self) -> bool {
        matches!(self.inner.read().await.state, AdapterState::Active(_))
    }

    /// Returns the adapter to `Uninitialized` and drops its configuration.
    pub async fn deactivate(&self) {
        let mut inner = self.inner.write().await;
        inner.state = AdapterState::Uninitialized;
        inner.raw = None;
        tracing::info!(callback = CLICKATELL_METADATA.name, "Alarm callback deactivated");
    }

    async fn validate(&self, raw: &Value) -> std::result::Result<AdapterConfig, ConfigError> {
        let raw = RawConfig::from_value(raw)?;
        config::validate(&raw, self.gateway.as_ref()).await
    }

    /// Sends once, or up to `send_attempts` times with exponential backoff for
    /// retryable gateway errors.
    async fn dispatch(
        &self,
        auth_token: &str,
        message: &OutboundMessage,
    ) -> std::result::Result<Vec<RecipientResult>, GatewayError> {
        let mut attempt = 0u32;
        loop {
            match self.gateway.send_message(auth_token, message).await {
                Ok(results) => return Ok(results),
                Err(e) if e.is_retryable() && attempt + 1 < self.send_attempts => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        gateway = self.gateway.name(),
                        error = %e,
                        "SMS send failed, retrying"
                    );
                    let backoff = std::time::Duration::from_millis(100 * 2u64.pow(attempt));
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl AlarmCallback for ClickatellAlarm {
    async fn initialize(&self, raw: &Value) -> std::result::Result<(), ConfigError> {
        tracing::debug!("Verifying configuration");
        let outcome = self.validate(raw).await;

        let mut inner = self.inner.write().await;
        inner.raw = Some(raw.clone());
        match outcome {
            Ok(config) => {
                tracing::info!(
                    recipients = config.recipients.len(),
                    fields = config.field_specifiers.len(),
                    "Alarm callback initialized"
                );
                inner.state = AdapterState::Active(Arc::new(config));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Alarm callback initialization failed");
                inner.state = AdapterState::Failed;
                Err(e)
            }
        }
    }

    fn requested_configuration(&self) -> ConfigurationRequest {
        clickatell_configuration()
    }

    async fn call(&self, event: &AlertEvent) -> Result<CallOutcome> {
        let config = match &self.inner.read().await.state {
            AdapterState::Active(config) => Arc::clone(config),
            _ => {
                tracing::debug!(
                    stream = %event.stream_title,
                    "Alarm callback is not active, ignoring alert"
                );
                return Ok(CallOutcome::Skipped);
            }
        };

        let text = compose(&config, event)?;
        let message = OutboundMessage {
            recipients: config.recipients.clone(),
            text,
            max_credits: config.max_credits,
            max_parts: config.max_parts,
        };

        match self.dispatch(&config.auth_token, &message).await {
            Ok(results) => {
                for rejected in results.iter().filter(|r| !r.accepted) {
                    tracing::warn!(
                        recipient = %rejected.recipient,
                        error = rejected.error.as_deref().unwrap_or("-"),
                        "Gateway rejected message for recipient"
                    );
                }
                Ok(CallOutcome::Sent {
                    text: message.text,
                    results,
                })
            }
            Err(e) => {
                tracing::error!(
                    gateway = self.gateway.name(),
                    stream = %event.stream_title,
                    recipients = message.recipients.len(),
                    auth_failure = e.is_auth(),
                    error = %e,
                    "Failed to send short message"
                );
                Ok(CallOutcome::Failed {
                    text: message.text,
                    error: e.to_string(),
                })
            }
        }
    }

    async fn attributes(&self) -> BTreeMap<String, String> {
        let inner = self.inner.read().await;
        match inner.raw.as_ref().map(redact_sensitive_json) {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(key, value)| {
                    let pair = format!("{key}-{}", field_value_text(&value));
                    (key, pair)
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    async fn check_configuration(&self) -> std::result::Result<(), ConfigError> {
        tracing::info!(callback = CLICKATELL_METADATA.name, "Configuration check requested");
        Ok(())
    }

    fn name(&self) -> &str {
        CLICKATELL_METADATA.name
    }
}
