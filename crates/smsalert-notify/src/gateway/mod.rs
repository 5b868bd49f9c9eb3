//! Contract between the adapter and the SMS gateway that performs delivery.

pub mod clickatell;

use crate::error::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A composed short message ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipients: Vec<String>,
    pub text: String,
    /// Upper bound on credits spent; 0 leaves it to the gateway
    pub max_credits: u32,
    /// Upper bound on message parts; 0 leaves it to the gateway
    pub max_parts: u32,
}

/// Gateway verdict for one recipient of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientResult {
    pub recipient: String,
    pub accepted: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Remote SMS gateway used by the adapter.
///
/// Implementations perform blocking network calls from the caller's point of
/// view and never retry on their own.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Gateway name used in log output (e.g. `"clickatell"`).
    fn name(&self) -> &str;

    /// Returns the account balance for `auth_token`.
    async fn balance(&self, auth_token: &str) -> Result<f64, GatewayError>;

    /// Returns whether `recipient` can be reached through the gateway.
    async fn coverage(&self, auth_token: &str, recipient: &str) -> Result<bool, GatewayError>;

    /// Sends `message` to all of its recipients in one request.
    async fn send_message(
        &self,
        auth_token: &str,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientResult>, GatewayError>;
}

/// Connection settings for a gateway client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Send attempts per alert event; 1 disables retry. Only connection
    /// failures and 5xx answers are retried.
    #[serde(default = "default_send_attempts")]
    pub send_attempts: u32,
}

fn default_base_url() -> String {
    "https://api.clickatell.com/rest".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_send_attempts() -> u32 {
    1
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            send_attempts: default_send_attempts(),
        }
    }
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
