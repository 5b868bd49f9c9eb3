//! SMS alarm callback with a deterministic message composer.
//!
//! A triggered alert is rendered by [`composer::compose`] into one
//! length-bounded text and handed to an [`gateway::SmsGateway`] for delivery
//! to the configured recipients. Configuration is validated once by
//! [`AlarmCallback::initialize`]; the adapter ignores alerts until that
//! succeeds.

pub mod alarm;
pub mod composer;
pub mod config;
pub mod error;
pub mod field;
pub mod gateway;
pub mod plugin;
pub mod schema;
pub mod utils;


use async_trait::async_trait;
use crate::error::ConfigError;
use crate::gateway::RecipientResult;
use crate::schema::ConfigurationRequest;
use serde_json::Value;
use smsalert_common::types::AlertEvent;
use std::collections::BTreeMap;

/// What a single `call` did with an alert event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The callback is not active; nothing was composed or sent.
    Skipped,
    Sent {
        text: String,
        results: Vec<RecipientResult>,
    },
    /// The gateway call failed. Already logged; never retried beyond the
    /// configured attempts.
    Failed { text: String, error: String },
}

/// An adapter invoked by the alerting host once per triggered alert.
///
/// Implementations are created by the corresponding
/// [`plugin::AlarmCallbackPlugin`] and must be safe to call concurrently.
#[async_trait]
pub trait AlarmCallback: Send + Sync {
    /// Validates `config` and activates the callback.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if validation or gateway verification
    /// fails. The callback stays inactive.
    async fn initialize(&self, config: &Value) -> Result<(), ConfigError>;

    /// Options this callback understands.
    fn requested_configuration(&self) -> ConfigurationRequest;

    /// Composes and dispatches a message for `event`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the event itself is malformed. Delivery
    /// failures are reported through [`CallOutcome::Failed`].
    async fn call(&self, event: &AlertEvent) -> error::Result<CallOutcome>;

    /// Raw configuration rendered as `"key-value"` pairs for display.
    async fn attributes(&self) -> BTreeMap<String, String>;

    /// Health probe.
    async fn check_configuration(&self) -> Result<(), ConfigError>;

    fn name(&self) -> &str;
}
