/// Errors raised while validating the adapter configuration.
///
/// Every variant is fatal to activation: the adapter stays inactive and the
/// host receives the error from `initialize`.
///
/// # Examples
///
/// ```rust
/// use smsalert_notify::error::ConfigError;
///
/// let err = ConfigError::InvalidMaxLength(-1);
/// assert!(err.to_string().contains("max_length"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config: auth_token must not be empty")]
    MissingAuthToken,

    #[error("Config: at least one recipient is required")]
    NoRecipients,

    #[error("Config: max_length must be >= 0, got {0}")]
    InvalidMaxLength(i64),

    #[error("Config: max_credits must be >= 0, got {0}")]
    InvalidMaxCredits(i64),

    #[error("Config: max_parts must be >= 0, got {0}")]
    InvalidMaxParts(i64),

    /// The raw configuration could not be parsed at all.
    #[error("Config: invalid configuration: {0}")]
    InvalidConfig(String),

    /// Balance or coverage lookup against the gateway failed.
    #[error("Config: gateway verification failed: {0}")]
    RemoteVerificationFailed(#[source] GatewayError),
}

/// Per-event preconditions. Aborts a single send attempt only.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event: stream title must not be empty")]
    MissingStreamTitle,
}

/// Errors reported by an SMS gateway.
///
/// `Auth` means the gateway rejected the credentials; every other variant is
/// a transport-level failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway: authentication rejected (status={status}): {description}")]
    Auth { status: u16, description: String },

    /// The gateway answered with a non-success status.
    #[error("Gateway: API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    #[error("Gateway: request timed out")]
    Timeout,

    #[error("Gateway: HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gateway: unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client settings cannot produce a working client.
    #[error("Gateway: invalid settings: {0}")]
    InvalidSettings(String),
}

impl GatewayError {
    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth { .. })
    }

    /// Whether a resend cannot duplicate a message the gateway already
    /// accepted. Only connection failures and 5xx answers qualify; a timeout
    /// or an undecodable answer may follow an accepted send.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(e) => e.is_connect(),
            GatewayError::Api { status, .. } => *status >= 500,
            GatewayError::Auth { .. }
            | GatewayError::Timeout
            | GatewayError::Decode(_)
            | GatewayError::InvalidSettings(_) => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(e)
        }
    }
}

/// Errors surfaced to the host by an alarm callback.
#[derive(Debug, thiserror::Error)]
pub enum AlarmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Event(#[from] EventError),
}

/// Convenience `Result` alias for adapter operations.
pub type Result<T> = std::result::Result<T, AlarmError>;
