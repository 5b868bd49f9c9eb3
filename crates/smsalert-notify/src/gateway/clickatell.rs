use super::{GatewaySettings, OutboundMessage, RecipientResult, SmsGateway};
use crate::error::GatewayError;
use crate::utils::{truncate_string, MAX_BODY_LENGTH};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use smsalert_common::types::field_value_text;

/// Client for the Clickatell REST API (v1).
pub struct ClickatellClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl ClickatellClient {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        if settings.timeout_secs == 0 {
            return Err(GatewayError::InvalidSettings(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        let base_url = reqwest::Url::parse(&settings.base_url).map_err(|e| {
            GatewayError::InvalidSettings(format!("base_url {}: {e}", settings.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidSettings(format!(
                "base_url {} cannot carry a path",
                settings.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base URL, each escaped as a single path
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
        auth_token: &str,
    ) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(auth_token)
            .header("X-Version", "1")
            .header("Accept", "application/json")
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct BalanceData {
    #[serde(deserialize_with = "deserialize_balance")]
    balance: f64,
}

/// The API reports the balance as a decimal string (e.g. `"297.000"`).
fn deserialize_balance<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BalanceInput {
        Number(f64),
        Text(String),
    }

    match BalanceInput::deserialize(deserializer)? {
        BalanceInput::Number(n) => Ok(n),
        BalanceInput::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
struct CoverageData {
    routable: bool,
}

#[derive(Deserialize)]
struct MessageData {
    #[serde(default)]
    message: Vec<MessageItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageItem {
    #[serde(default)]
    accepted: bool,
    to: String,
    #[serde(default)]
    api_message_id: Option<String>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    description: String,
}

impl ApiErrorBody {
    fn summary(&self) -> String {
        match &self.code {
            Value::Null => self.description.clone(),
            code => format!("{} (code {})", self.description, field_value_text(code)),
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    text: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "is_zero")]
    max_credits: u32,
    #[serde(rename = "maxMessageParts", skip_serializing_if = "is_zero")]
    max_parts: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Maps the HTTP response to the `data` payload or a [`GatewayError`].
async fn read_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
    let status = resp.status();
    let body = resp.text().await?;

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let description = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.summary())
            .unwrap_or_else(|_| truncate_string(&body, MAX_BODY_LENGTH));
        return Err(GatewayError::Auth {
            status: status.as_u16(),
            description,
        });
    }
    if !status.is_success() {
        return Err(GatewayError::Api {
            status: status.as_u16(),
            body: truncate_string(&body, MAX_BODY_LENGTH),
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    Ok(envelope.data)
}

#[async_trait]
impl SmsGateway for ClickatellClient {
    fn name(&self) -> &str {
        "clickatell"
    }

    async fn balance(&self, auth_token: &str) -> Result<f64, GatewayError> {
        let resp = self
            .authorized(self.client.get(self.endpoint(&["account", "balance"])), auth_token)
            .send()
            .await?;
        let data: BalanceData = read_data(resp).await?;
        Ok(data.balance)
    }

    async fn coverage(&self, auth_token: &str, recipient: &str) -> Result<bool, GatewayError> {
        let resp = self
            .authorized(self.client.get(self.endpoint(&["coverage", recipient])), auth_token)
            .send()
            .await?;
        let data: CoverageData = read_data(resp).await?;
        Ok(data.routable)
    }

    async fn send_message(
        &self,
        auth_token: &str,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientResult>, GatewayError> {
        let payload = SendRequest {
            text: &message.text,
            to: &message.recipients,
            max_credits: message.max_credits,
            max_parts: message.max_parts,
        };
        let resp = self
            .authorized(self.client.post(self.endpoint(&["message"])), auth_token)
            .json(&payload)
            .send()
            .await?;
        let data: MessageData = read_data(resp).await?;

        Ok(data
            .message
            .into_iter()
            .map(|item| RecipientResult {
                recipient: item.to,
                accepted: item.accepted,
                message_id: item.api_message_id.filter(|id| !id.is_empty()),
                error: item.error.map(|e| e.summary()),
            })
            .collect())
    }
}
