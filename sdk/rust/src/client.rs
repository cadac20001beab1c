use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{
    CloseLotteryBody, Envelope, ErrorBody, HealthStatus, LotteryInfo, StartLotteryBody,
    TransactionOutcome,
};

/// Where the gateway listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the gateway's error message when the
    /// body could be parsed, the raw body otherwise.
    #[error("gateway returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SdkError {
    /// HTTP status for [`SdkError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub struct LotteryClient {
    client: Client,
    base_url: String,
}

impl Default for LotteryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl LotteryClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, ...).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the lottery snapshot for `address`.
    pub async fn lottery_info(&self, lottery: &str, address: &str) -> Result<LotteryInfo, SdkError> {
        let req = self
            .client
            .get(self.url(&format!("/api/lottery/{}/{}", lottery, address)));
        self.send_enveloped(req).await
    }

    /// Start the lottery. `signature` is the personal-sign signature of
    /// `"start lottery"` by `address`; `closing_time` is passed to the
    /// contract unchanged.
    pub async fn start_lottery(
        &self,
        lottery: &str,
        address: &str,
        closing_time: u64,
        signature: &str,
    ) -> Result<TransactionOutcome, SdkError> {
        let req = self
            .client
            .post(self.url(&format!("/api/lottery/{}/start", lottery)))
            .json(&StartLotteryBody {
                address,
                closing_time,
                signature,
            });
        self.send_enveloped(req).await
    }

    /// Close the lottery. `signature` is the personal-sign signature of
    /// `"close lottery"` by `address`.
    pub async fn close_lottery(
        &self,
        lottery: &str,
        address: &str,
        signature: &str,
    ) -> Result<TransactionOutcome, SdkError> {
        let req = self
            .client
            .post(self.url(&format!("/api/lottery/{}/close", lottery)))
            .json(&CloseLotteryBody { address, signature });
        self.send_enveloped(req).await
    }

    /// Gateway health. A 503 from an unreachable node is returned as
    /// [`SdkError::Status`].
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let text = self.send(self.client.get(self.url("/health"))).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_enveloped<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, SdkError> {
        let text = self.send(req).await?;
        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        Ok(envelope.result)
    }

    async fn send(&self, req: RequestBuilder) -> Result<String, SdkError> {
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return Err(SdkError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}
