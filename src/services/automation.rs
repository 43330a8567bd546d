use reqwest::Client;
use std::time::Duration;

use crate::models::automation::AutomationTask;
use crate::services::sse::EventStream;

const RUN_SSE_PATH: &str = "/v1/automation/run-sse";

/// Client for the browser-automation service's streaming run endpoint.
pub struct AutomationClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AutomationClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, AutomationError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Start an automation run and return its event stream.
    ///
    /// Only the response head is awaited here; events are read lazily.
    pub async fn run(
        &self,
        task: &AutomationTask,
    ) -> Result<EventStream<reqwest::Error>, AutomationError> {
        let url = format!("{}{}", self.base_url, RUN_SSE_PATH);

        let response = self
            .http
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(task)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutomationError::Status(status.as_u16()));
        }

        Ok(EventStream::new(response.bytes_stream()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AutomationError {
    #[error("Automation API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Automation API returned status {0}")]
    Status(u16),

    #[error("Automation API stream interrupted: {0}")]
    Stream(reqwest::Error),
}
