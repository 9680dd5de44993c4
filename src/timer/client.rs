//! HTTP client for the platform timer API

use super::{ApiAccess, TimerError, TimerRequest, TimerResponse, TimerService};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const TIMERS_PATH: &str = "/v1/alerts/timers";

/// Timer API client backed by `reqwest`
pub struct AlexaTimerClient {
    client: Client,
}

impl AlexaTimerClient {
    /// A hung API call ends as a network error after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    fn timers_url(endpoint: &str) -> String {
        format!("{}{TIMERS_PATH}", endpoint.trim_end_matches('/'))
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> TimerError {
        let code = status.as_u16();
        let error = match code {
            401 | 403 => TimerError::auth(format!("Timer permission rejected: {body}")),
            400 => TimerError::invalid_request(format!("Invalid timer request: {body}")),
            500..=599 => TimerError::server_error(format!("Timer API error: {body}")),
            _ => TimerError::unknown(format!("HTTP {status}: {body}")),
        };
        error.with_status(code)
    }
}

#[async_trait]
impl TimerService for AlexaTimerClient {
    async fn create_timer(
        &self,
        access: &ApiAccess,
        request: &TimerRequest,
    ) -> Result<TimerResponse, TimerError> {
        let response = self
            .client
            .post(Self::timers_url(&access.endpoint))
            .bearer_auth(&access.token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TimerError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    TimerError::network(format!("Connection failed: {e}"))
                } else {
                    TimerError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TimerError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TimerError::unknown(format!("Failed to parse response: {e} - body: {body}"))
                .with_status(status.as_u16())
        })
    }
}
