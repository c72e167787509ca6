//! HTTP webhook transport.

use async_trait::async_trait;
use quorum_application::ports::notification_transport::{NotificationTransport, TransportError};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

/// POSTs each message as JSON to a mail relay endpoint.
///
/// Any 2xx status is a success. Other statuses are reported as
/// `Ok(false)` so the delivery loop retries them.
pub struct WebhookTransport {
    client: reqwest::Client,
    url: String,
}

impl WebhookTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quorum-ballot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NotificationTransport for WebhookTransport {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<bool, TransportError> {
        let payload = WebhookPayload {
            to,
            subject,
            html_body,
            text_body,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        debug!("Webhook responded {} for {}", status.as_u16(), to);
        Ok(status.is_success())
    }
}
