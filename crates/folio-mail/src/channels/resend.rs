//! Resend transactional email channel

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::traits::{ChannelKind, Envelope, MailChannel};
use crate::errors::MailError;

/// Channel backed by the Resend HTTP API. Preferred over SMTP for
/// deliverability when an API key and a verified sender are configured.
pub struct ResendChannel {
    client: Client,
    api_key: String,
    from_address: String,
    from_name: Option<String>,
    base_url: String,
}

impl ResendChannel {
    const BASE_URL: &'static str = "https://api.resend.com";

    pub fn new(
        api_key: impl Into<String>,
        from_address: impl Into<String>,
        from_name: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            from_address: from_address.into(),
            from_name,
            base_url: Self::BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn from_header(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        }
    }
}

// Resend API request/response types
#[derive(Debug, Serialize)]
struct ResendSendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
    html: String,
}

#[derive(Debug, Deserialize)]
struct ResendSendResponse {
    id: String,
}

#[async_trait]
impl MailChannel for ResendChannel {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        debug!("Sending email via Resend to: {}", envelope.to);

        let request = ResendSendRequest {
            from: self.from_header(),
            to: vec![envelope.to.clone()],
            subject: envelope.subject.clone(),
            text: envelope.text.clone(),
            html: envelope.html.clone(),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::Resend(format!("Failed to send email: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Failed to send email via Resend ({}): {}", status, body);
            return Err(MailError::Resend(format!(
                "Failed to send email ({}): {}",
                status, body
            )));
        }

        let send_response: ResendSendResponse = response
            .json()
            .await
            .map_err(|e| MailError::Resend(format!("Failed to parse send response: {}", e)))?;

        debug!("Email sent via Resend, id: {}", send_response.id);

        Ok(())
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Resend
    }
}
