//! Outbound messaging over the Twilio Messages API

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::errors::TrackerError;

/// Anything that can deliver a text to a recipient.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `body` from `from` to `to`. Returns once the provider accepted
    /// the request; delivery itself is not awaited.
    async fn send_message(&self, from: &str, to: &str, body: &str) -> Result<(), TrackerError>;
}

pub struct TwilioClient {
    http: Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    #[must_use]
    pub fn new(api_base: impl Into<String>, account_sid: String, auth_token: String) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into(),
            account_sid,
            auth_token,
        }
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` when either Twilio credential is missing.
    pub fn from_config(config: &AppConfig) -> Result<Self, TrackerError> {
        let account_sid = config
            .twilio_account_sid
            .clone()
            .ok_or_else(|| TrackerError::ConfigError("TWILIO_ACCOUNT_SID is not set".to_string()))?;
        let auth_token = config
            .twilio_auth_token
            .clone()
            .ok_or_else(|| TrackerError::ConfigError("TWILIO_AUTH_TOKEN is not set".to_string()))?;

        Ok(Self::new(config.twilio_api_url.clone(), account_sid, auth_token))
    }

    #[must_use]
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send_message(&self, from: &str, to: &str, body: &str) -> Result<(), TrackerError> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Twilio rejected message: {}", text);
            return Err(TrackerError::MessagingError(format!(
                "Twilio returned status {}",
                status.as_u16()
            )));
        }

        info!(status = status.as_u16(), "Message accepted by Twilio");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_includes_account_sid() {
        let client = TwilioClient::new("https://api.twilio.com/", "AC123".into(), "t".into());
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn from_config_requires_credentials() {
        let config = AppConfig::default();
        let err = TwilioClient::from_config(&config).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("Configuration error: TWILIO_ACCOUNT_SID is not set")
        );
    }
}
