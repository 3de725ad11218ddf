use std::env;

pub const DEFAULT_TRACKING_API_URL: &str = "https://api.melhorrastreio.com.br/graphql";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tracking_api_url: String,
    pub twilio_api_url: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let tracking_api_url = env::var("TRACKING_API_URL")
            .unwrap_or_else(|_| DEFAULT_TRACKING_API_URL.to_string());
        if !tracking_api_url.starts_with("http") {
            return Err(format!(
                "TRACKING_API_URL: expected an http(s) URL, got '{}'",
                tracking_api_url
            ));
        }

        Ok(Self {
            tracking_api_url,
            twilio_api_url: env::var("TWILIO_API_URL")
                .unwrap_or_else(|_| DEFAULT_TWILIO_API_URL.to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracking_api_url: DEFAULT_TRACKING_API_URL.to_string(),
            twilio_api_url: DEFAULT_TWILIO_API_URL.to_string(),
            twilio_account_sid: None,
            twilio_auth_token: None,
        }
    }
}
