use base64::{Engine as _, engine::general_purpose};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::TrackerError;

/// The fields of a Twilio inbound-message webhook that the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookMessage {
    /// Sender address, e.g. `whatsapp:+5511999999999`. Replies go here.
    pub from: String,
    /// Message text, expected to be a tracking code.
    pub body: String,
    /// Bot address the user wrote to. Replies are sent from here.
    pub to: String,
}

/// The three invocation shapes the handler accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundRequest {
    /// `{"tracking_code": "..."}`. The code is absent when the key is missing.
    Direct { tracking_code: Option<String> },
    /// `{"From": .., "Body": .., "To": ..}`
    WebhookFields(WebhookMessage),
    /// `{"body": "<base64 form data>", "isBase64Encoded": true}`
    WebhookEncoded(WebhookMessage),
}

impl InboundRequest {
    /// Classify a raw Lambda payload.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when an encoded body cannot be decoded.
    pub fn from_payload(payload: &Value) -> Result<Self, TrackerError> {
        if has_webhook_fields(payload) {
            return Ok(Self::WebhookFields(WebhookMessage {
                from: field_str(payload, "From"),
                body: field_str(payload, "Body"),
                to: field_str(payload, "To"),
            }));
        }

        if let Some(body) = payload.get("body").and_then(Value::as_str) {
            let is_base64 = payload
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let form = if is_base64 {
                decode_base64_body(body)?
            } else {
                body.to_string()
            };
            return Ok(Self::WebhookEncoded(parse_webhook_form(&form)?));
        }

        let tracking_code = payload
            .get("tracking_code")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self::Direct { tracking_code })
    }
}

fn has_webhook_fields(payload: &Value) -> bool {
    ["From", "Body", "To"]
        .iter()
        .any(|key| payload.get(*key).is_some())
}

fn field_str(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Decodes a URL-encoded form component. `+` is treated as a space.
///
/// # Examples
///
/// ```
/// use rastreio::messaging::webhook::decode_url_component;
///
/// assert_eq!(decode_url_component("whatsapp%3A%2B5511").unwrap(), "whatsapp:+5511");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Decode a base64 request body into its UTF-8 text.
///
/// # Errors
///
/// Returns a `ParseError` for invalid base64 or non-UTF-8 content.
pub fn decode_base64_body(encoded: &str) -> Result<String, TrackerError> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    String::from_utf8(bytes)
        .map_err(|e| TrackerError::ParseError(format!("Body is not UTF-8: {}", e)))
}

/// Parses a Twilio webhook form body. Missing fields default to empty.
///
/// # Errors
///
/// Returns a `ParseError` if a key or value has a malformed escape.
pub fn parse_webhook_form(form_data: &str) -> Result<WebhookMessage, TrackerError> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| TrackerError::ParseError(format!("Failed to decode key: {}", e)))?;
            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| TrackerError::ParseError(format!("Failed to decode value: {}", e)))?;
            map.insert(key, value);
        }
    }

    Ok(WebhookMessage {
        from: map.remove("From").unwrap_or_default(),
        body: map.remove("Body").unwrap_or_default(),
        to: map.remove("To").unwrap_or_default(),
    })
}
