//! Lambda handler - routes the three invocation shapes.
//!
//! - Direct invocation with `tracking_code`: returns the raw tracking response.
//! - Twilio webhook (form fields or encoded body): replies to the sender with
//!   the formatted latest event and returns a status message.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::helpers::{
    MESSAGE_SENT, MISSING_TRACKING_CODE, PROVIDER_NOT_IDENTIFIED, REQUEST_FAILED, SERVER_ERROR,
    error_response, message_response,
};
use crate::carrier::identify_carrier;
use crate::core::config::AppConfig;
use crate::errors::TrackerError;
use crate::formatter::format_tracking_message;
use crate::messaging::{InboundRequest, MessageSender, TwilioClient, WebhookMessage};
use crate::tracking::{TrackingClient, parse_search_response};

pub use self::function_handler as handler;

/// Lambda entry point.
///
/// Request-level failures never surface as `Err`: they are logged and turned
/// into `{"message": "An error occurred: ..."}`.
///
/// # Errors
///
/// Returns an error only when the environment configuration is invalid.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    match handle_event(&config, &event.payload).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Request failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

/// Classify the payload and run the matching flow.
///
/// # Errors
///
/// Returns transport, decoding, configuration and messaging failures.
pub async fn handle_event(config: &AppConfig, payload: &Value) -> Result<Value, TrackerError> {
    let tracking = TrackingClient::from_config(config);

    match InboundRequest::from_payload(payload)? {
        InboundRequest::Direct { tracking_code } => {
            info!("Handling direct invocation");
            handle_direct(&tracking, tracking_code.as_deref()).await
        }
        InboundRequest::WebhookFields(message) | InboundRequest::WebhookEncoded(message) => {
            info!("Handling messaging webhook");
            let sender = TwilioClient::from_config(config)?;
            handle_webhook(&tracking, &sender, &message).await
        }
    }
}

/// Look up a tracking code and return the upstream response untouched.
///
/// GraphQL errors in list form are passed through so the caller sees them;
/// any other `errors` value becomes a generic failure message.
///
/// # Errors
///
/// Returns transport and decoding failures from the tracking API.
pub async fn handle_direct(
    tracking: &TrackingClient,
    tracking_code: Option<&str>,
) -> Result<Value, TrackerError> {
    let Some(code) = tracking_code.filter(|c| !c.is_empty()) else {
        warn!("Missing tracking code");
        return Ok(message_response(MISSING_TRACKING_CODE));
    };

    let Some(carrier) = identify_carrier(code) else {
        warn!("Could not identify carrier");
        return Ok(message_response(PROVIDER_NOT_IDENTIFIED));
    };

    let body = match tracking.search_parcel(code, carrier).await {
        Ok(body) => body,
        Err(TrackerError::ServerError { .. }) => return Ok(message_response(SERVER_ERROR)),
        Err(e) => return Err(e),
    };

    match body.get("errors") {
        Some(errors) if errors.is_array() => {
            warn!("Tracking API returned GraphQL errors");
            Ok(body)
        }
        Some(_) => Ok(message_response(REQUEST_FAILED)),
        None => Ok(body),
    }
}

/// Reply to a webhook message with the latest status of its tracking code.
///
/// When the webhook carries no sender address the reply is only returned.
///
/// # Errors
///
/// Returns transport and decoding failures, and messaging failures.
pub async fn handle_webhook(
    tracking: &TrackingClient,
    sender: &dyn MessageSender,
    message: &WebhookMessage,
) -> Result<Value, TrackerError> {
    let reply = build_reply(tracking, &message.body).await?;

    if message.from.is_empty() {
        warn!("Webhook has no sender address; returning reply without sending");
        return Ok(message_response(&reply));
    }

    sender
        .send_message(&message.to, &message.from, &reply)
        .await?;
    info!("Reply sent");

    Ok(message_response(MESSAGE_SENT))
}

/// Produce the text sent back to a messaging user for `tracking_code`.
///
/// # Errors
///
/// Returns transport and decoding failures from the tracking API.
pub async fn build_reply(
    tracking: &TrackingClient,
    tracking_code: &str,
) -> Result<String, TrackerError> {
    if tracking_code.is_empty() {
        return Ok(MISSING_TRACKING_CODE.to_string());
    }

    let Some(carrier) = identify_carrier(tracking_code) else {
        return Ok(PROVIDER_NOT_IDENTIFIED.to_string());
    };

    let body = match tracking.search_parcel(tracking_code, carrier).await {
        Ok(body) => body,
        Err(TrackerError::ServerError { .. }) => return Ok(SERVER_ERROR.to_string()),
        Err(e) => return Err(e),
    };

    let response = parse_search_response(&body)?;
    if response.errors.is_some() {
        warn!("Tracking API returned GraphQL errors");
        return Ok(REQUEST_FAILED.to_string());
    }

    let result = response.data.and_then(|d| d.result);
    Ok(format_tracking_message(result.as_ref()))
}
