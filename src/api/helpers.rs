//! Response builders and the user-facing status strings shared by handlers.

use serde_json::{Value, json};

use crate::errors::TrackerError;

pub const MISSING_TRACKING_CODE: &str = "Tracking code is required.";
pub const PROVIDER_NOT_IDENTIFIED: &str = "Provider could not be identified.";
pub const SERVER_ERROR: &str = "Unable to complete the request due to an error from the server.";
pub const REQUEST_FAILED: &str = "Unable to complete the request.";
pub const MESSAGE_SENT: &str = "Message sent.";

/// Returns `{"message": text}`.
#[must_use]
pub fn message_response(text: &str) -> Value {
    json!({ "message": text })
}

/// Converts an unexpected failure into the generic boundary response.
#[must_use]
pub fn error_response(error: &TrackerError) -> Value {
    message_response(&format!("An error occurred: {error}"))
}
