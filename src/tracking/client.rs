//! Melhor Rastreio GraphQL client
//!
//! Sends the `searchParcel` mutation and hands back the JSON body untouched so
//! callers can inspect GraphQL `errors` before trusting `data`.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::carrier::Carrier;
use crate::core::config::AppConfig;
use crate::core::models::GraphQlResponse;
use crate::errors::TrackerError;

pub const SEARCH_PARCEL_MUTATION: &str = r"
mutation searchParcel ($tracker: TrackerSearchInput!) {
    result: searchParcel (tracker: $tracker) {
        id
        createdAt
        updatedAt
        lastStatus
        lastSyncTracker
        nextSyncTracker
        pudos {
            type
            trackingCode
        }
        trackers {
            type
            shippingService
            trackingCode
        }
        trackingEvents {
            trackerType
            trackingCode
            createdAt
            translatedEventId
            description
            title
            to
            from
            location {
                zipcode
                address
                locality
                number
                complement
                city
                state
                country
            }
            additionalInfo
        }
        pudoEvents {
            pudoType
            trackingCode
            createdAt
            translatedEventId
            description
            title
            from
            to
            location {
                zipcode
                address
                locality
                number
                complement
                city
                state
                country
            }
            additionalInfo
        }
    }
}
";

/// Build the JSON body for the `searchParcel` mutation.
#[must_use]
pub fn build_search_payload(tracking_code: &str, carrier: Carrier) -> Value {
    json!({
        "query": SEARCH_PARCEL_MUTATION,
        "variables": {
            "tracker": {
                "trackingCode": tracking_code,
                "type": carrier.as_str(),
            }
        }
    })
}

pub struct TrackingClient {
    http: Client,
    endpoint: String,
}

impl TrackingClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tracking_api_url.clone())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query the tracking API and return the response body verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::ServerError`] for any status other than 200,
    /// whatever the body says, and `HttpError`/`ParseError` when the request
    /// cannot be sent or the body is not JSON.
    pub async fn search_parcel(
        &self,
        tracking_code: &str,
        carrier: Carrier,
    ) -> Result<Value, TrackerError> {
        let payload = build_search_payload(tracking_code, carrier);
        info!(carrier = %carrier, endpoint = %self.endpoint, "Querying tracking API");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Tracking API returned an error status");
            return Err(TrackerError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        #[cfg(feature = "debug-logs")]
        tracing::debug!("Tracking API response: {}", body);

        Ok(serde_json::from_str(&body)?)
    }
}

/// Typed view of a verbatim API response.
///
/// # Errors
///
/// Returns a `ParseError` if the body does not have the expected shape.
pub fn parse_search_response(body: &Value) -> Result<GraphQlResponse, TrackerError> {
    GraphQlResponse::deserialize(body)
        .map_err(|e| TrackerError::ParseError(format!("Unexpected tracking response: {e}")))
}
