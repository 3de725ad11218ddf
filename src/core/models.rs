use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level GraphQL envelope returned by the tracking API.
#[derive(Debug, Default, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<SearchParcelData>,
    pub errors: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParcelData {
    pub result: Option<ParcelResult>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParcelResult {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_status: Option<String>,
    pub last_sync_tracker: Option<String>,
    pub next_sync_tracker: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub pudos: Vec<Pudo>,
    #[serde(deserialize_with = "null_as_empty")]
    pub trackers: Vec<Tracker>,
    #[serde(deserialize_with = "null_as_empty")]
    pub tracking_events: Vec<TrackingEvent>,
    #[serde(deserialize_with = "null_as_empty")]
    pub pudo_events: Vec<PudoEvent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tracker {
    #[serde(rename = "type")]
    pub tracker_type: Option<String>,
    pub shipping_service: Option<String>,
    pub tracking_code: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pudo {
    #[serde(rename = "type")]
    pub pudo_type: Option<String>,
    pub tracking_code: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingEvent {
    pub tracker_type: Option<String>,
    pub tracking_code: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub translated_event_id: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub location: Option<Location>,
    pub additional_info: Option<String>,
}

/// Pick-up/drop-off point event. Carried through for completeness; the
/// message formatter only looks at tracking events.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PudoEvent {
    pub pudo_type: Option<String>,
    pub tracking_code: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub translated_event_id: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub location: Option<Location>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Location {
    pub zipcode: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// GraphQL returns `null` rather than `[]` for lists it could not resolve.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps that are missing, null or not RFC 3339 become `None` instead of
/// failing the whole response.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc)))
}
