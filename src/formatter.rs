//! Renders the latest tracking event of a parcel into a WhatsApp-friendly
//! Portuguese message.

use chrono::{DateTime, Utc};
use chrono_tz::America::Sao_Paulo;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::core::models::{ParcelResult, TrackingEvent};

pub const UNTRACKABLE_MESSAGE: &str =
    "Não foi possível rastrear sua encomenda. Verifique o código e tente novamente.";

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#)
        .expect("static regex compile")
});

/// Build the user-facing message for a parcel lookup.
///
/// Falls back to [`UNTRACKABLE_MESSAGE`] when there is no result or the
/// result has no tracking events.
#[must_use]
pub fn format_tracking_message(result: Option<&ParcelResult>) -> String {
    let Some(result) = result else {
        return UNTRACKABLE_MESSAGE.to_string();
    };
    let Some(event) = latest_event(&result.tracking_events) else {
        return UNTRACKABLE_MESSAGE.to_string();
    };

    let tracker = result.trackers.first();
    let tracking_code = tracker
        .and_then(|t| t.tracking_code.as_deref())
        .or(event.tracking_code.as_deref())
        .unwrap_or("-");
    let service = tracker
        .and_then(|t| t.shipping_service.as_deref().or(t.tracker_type.as_deref()))
        .or(event.tracker_type.as_deref())
        .map_or_else(|| "-".to_string(), capitalize);

    let mut lines = vec![
        format!("📦 Código: {tracking_code}"),
        format!("🚚 Transportadora: {service}"),
        format!("🕒 Data: {}", format_local_datetime(event.created_at)),
        format!("📍 Status: {}", event.title.as_deref().unwrap_or("-")),
    ];

    if let Some(from) = non_blank(event.from.as_deref()) {
        lines.push(format!("Origem: {from}"));
    }
    if let Some(to) = non_blank(event.to.as_deref()) {
        lines.push(format!("Destino: {to}"));
    }
    if let Some(info) = non_blank(event.additional_info.as_deref()) {
        lines.push(format!("ℹ️ Info: {}", rewrite_links(info)));
    }

    lines.join("\n")
}

/// Most recent event by `createdAt`. Ties keep input order; events without a
/// timestamp lose to any dated event.
#[must_use]
pub fn latest_event(events: &[TrackingEvent]) -> Option<&TrackingEvent> {
    let mut sorted: Vec<&TrackingEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().next()
}

/// Replace `<a href="URL">text</a>` with `text: URL`, percent-decoding the URL.
#[must_use]
pub fn rewrite_links(info: &str) -> String {
    ANCHOR_RE
        .replace_all(info, |caps: &Captures<'_>| {
            let href = &caps[1];
            let url = percent_decode_str(href).decode_utf8_lossy();
            format!("{}: {}", caps[2].trim(), url)
        })
        .into_owned()
}

#[must_use]
pub fn format_local_datetime(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |ts| ts.with_timezone(&Sao_Paulo).format(DATE_FORMAT).to_string(),
    )
}

/// Uppercase the first character and lowercase the rest.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
