//! Remote tracking lookups

pub mod client;

pub use client::{TrackingClient, build_search_payload, parse_search_response};
