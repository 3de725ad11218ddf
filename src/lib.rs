//! Rastreio - a parcel tracking bot for Brazilian carriers.
//!
//! This crate implements a single AWS Lambda that:
//! 1. Identifies the carrier of a tracking code from its shape
//! 2. Queries the Melhor Rastreio GraphQL API for the parcel
//! 3. Formats the latest tracking event and, for Twilio webhooks, replies
//!    to the sender
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - reqwest for the tracking API and Twilio Messages API
//! - chrono / chrono-tz for rendering timestamps in Brazilian local time
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use rastreio::carrier::identify_carrier;
//! use rastreio::core::config::AppConfig;
//! use rastreio::tracking::TrackingClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     rastreio::setup_logging();
//!
//!     let config = AppConfig::default();
//!     let client = TrackingClient::from_config(&config);
//!
//!     let code = "AB123456789BR";
//!     if let Some(carrier) = identify_carrier(code) {
//!         let body = client.search_parcel(code, carrier).await?;
//!         let parsed = rastreio::tracking::parse_search_response(&body)?;
//!         let result = parsed.data.and_then(|d| d.result);
//!         println!("{}", rastreio::formatter::format_tracking_message(result.as_ref()));
//!     }
//!
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod api;
pub mod carrier;
pub mod core;
pub mod errors;
pub mod formatter;
pub mod messaging;
pub mod tracking;

pub use errors::TrackerError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise (`debug` with
/// the `debug-logs` feature). Safe to call more than once; later calls are
/// no-ops.
///
/// # Example
///
/// ```
/// rastreio::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
