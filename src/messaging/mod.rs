//! Inbound webhook parsing and outbound message delivery

pub mod client;
pub mod webhook;

pub use client::{MessageSender, TwilioClient};
pub use webhook::{InboundRequest, WebhookMessage};
