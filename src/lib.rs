//! Honeypot responder: scam detection, intelligence extraction, and
//! at-most-once reporting per conversation.

pub mod config;
pub mod error;
pub mod intel;
pub mod pipeline;
pub mod report;
pub mod server;
