//! At-most-once reporting.
//!
//! A scam session is reported to the evaluation endpoint exactly once:
//! `SessionReportGate::try_claim()` picks the single winning turn, which builds
//! a `ReportPayload` and hands it to the `ReportDispatcher` for background
//! delivery.

pub mod dispatcher;
pub mod gate;
pub mod payload;

pub use dispatcher::{HttpReportSink, ReportDispatcher, ReportSink, RetryPolicy};
pub use gate::SessionReportGate;
pub use payload::ReportPayload;
