//! Per-turn processing pipeline.
//!
//! Every inbound message flows through `TurnOrchestrator::handle_turn()`:
//! detection (classifier + extractor) → report gate → background dispatch.
//!
//! The verdict and intelligence are returned to the caller no matter what
//! happens to the report.

pub mod orchestrator;
pub mod types;

pub use orchestrator::TurnOrchestrator;
pub use types::{ConversationTurn, TurnOutcome};
