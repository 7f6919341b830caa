//! Scam signal detection.
//!
//! Two stateless passes run over every inbound message:
//! 1. `classifier::is_scam()`: keyword verdict
//! 2. `extractor::extract()`: structured intelligence (payment IDs, links, numbers)
//!
//! The passes are independent: a message can yield intelligence without being
//! classified a scam, and vice versa.

pub mod classifier;
pub mod extractor;
pub mod types;

pub use classifier::{SCAM_KEYWORDS, is_scam};
pub use extractor::extract;
pub use types::IntelligenceRecord;
