//! Intelligence extracted from a single message.

use serde::{Deserialize, Serialize};

/// Structured findings from one message text.
///
/// Every category is always present (empty when nothing matched) and holds
/// distinct values in first-occurrence order. Field names on the wire follow
/// the evaluator's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceRecord {
    #[serde(rename = "bankAccounts")]
    pub bank_account_numbers: Vec<String>,
    #[serde(rename = "upiIds")]
    pub payment_identifiers: Vec<String>,
    #[serde(rename = "phishingLinks")]
    pub urls: Vec<String>,
    #[serde(rename = "phoneNumbers")]
    pub phone_numbers: Vec<String>,
    #[serde(rename = "suspiciousKeywords")]
    pub matched_keywords: Vec<String>,
}

impl IntelligenceRecord {
    /// True when no category matched anything.
    pub fn is_empty(&self) -> bool {
        self.bank_account_numbers.is_empty()
            && self.payment_identifiers.is_empty()
            && self.urls.is_empty()
            && self.phone_numbers.is_empty()
            && self.matched_keywords.is_empty()
    }

    /// Number of extracted artifacts, keywords excluded.
    pub fn artifact_count(&self) -> usize {
        self.bank_account_numbers.len()
            + self.payment_identifiers.len()
            + self.urls.len()
            + self.phone_numbers.len()
    }
}
