//! Final report sent to the evaluation endpoint.

use serde::Serialize;

use crate::intel::IntelligenceRecord;

/// Outbound report for one conversation. Built once per successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    session_id: String,
    scam_detected: bool,
    total_messages_exchanged: u32,
    extracted_intelligence: IntelligenceRecord,
    agent_notes: String,
}

impl ReportPayload {
    /// Build a report for a confirmed scam session.
    pub fn new(
        session_id: impl Into<String>,
        total_messages_exchanged: u32,
        extracted_intelligence: IntelligenceRecord,
    ) -> Self {
        let agent_notes = agent_notes(&extracted_intelligence);
        Self {
            session_id: session_id.into(),
            scam_detected: true,
            total_messages_exchanged,
            extracted_intelligence,
            agent_notes,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn scam_detected(&self) -> bool {
        self.scam_detected
    }

    pub fn total_messages_exchanged(&self) -> u32 {
        self.total_messages_exchanged
    }

    pub fn intelligence(&self) -> &IntelligenceRecord {
        &self.extracted_intelligence
    }

    pub fn agent_notes(&self) -> &str {
        &self.agent_notes
    }
}

/// Narrative summary of what a message gave away.
pub fn agent_notes(intel: &IntelligenceRecord) -> String {
    let mut notes = if intel.matched_keywords.is_empty() {
        "No scam keywords observed.".to_string()
    } else {
        format!(
            "Scam indicators observed: {}.",
            intel.matched_keywords.join(", ")
        )
    };

    let counts = [
        (intel.payment_identifiers.len(), "payment identifier"),
        (intel.urls.len(), "link"),
        (intel.bank_account_numbers.len(), "bank account number"),
        (intel.phone_numbers.len(), "phone number"),
    ];
    let found: Vec<String> = counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}{}", if *n == 1 { "" } else { "s" }))
        .collect();

    if found.is_empty() {
        notes.push_str(" No actionable intelligence extracted yet.");
    } else {
        notes.push_str(&format!(" Extracted {}.", found.join(", ")));
    }
    notes
}
