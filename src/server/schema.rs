//! JSON request/response schema for the honeypot endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intel::IntelligenceRecord;

/// A single chat message as sent by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// ISO 8601 string or epoch milliseconds, depending on the sender.
    pub timestamp: String,
}

impl Message {
    /// Parse the timestamp, accepting RFC 3339 or epoch milliseconds.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        raw.parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Inbound request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamRequest {
    pub session_id: String,
    pub message: Message,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ScamRequest {
    /// Messages exchanged so far, including the current one.
    pub fn total_messages(&self) -> u32 {
        u32::try_from(self.conversation_history.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    /// Seconds between the earliest and latest parseable timestamps.
    pub fn engagement_duration_seconds(&self) -> u64 {
        let stamps: Vec<DateTime<Utc>> = self
            .conversation_history
            .iter()
            .chain(std::iter::once(&self.message))
            .filter_map(Message::parsed_timestamp)
            .collect();

        match (stamps.iter().min(), stamps.iter().max()) {
            (Some(first), Some(last)) => (*last - *first).num_seconds().max(0) as u64,
            _ => 0,
        }
    }
}

/// Engagement statistics returned with every reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub engagement_duration_seconds: u64,
    pub total_messages_exchanged: u32,
}

/// Response body for a processed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotResponse {
    pub status: String,
    pub scam_detected: bool,
    pub agent_reply: String,
    pub engagement_metrics: EngagementMetrics,
    pub extracted_intelligence: IntelligenceRecord,
    pub agent_notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(ts: &str) -> Message {
        Message {
            sender: "scammer".into(),
            text: "hi".into(),
            timestamp: ts.into(),
        }
    }

    #[test]
    fn history_and_metadata_default_to_empty() {
        let req: ScamRequest = serde_json::from_value(serde_json::json!({
            "sessionId": "abc",
            "message": { "sender": "scammer", "text": "hello", "timestamp": "2026-01-01T00:00:00Z" }
        }))
        .unwrap();
        assert!(req.conversation_history.is_empty());
        assert!(req.metadata.is_null());
        assert_eq!(req.total_messages(), 1);
    }

    #[test]
    fn total_messages_counts_history() {
        let req = ScamRequest {
            session_id: "abc".into(),
            message: msg("x"),
            conversation_history: vec![msg("x"), msg("x"), msg("x")],
            metadata: serde_json::Value::Null,
        };
        assert_eq!(req.total_messages(), 4);
    }

    #[test]
    fn parses_rfc3339_and_epoch_millis() {
        assert!(msg("2026-01-21T10:15:30Z").parsed_timestamp().is_some());
        assert!(msg("2026-01-21T10:15:30.123+05:30").parsed_timestamp().is_some());
        assert!(msg("1769000000000").parsed_timestamp().is_some());
        assert!(msg("yesterday").parsed_timestamp().is_none());
    }

    #[test]
    fn engagement_duration_spans_history() {
        let req = ScamRequest {
            session_id: "abc".into(),
            message: msg("2026-01-21T10:02:00Z"),
            conversation_history: vec![msg("2026-01-21T10:00:00Z"), msg("garbage")],
            metadata: serde_json::Value::Null,
        };
        assert_eq!(req.engagement_duration_seconds(), 120);
    }

    #[test]
    fn engagement_duration_zero_without_timestamps() {
        let req = ScamRequest {
            session_id: "abc".into(),
            message: msg("not a time"),
            conversation_history: vec![],
            metadata: serde_json::Value::Null,
        };
        assert_eq!(req.engagement_duration_seconds(), 0);
    }

    #[test]
    fn response_uses_camel_case() {
        let resp = HoneypotResponse {
            status: "success".into(),
            scam_detected: true,
            agent_reply: "ok".into(),
            engagement_metrics: EngagementMetrics {
                engagement_duration_seconds: 10,
                total_messages_exchanged: 2,
            },
            extracted_intelligence: IntelligenceRecord::default(),
            agent_notes: "n".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["scamDetected"], true);
        assert_eq!(json["agentReply"], "ok");
        assert_eq!(json["engagementMetrics"]["totalMessagesExchanged"], 2);
        assert_eq!(json["engagementMetrics"]["engagementDurationSeconds"], 10);
        assert_eq!(json["extractedIntelligence"]["upiIds"], serde_json::json!([]));
    }
}
