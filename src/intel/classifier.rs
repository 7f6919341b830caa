//! Keyword-based scam verdict.
//!
//! Matching is plain substring search over the lower-cased text with no word
//! boundaries, so "cupid" trips on "upi". That false positive is accepted.

/// Vocabulary shared by the classifier and the keyword extractor.
pub const SCAM_KEYWORDS: &[&str] = &[
    "blocked", "verify", "urgent", "upi", "account", "kyc", "won", "gift", "prize",
];

/// Returns true if the text contains any scam keyword, case-insensitively.
pub fn is_scam(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SCAM_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_not_scam() {
        assert!(!is_scam(""));
    }

    #[test]
    fn benign_text_is_not_scam() {
        assert!(!is_scam("Hi, are we still meeting for lunch tomorrow?"));
        assert!(!is_scam("See https://example.com/menu for the menu"));
    }

    #[test]
    fn every_keyword_triggers() {
        for keyword in SCAM_KEYWORDS {
            assert!(is_scam(keyword), "{keyword} should classify as scam");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_scam("Your ACCOUNT will be BLOCKED"));
        assert!(is_scam("Complete KYC now"));
    }

    #[test]
    fn keyword_inside_longer_word_matches() {
        assert!(is_scam("Stupid Cupid"));
        assert!(!is_scam("Please return the equipment"));
        assert!(is_scam("What a wonderful day"));
    }
}
