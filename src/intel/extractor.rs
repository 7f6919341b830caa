//! Pattern battery that turns raw message text into an [`IntelligenceRecord`].
//!
//! All matchers run independently over the full text, so one token may land
//! in several categories (a 12-digit run is both a bank account candidate and
//! a phone number). Each category keeps distinct values in the order they
//! first appear.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::classifier::SCAM_KEYWORDS;
use super::types::IntelligenceRecord;

/// `local-part@handle`, e.g. `someone.99@okbank`.
static PAYMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._\-]+@[A-Za-z]+").unwrap());

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Maximal digit runs; length filtering happens afterwards so a 20-digit run
/// is rejected rather than truncated to its first 18 digits.
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static PHONE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?[0-9]+").unwrap());

const BANK_ACCOUNT_DIGITS: std::ops::RangeInclusive<usize> = 9..=18;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=12;

/// Sentence punctuation that commonly trails a pasted link.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\''];

/// Extract structured intelligence from a message. Total: never fails.
pub fn extract(text: &str) -> IntelligenceRecord {
    IntelligenceRecord {
        payment_identifiers: distinct(PAYMENT_ID.find_iter(text).map(|m| m.as_str())),
        urls: distinct(
            URL.find_iter(text)
                .map(|m| m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION))
                .filter(|url| !url.ends_with("://")),
        ),
        bank_account_numbers: distinct(
            DIGIT_RUN
                .find_iter(text)
                .map(|m| m.as_str())
                .filter(|run| BANK_ACCOUNT_DIGITS.contains(&run.len())),
        ),
        phone_numbers: distinct(
            PHONE_CANDIDATE
                .find_iter(text)
                .map(|m| m.as_str())
                .filter(|candidate| {
                    PHONE_DIGITS.contains(&candidate.trim_start_matches('+').len())
                }),
        ),
        matched_keywords: matched_keywords(text),
    }
}

/// Vocabulary entries present in the text, ordered by first occurrence.
pub fn matched_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut hits: Vec<(usize, &str)> = SCAM_KEYWORDS
        .iter()
        .filter_map(|keyword| lowered.find(keyword).map(|pos| (pos, *keyword)))
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, k)| k.to_string()).collect()
}

fn distinct<'a>(matches: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    matches
        .filter(|m| seen.insert(*m))
        .map(String::from)
        .collect()
}
