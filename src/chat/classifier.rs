//! Generic-question classifier.
//!
//! Capability questions ("what can you do", "who are you", …) have a
//! fixed, templated answer; detecting them up front avoids a model call
//! and a database round-trip and keeps the phrasing consistent.

use regex::RegexSet;
use std::sync::OnceLock;

/// Phrasings that mark a question as being about the assistant itself
/// rather than the user's data. Matched case-insensitively as substrings.
const GENERIC_PATTERNS: &[&str] = &[
    "how can you help",
    "what can you do",
    "help me",
    "what are your capabilities",
    "assist me",
    "who are you",
];

/// The fixed reply for generic capability questions.
pub const GENERIC_REPLY: &str = "I'm an AI assistant and I can help you with queries about your account and portfolio, such as account holdings, portfolio performance, and more. Ask me anything related to your financial data.";

fn matcher() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new(GENERIC_PATTERNS.iter().map(|p| format!("(?i){}", p)))
            .expect("generic patterns are valid regexes")
    })
}

/// Returns true if the question is a generic capability question.
///
/// Total function: any input, any casing, never fails, no side effects.
pub fn is_generic(text: &str) -> bool {
    matcher().is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_matches() {
        for pattern in GENERIC_PATTERNS {
            assert!(is_generic(pattern), "pattern should match itself: {pattern}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_generic("Who are you"));
        assert!(is_generic("WHO ARE YOU?"));
        assert!(is_generic("What Can You Do"));
        assert!(is_generic("HELP ME please"));
    }

    #[test]
    fn test_substring_match() {
        assert!(is_generic("Hey there, how can you help with my account?"));
        assert!(is_generic("Could you assist me today"));
        assert!(is_generic("tell me what are your capabilities exactly"));
    }

    #[test]
    fn test_data_questions_are_not_generic() {
        assert!(!is_generic("Tell me about my account holdings"));
        assert!(!is_generic("Show my portfolio performance for last month"));
        assert!(!is_generic("How many trades did I make in March?"));
        assert!(!is_generic(""));
    }

    #[test]
    fn test_reply_is_about_financial_data() {
        assert!(GENERIC_REPLY.contains("account"));
        assert!(GENERIC_REPLY.contains("portfolio"));
        assert!(GENERIC_REPLY.contains("financial data"));
    }
}
