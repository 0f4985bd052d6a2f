//! Locale identifiers
//!
//! Hosts hand over whatever their platform reports (`fr_CA`, ` de-DE`,
//! `zh-Hant-TW`). Month-name lookup walks from the most specific form of the
//! identifier to the bare language and ends at [`DEFAULT_LOCALE`].

/// Month names used when no candidate is supported
pub const DEFAULT_LOCALE: &str = "en-US";

/// Trim and switch POSIX underscores to BCP 47 hyphens
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

/// Candidates tried for month names, most specific first
///
/// Subtags are dropped one at a time from the right, then the default is
/// appended unless already present: `zh_Hant_TW` yields `zh-Hant-TW`,
/// `zh-Hant`, `zh`, `en-US`.
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let normalized = normalize_locale(locale);
    let subtags: Vec<&str> = normalized.split('-').filter(|t| !t.is_empty()).collect();

    let mut chain: Vec<String> = (1..=subtags.len())
        .rev()
        .map(|n| subtags[..n].join("-"))
        .collect();
    if !chain.iter().any(|c| c == DEFAULT_LOCALE) {
        chain.push(DEFAULT_LOCALE.to_string());
    }
    chain
}
