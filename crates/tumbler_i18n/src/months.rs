//! Localized month names
//!
//! Month labels come from chrono's locale tables. Unsupported locales fall
//! back along [`locale_fallback_chain`] and finally to English, silently.

use chrono::{Locale, NaiveDate};

use crate::locale::locale_fallback_chain;

/// Primary region for language-only identifiers whose region code differs
/// from the upper-cased language code (`ja` -> `ja_JP`, not `ja_JA`).
const PRIMARY_REGIONS: &[(&str, &str)] = &[
    ("ar", "SA"),
    ("cs", "CZ"),
    ("da", "DK"),
    ("el", "GR"),
    ("en", "US"),
    ("he", "IL"),
    ("hi", "IN"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("sv", "SE"),
    ("uk", "UA"),
    ("vi", "VN"),
    ("zh", "CN"),
];

/// Map one normalized identifier (`fr-CA`, `fr`) to a chrono locale.
fn lookup(candidate: &str) -> Option<Locale> {
    let posix = candidate.replace('-', "_");
    if let Ok(locale) = Locale::try_from(posix.as_str()) {
        return Some(locale);
    }
    if posix.contains('_') {
        return None;
    }

    let region = PRIMARY_REGIONS
        .iter()
        .find(|(lang, _)| *lang == posix)
        .map(|(_, region)| (*region).to_string())
        .unwrap_or_else(|| posix.to_uppercase());
    Locale::try_from(format!("{}_{}", posix, region).as_str()).ok()
}

/// Resolve a user-supplied locale identifier to a supported chrono locale.
///
/// Never fails: unknown identifiers resolve to `en_US`.
pub fn resolve_locale(locale: &str) -> Locale {
    for candidate in locale_fallback_chain(locale) {
        if let Some(resolved) = lookup(&candidate) {
            if candidate != locale {
                tracing::debug!("locale {:?} resolved via fallback {:?}", locale, candidate);
            }
            return resolved;
        }
    }
    tracing::debug!("locale {:?} unsupported, using en_US", locale);
    Locale::en_US
}

/// Full month names, January first, for the given locale identifier.
pub fn month_names(locale: &str) -> Vec<String> {
    let resolved = resolve_locale(locale);
    (1..=12)
        .map(|month| match NaiveDate::from_ymd_opt(2000, month, 1) {
            Some(date) => date.format_localized("%B", resolved).to_string(),
            None => month.to_string(),
        })
        .collect()
}
