//! Tumbler internationalization (i18n)
//!
//! Only month names are localized; everything else a wheel shows is numeric.
//! Locale identifiers are accepted in BCP-47 (`fr-CA`) or POSIX (`fr_CA`)
//! form and resolve along a fallback chain that always ends in `en-US`.

mod locale;
mod months;

pub use locale::{locale_fallback_chain, normalize_locale, DEFAULT_LOCALE};
pub use months::{month_names, resolve_locale};
