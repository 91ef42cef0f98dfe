//! Free-text date normalization.
//!
//! Listing pages publish dates in whatever format their CMS favors. The
//! normalizer tries the two RFC formats feeds themselves use, then a fixed
//! list of common human formats. Anything it cannot interpret is reported as
//! `None` and the caller substitutes the current time; unparseable input is
//! an expected outcome here, not an error worth a log line.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Date-only formats tried after the RFC parsers, in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
];

/// Date-and-time formats tried after the date-only ones.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %H:%M",
];

/// Interpret `text` as a calendar date or date-time.
///
/// Returns `None` when the trimmed input matches none of the supported
/// formats. Dates without a time component are normalized to midnight UTC.
pub fn normalize(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}
