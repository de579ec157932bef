use chrono::{Datelike, NaiveDate};

/// Coerces a CSV field to a number the way a unary plus would.
///
/// Blank fields become `0.0`, anything unparseable becomes `NaN`.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Like [`coerce_number`], but maps the `missing` sentinel to `None`.
#[must_use]
pub fn coerce_optional_number(raw: &str, missing: &str) -> Option<f64> {
    if raw.trim() == missing {
        None
    } else {
        Some(coerce_number(raw))
    }
}

#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Whole days elapsed since 1 January of the date's own year.
#[must_use]
pub fn day_of_year(date: NaiveDate) -> f64 {
    f64::from(date.ordinal0())
}
