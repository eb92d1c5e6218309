//! Human-readable relative timestamps ("3 days ago", "yesterday").
//!
//! DESIGN
//! ======
//! The unit is the largest of second/minute/hour/day/week/month/year whose
//! cutoff still exceeds the absolute delta; the value is the delta floored by
//! the next-smaller cutoff. Rendering follows English `numeric: auto`
//! conventions, so a one-day delta reads "yesterday" rather than "1 day ago".

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Cutoffs in seconds for every unit but the last, which has none.
const CUTOFFS: [i64; 6] = [60, 3_600, 86_400, 86_400 * 7, 86_400 * 30, 86_400 * 365];

const UNITS: [RelativeUnit; 7] = [
    RelativeUnit::Second,
    RelativeUnit::Minute,
    RelativeUnit::Hour,
    RelativeUnit::Day,
    RelativeUnit::Week,
    RelativeUnit::Month,
    RelativeUnit::Year,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RelativeUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Relative description of an API timestamp, or `""` if it does not parse.
#[must_use]
pub fn relative_time_from_iso(raw: &str) -> String {
    parse_timestamp(raw).map(relative_time_string).unwrap_or_default()
}

/// Relative description of `date` as seen from now.
#[must_use]
pub fn relative_time_string(date: OffsetDateTime) -> String {
    relative_time_between(date, OffsetDateTime::now_utc())
}

/// Relative description of `date` as seen from `now`.
#[must_use]
pub fn relative_time_between(date: OffsetDateTime, now: OffsetDateTime) -> String {
    let (value, unit) = select_unit(delta_seconds(date, now));
    format_relative(value, unit)
}

/// Whole seconds from `now` to `date`, rounded half up.
#[must_use]
pub fn delta_seconds(date: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let millis = (date - now).whole_milliseconds();
    let seconds = (millis + 500).div_euclid(1000);
    i64::try_from(seconds).unwrap_or(if seconds < 0 { i64::MIN } else { i64::MAX })
}

/// Pick the display unit for a signed delta in seconds.
///
/// Cutoffs are exclusive: exactly 60 seconds is one minute, exactly 3600 is
/// one hour.
#[must_use]
pub fn select_unit(delta: i64) -> (i64, RelativeUnit) {
    let magnitude = i128::from(delta).abs();
    let index = CUTOFFS
        .iter()
        .position(|&cutoff| i128::from(cutoff) > magnitude)
        .unwrap_or(CUTOFFS.len());
    let divisor = if index == 0 { 1 } else { CUTOFFS[index - 1] };
    (delta.div_euclid(divisor), UNITS[index])
}

/// Render `value` `unit`s relative to now, preferring words where English has them.
#[must_use]
pub fn format_relative(value: i64, unit: RelativeUnit) -> String {
    use RelativeUnit::{Day, Hour, Minute, Month, Second, Week, Year};

    let name = unit.as_str();
    match (unit, value) {
        (Second, 0) => return "now".to_owned(),
        (Minute | Hour | Week | Month | Year, 0) => return format!("this {name}"),
        (Day, -1) => return "yesterday".to_owned(),
        (Day, 0) => return "today".to_owned(),
        (Day, 1) => return "tomorrow".to_owned(),
        (Week | Month | Year, -1) => return format!("last {name}"),
        (Week | Month | Year, 1) => return format!("next {name}"),
        _ => {}
    }

    let count = value.unsigned_abs();
    let plural = if count == 1 { "" } else { "s" };
    if value < 0 {
        format!("{count} {name}{plural} ago")
    } else {
        format!("in {count} {name}{plural}")
    }
}

/// Parse the timestamp shapes the API emits.
///
/// Accepts RFC 3339, RFC 2822 (including the HTTP-date `GMT` suffix), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` and a bare `YYYY-MM-DD`. Values without an
/// offset are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let rfc2822 = raw
        .strip_suffix(" GMT")
        .map_or_else(|| raw.to_owned(), |head| format!("{head} +0000"));
    if let Ok(parsed) = OffsetDateTime::parse(&rfc2822, &Rfc2822) {
        return Some(parsed);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, naive) {
        return Some(parsed.assume_utc());
    }

    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(raw, date_only)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
