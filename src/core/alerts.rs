//! Alert records and their newest-first ordering.
//!
//! Alerts are opaque documents. The only field read here is `timestamp`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Reverse;

pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Identifier some stores embed in the document body.
pub const STORAGE_ID_FIELD: &str = "_id";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];
const CLOCK_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alert(Map<String, Value>);

impl Alert {
    /// Decodes a stored document and drops any embedded storage identifier.
    pub fn from_document(document: &str) -> Result<Alert, serde_json::Error> {
        let mut alert: Alert = serde_json::from_str(document)?;
        alert.0.shift_remove(STORAGE_ID_FIELD);
        Ok(alert)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The parsed `timestamp` field. `None` when it is absent or unreadable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.get(TIMESTAMP_FIELD)?;
        let parsed = raw.as_str().and_then(parse_timestamp);
        if parsed.is_none() {
            warn!("alert has unreadable timestamp {raw}, sorting it last");
        }
        parsed
    }

    /// Two-space indented JSON, keys in their original order.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }
}

/// Parses ISO-8601 timestamps in extended or basic form: a date, optionally followed by
/// `T` (or a space) and a time of hour, minute or second precision, optionally followed
/// by `Z` or a `±HH[:MM]` offset. Values without an offset are taken as UTC, bare dates
/// as midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let (date, time) = match raw.find(['T', 't', ' ']) {
        Some(split) => (&raw[..split], Some(&raw[split + 1..])),
        None => (raw, None),
    };

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())?;

    let Some(time) = time else {
        return date.and_hms_opt(0, 0, 0).map(|ts| ts.and_utc());
    };

    let (clock, offset) = split_offset(time)?;
    let local = date.and_time(parse_clock(clock)?);

    match offset {
        None => Some(local.and_utc()),
        Some(offset) => local
            .and_local_timezone(offset)
            .single()
            .map(|ts| ts.with_timezone(&Utc)),
    }
}

/// Splits `12:00+02:00` into the clock and its offset. `Z` means UTC.
fn split_offset(time: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return Some((clock, FixedOffset::east_opt(0)));
    }

    match time.rfind(['+', '-']) {
        Some(split) => Some((&time[..split], Some(parse_offset(&time[split..])?))),
        None => Some((time, None)),
    }
}

/// `+02:00`, `+0200` or `+02`.
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 { digits[2..].parse().ok()? } else { 0 };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_clock(clock: &str) -> Option<NaiveTime> {
    if clock.len() == 2 {
        return NaiveTime::from_hms_opt(clock.parse().ok()?, 0, 0);
    }

    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(clock, format).ok())
}

/// Newest first. Alerts without a usable timestamp go last; ties keep store order.
pub fn sort_newest_first(alerts: &mut [Alert]) {
    alerts.sort_by_cached_key(|alert| Reverse(alert.timestamp()));
}
