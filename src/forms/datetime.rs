//! Conversions between server timestamps and the minute-precision local
//! `YYYY-MM-DDTHH:MM` value a date-time picker edits.
//!
//! Everything is generic over the time zone so callers pass `chrono::Local`
//! at runtime and a fixed offset in tests.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::models::session::{parse_server_timestamp, ServerTimestamp};

pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Local picker value for a server timestamp, seconds dropped.
/// Returns an empty string when the timestamp cannot be read.
pub fn to_local_input<Tz: TimeZone>(server_value: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match to_local(server_value, tz) {
        Some(local) => local.format(LOCAL_INPUT_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Human-readable local rendering used by the list and the detail view.
pub fn to_local_display<Tz: TimeZone>(server_value: &str, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    to_local(server_value, tz).map(|local| local.format("%Y-%m-%d %H:%M").to_string())
}

fn to_local<Tz: TimeZone>(server_value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    match parse_server_timestamp(server_value)? {
        ServerTimestamp::Offset(dt) => Some(dt.with_timezone(tz)),
        // Offset-less server values are wall-clock times in the viewer's zone.
        ServerTimestamp::Naive(naive) => tz.from_local_datetime(&naive).earliest(),
    }
}

/// UTC ISO string (millisecond precision, `Z` suffix) for a local picker value.
/// `None` when the value is not a valid local date-time.
pub fn local_input_to_iso<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<String> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    let local = tz.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}
