// Module name shadows the `serde` crate; reach the external crate via `::serde`.
use ::serde::Serializer;
use chrono::{DateTime, NaiveDateTime, ParseError, SecondsFormat, Utc};

/// Legacy wire format for local (zone-less) date-times, e.g. `15-01-2024__10:30:00:000000`.
pub const LOCAL_DATE_TIME_FORMAT: &str = "%d-%m-%Y__%H:%M:%S:%6f";

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn format_local_date_time(dt: &NaiveDateTime) -> String {
    dt.format(LOCAL_DATE_TIME_FORMAT).to_string()
}

pub fn parse_local_date_time(s: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s, LOCAL_DATE_TIME_FORMAT)
}

/// Serializer for `NaiveDateTime` fields using [`LOCAL_DATE_TIME_FORMAT`].
///
/// Use with `#[serde(serialize_with = "shop_core::serde::local_date_time::serialize")]`.
/// Inbound values arrive as raw strings and go through [`parse_local_date_time`].
pub mod local_date_time {
    use super::*;

    pub fn serialize<S>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&format_local_date_time(dt))
    }
}
