// File: ./src/model/time.rs
// "HH:MM" time-of-day helpers shared by the wire format and the layout stages
use chrono::{NaiveTime, ParseError, TimeDelta, Timelike};

pub const HHMM_FORMAT: &str = "%H:%M";

pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(value.trim(), HHMM_FORMAT)
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM_FORMAT).to_string()
}

/// Adds `minutes` on the clock face. The flag is true when the result wrapped past midnight.
pub fn add_minutes(time: NaiveTime, minutes: u32) -> (NaiveTime, bool) {
    let (end, overflow_secs) = time.overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
    (end, overflow_secs != 0)
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// Serde adapter so `NaiveTime` fields travel as "HH:MM" strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}
