//! Serde helpers for wall-clock times.
//!
//! Clients send times as `HH:MM` or `HH:MM:SS`; responses always emit
//! `HH:MM:SS` (the TIME column's precision). Use with
//! `#[serde(with = "campus_core::timefmt")]`, or the [`option`] submodule
//! for `Option<TimeOfDay>` fields.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::CoreError;
use crate::types::TimeOfDay;

const FULL: &str = "%H:%M:%S";
const SHORT: &str = "%H:%M";

/// Parse `HH:MM:SS` or `HH:MM` into a [`TimeOfDay`].
pub fn parse_time(value: &str) -> Result<TimeOfDay, CoreError> {
    NaiveTime::parse_from_str(value, FULL)
        .or_else(|_| NaiveTime::parse_from_str(value, SHORT))
        .map_err(|_| {
            CoreError::Validation(format!(
                "invalid time '{value}', expected HH:MM or HH:MM:SS"
            ))
        })
}

pub fn serialize<S: Serializer>(time: &TimeOfDay, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format(FULL).to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeOfDay, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(serde::de::Error::custom)
}

/// `Option<TimeOfDay>` variant. Missing and `null` both deserialize to `None`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::TimeOfDay;

    pub fn serialize<S: Serializer>(
        time: &Option<TimeOfDay>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => super::serialize(t, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeOfDay>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) => super::parse_time(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
