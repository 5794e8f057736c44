use chrono::prelude::*;

// Unix timestamp in milliseconds.
pub type Timestamp = i64;

#[inline]
pub fn now() -> Timestamp {
    Utc::now().timestamp_millis()
}

pub fn try_parse_rfc3339(s: &str) -> Option<Timestamp> {
    match DateTime::parse_from_rfc3339(s.trim()) {
        Ok(dt) => Some(dt.timestamp_millis()),
        Err(_) => None,
    }
}
