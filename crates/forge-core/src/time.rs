// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp formatting.
//!
//! Entry timestamps are ISO-8601 UTC strings with millisecond precision and a
//! `Z` suffix (`2026-03-01T10:15:30.123Z`). They double as the identity of an
//! entry inside its collection.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format `now` as an entry timestamp.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current wall-clock time as an entry timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse an entry timestamp. Accepts any RFC 3339 offset, not just `Z`.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn format_uses_millis_and_z_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 15, 30).unwrap();
        assert_eq!(format_timestamp(now), "2026-03-01T10:15:30.000Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn parse_accepts_offsets() {
        let parsed = parse_timestamp("2026-03-01T12:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(parsed), "2026-03-01T10:00:00.000Z");
    }

    proptest! {
        #[test]
        fn lexical_order_matches_time_order(a in 0i64..4_000_000_000_000, b in 0i64..4_000_000_000_000) {
            let ta = Utc.timestamp_millis_opt(a).unwrap();
            let tb = Utc.timestamp_millis_opt(b).unwrap();
            prop_assert_eq!(format_timestamp(ta).cmp(&format_timestamp(tb)), ta.cmp(&tb));
        }
    }
}
