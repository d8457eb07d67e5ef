//! # Temporal Brand: Millisecond Epoch Timestamps
//!
//! Defines the `Timestamp` brand: an integer count of milliseconds since
//! the Unix epoch, restricted to the range a 64-bit millisecond date-time
//! can represent, `±8_640_000_000_000_000` (±100,000,000 days).
//!
//! ## Conversion
//!
//! A branded timestamp converts to `chrono::DateTime<Utc>` and renders as
//! ISO 8601 with millisecond precision and a `Z` suffix
//! (`YYYY-MM-DDTHH:MM:SS.sssZ`). chrono's calendar is narrower than the
//! brand near the extremes, so conversion returns `Option`.

use chrono::{DateTime, Utc};

use crate::brand::Branded;
use crate::define_brand;

/// Earliest accepted timestamp, in milliseconds since the epoch.
pub const MIN_TIMESTAMP_MS: i64 = -8_640_000_000_000_000;

/// Latest accepted timestamp, in milliseconds since the epoch.
pub const MAX_TIMESTAMP_MS: i64 = 8_640_000_000_000_000;

define_brand! {
    /// Milliseconds since the Unix epoch, within ±8.64e15.
    pub Timestamp: i64 = |t| (MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS).contains(t)
}

impl Branded<Timestamp> {
    /// Brand a `DateTime<Utc>`, truncating to milliseconds.
    ///
    /// Every `DateTime<Utc>` chrono can represent is within range.
    pub fn from_datetime(dt: DateTime<Utc>) -> crate::DecodeResult<Self> {
        Self::new(dt.timestamp_millis())
    }

    /// Milliseconds since the epoch.
    pub fn epoch_millis(&self) -> i64 {
        *self.get()
    }

    /// The instant as a `DateTime<Utc>`, `None` outside chrono's range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(*self.get())
    }

    /// Render as ISO 8601 with millisecond precision and `Z` suffix.
    pub fn to_iso8601(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::brand;
    use crate::decoder::Decoder;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn boundaries_are_inclusive() {
        let d = brand::<Timestamp>();
        assert!(d.decode(&json!(MIN_TIMESTAMP_MS)).is_ok());
        assert!(d.decode(&json!(MAX_TIMESTAMP_MS)).is_ok());
        assert!(d.decode(&json!(0)).is_ok());
        assert!(d.decode(&json!(MAX_TIMESTAMP_MS + 1)).is_err());
    }

    #[test]
    fn below_range_message_contains_literal_input() {
        let errors = brand::<Timestamp>()
            .decode(&json!(-8_640_000_000_000_001i64))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.errors()[0].message().contains("-8640000000000001"));
    }

    #[test]
    fn rejects_non_integers() {
        assert!(brand::<Timestamp>().decode(&json!(1.25)).is_err());
        assert!(brand::<Timestamp>().decode(&json!("2026-01-15T12:00:00Z")).is_err());
    }

    #[test]
    fn integer_beyond_i64_is_predicate_failure() {
        let errors = brand::<Timestamp>()
            .decode(&json!(10_000_000_000_000_000_000u64))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind(), crate::ErrorKind::PredicateFailure);
        assert_eq!(
            errors.errors()[0].message(),
            "Invalid value for Timestamp: 10000000000000000000"
        );
    }

    #[test]
    fn to_iso8601_format() {
        let ts = Branded::<Timestamp>::new(1_768_478_400_123).unwrap();
        assert_eq!(ts.to_iso8601().unwrap(), "2026-01-15T12:00:00.123Z");
    }

    #[test]
    fn epoch_is_1970() {
        let ts = Branded::<Timestamp>::new(0).unwrap();
        assert_eq!(ts.to_iso8601().unwrap(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap();
        let ts = Branded::<Timestamp>::from_datetime(dt).unwrap();
        assert_eq!(ts.to_datetime(), Some(dt));
        assert_eq!(ts.epoch_millis(), dt.timestamp_millis());
    }

    #[test]
    fn extremes_may_exceed_chrono() {
        let ts = Branded::<Timestamp>::new(MAX_TIMESTAMP_MS).unwrap();
        assert!(ts.to_datetime().is_none());
    }

    proptest! {
        #[test]
        fn accepted_iff_in_range(t in any::<i64>()) {
            let ok = brand::<Timestamp>().decode(&json!(t)).is_ok();
            prop_assert_eq!(ok, (MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS).contains(&t));
        }

        #[test]
        fn accepted_near_bounds(offset in -1000i64..=1000) {
            let upper = MAX_TIMESTAMP_MS + offset;
            let lower = MIN_TIMESTAMP_MS + offset;
            prop_assert_eq!(brand::<Timestamp>().decode(&json!(upper)).is_ok(), offset <= 0);
            prop_assert_eq!(brand::<Timestamp>().decode(&json!(lower)).is_ok(), offset >= 0);
        }
    }
}
