//! Decoding of the two places Discord sends time as a floating point number: rate limit
//! `retry_after` (seconds) and rich presence activity timestamps (milliseconds).
//!
//! Both truncate rather than round, so the result is never later than what Discord sent.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Convert a float number of seconds to a [`Duration`], keeping the fractional part to the
/// millisecond.
///
/// The value is split into whole seconds and a fraction, and the fraction is truncated to whole
/// milliseconds, so `1.5` is exactly one second plus 500 milliseconds.
///
/// `Duration` can't be negative, so a negative (or NaN) input comes out as [`Duration::ZERO`].
/// Discord never sends one.
pub fn retry_after_from_secs(secs: f64) -> Duration {
    let whole = secs.trunc();
    let frac = secs.fract();
    Duration::from_secs(whole as u64) + Duration::from_millis((frac * 1000.0) as u64)
}

/// The inverse of [`retry_after_from_secs`], used when serializing.
pub fn retry_after_to_secs(duration: Duration) -> f64 {
    duration.as_secs() as f64 + f64::from(duration.subsec_millis()) / 1000.0
}

/// Convert float milliseconds since the epoch to whole milliseconds, dropping (not rounding) any
/// fraction of a millisecond.
///
/// Negative values are passed through, truncated toward zero.
pub fn millis_from_float(millis: f64) -> i64 {
    millis.trunc() as i64
}

/// `#[serde(with = "...")]` for a unix timestamp in integer milliseconds, as a [`DateTime`].
pub mod millis_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_some(&dt.timestamp_millis()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        // some clients send this as a float as well
        let millis = <Option<f64>>::deserialize(d)?;
        Ok(millis.and_then(|millis| DateTime::from_timestamp_millis(millis_from_float(millis))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_keeps_fraction() {
        assert_eq!(
            retry_after_from_secs(1.5),
            Duration::from_secs(1) + Duration::from_millis(500),
        );
        assert_eq!(retry_after_from_secs(0.25), Duration::from_millis(250));
        assert_eq!(retry_after_from_secs(64.0), Duration::from_secs(64));
    }

    #[test]
    fn retry_after_zero() {
        assert_eq!(retry_after_from_secs(0.0), Duration::ZERO);
    }

    #[test]
    fn retry_after_within_a_millisecond() {
        for secs in [0.001, 0.1, 0.3, 2.75, 12.345, 3599.999] {
            let back = retry_after_to_secs(retry_after_from_secs(secs));
            assert!((back - secs).abs() < 0.001, "{secs} came back as {back}");
            assert!(back <= secs, "{secs} rounded up to {back}");
        }
    }

    #[test]
    fn retry_after_negative_is_zero() {
        assert_eq!(retry_after_from_secs(-2.5), Duration::ZERO);
        assert_eq!(retry_after_from_secs(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn millis_truncate() {
        assert_eq!(millis_from_float(1_609_459_200_000.0), 1_609_459_200_000);
        assert_eq!(millis_from_float(1_609_459_200_500.7), 1_609_459_200_500);
        assert_eq!(millis_from_float(0.0), 0);
        assert_eq!(millis_from_float(-10.9), -10);
    }
}
