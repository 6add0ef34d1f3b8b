//! Millisecond <-> `Duration` conversion for round-trip-time samples.

use std::time::Duration;

const NANOS_PER_MS: f64 = 1_000_000.0;

/// Converts fractional milliseconds into a `Duration`, rounded to the
/// nearest nanosecond.
///
/// Returns `None` for negative, non-finite or unrepresentable values.
pub fn from_ms(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }

    let nanos = (ms * NANOS_PER_MS).round();
    if nanos >= u64::MAX as f64 {
        return None;
    }

    Some(Duration::from_nanos(nanos as u64))
}

pub fn to_ms(value: Duration) -> f64 {
    value.as_nanos() as f64 / NANOS_PER_MS
}

/// Renders a sample the way traceroute prints it: three decimals, widened
/// to nanosecond precision only when the value needs it.
pub fn format_ms(value: Duration) -> String {
    let nanos = value.as_nanos();
    let whole = nanos / 1_000_000;
    let frac = nanos % 1_000_000;

    if frac % 1_000 == 0 {
        format!("{whole}.{:03}", frac / 1_000)
    } else {
        let digits = format!("{frac:06}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Serde adapter storing the three samples as fractional milliseconds.
pub mod serde_ms {
    use super::{from_ms, to_ms};
    use serde::de::Error as _;
    use serde::ser::SerializeTuple;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(samples: &[Duration; 3], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(samples.len())?;
        for sample in samples {
            tuple.serialize_element(&to_ms(*sample))?;
        }
        tuple.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[Duration; 3], D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = <[f64; 3]>::deserialize(deserializer)?;
        let mut samples = [Duration::ZERO; 3];
        for (slot, value) in samples.iter_mut().zip(values) {
            *slot = from_ms(value)
                .ok_or_else(|| D::Error::custom(format!("rtt out of range: {value}")))?;
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ms_keeps_microseconds() {
        assert_eq!(from_ms(0.235), Some(Duration::from_micros(235)));
        assert_eq!(from_ms(2.368), Some(Duration::from_micros(2368)));
        assert_eq!(from_ms(14.988), Some(Duration::from_micros(14988)));
        assert_eq!(from_ms(12.0), Some(Duration::from_millis(12)));
    }

    #[test]
    fn from_ms_rejects_unrepresentable_values() {
        assert_eq!(from_ms(-1.0), None);
        assert_eq!(from_ms(f64::NAN), None);
        assert_eq!(from_ms(f64::INFINITY), None);
        assert_eq!(from_ms(1e300), None);
    }

    #[test]
    fn format_ms_uses_three_decimals_when_exact() {
        assert_eq!(format_ms(Duration::from_micros(235)), "0.235");
        assert_eq!(format_ms(Duration::from_micros(1800)), "1.800");
        assert_eq!(format_ms(Duration::from_millis(14)), "14.000");
    }

    #[test]
    fn format_ms_widens_for_sub_microsecond_values() {
        assert_eq!(format_ms(Duration::from_nanos(235_500)), "0.2355");
        assert_eq!(format_ms(Duration::from_nanos(1_000_001)), "1.000001");
    }
}
