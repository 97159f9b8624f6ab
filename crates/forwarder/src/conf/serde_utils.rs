//! Serde helpers for configuration values that have no natural TOML shape.

/// `Duration` as a `[d.]hh:mm:ss[.fffffff]` time span string.
///
/// Integers are also accepted on input and read as whole seconds.
pub mod timespan {
    use std::fmt;
    use std::time::Duration;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timespan(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimespanVisitor;

        impl<'de> Visitor<'de> for TimespanVisitor {
            type Value = Duration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a time span such as \"00:02:00\" or a number of seconds")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_timespan(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Duration::from_secs(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(Duration::from_secs)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(TimespanVisitor)
    }

    pub fn format_timespan(value: &Duration) -> String {
        let total = value.as_secs();
        let (days, rem) = (total / 86_400, total % 86_400);
        let (hours, minutes, seconds) = (rem / 3600, (rem % 3600) / 60, rem % 60);

        let mut out = if days > 0 {
            format!("{}.{:02}:{:02}:{:02}", days, hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        };

        // 100ns ticks, seven digits
        let ticks = value.subsec_nanos() / 100;
        if ticks > 0 {
            out.push_str(&format!(".{:07}", ticks));
        }
        out
    }

    /// Accepts `hh:mm`, `hh:mm:ss`, `hh:mm:ss.fffffff`, each optionally
    /// prefixed with `d.` for whole days. Hours must be below 24, minutes and
    /// seconds below 60, and at most nine fractional digits are kept.
    ///
    /// A bare integer string such as `"5"` is rejected rather than read as a
    /// number of days, and negative spans are not supported. Integer
    /// (non-string) values are handled by the deserializer as seconds.
    pub fn parse_timespan(input: &str) -> Option<Duration> {
        let input = input.trim();

        // A '.' before the first ':' separates whole days
        let (days, rest) = match (input.find('.'), input.find(':')) {
            (Some(dot), Some(colon)) if dot < colon => {
                (input[..dot].parse::<u64>().ok()?, &input[dot + 1..])
            }
            _ => (0, input),
        };

        let mut parts = rest.split(':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let seconds_part = parts.next().unwrap_or("0");
        if parts.next().is_some() {
            return None;
        }

        let (seconds, fraction) = seconds_part.split_once('.').unwrap_or((seconds_part, ""));
        let seconds: u64 = seconds.parse().ok()?;

        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }

        let nanos = if fraction.is_empty() {
            0
        } else {
            if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            format!("{:0<9}", fraction).parse::<u32>().ok()?
        };

        let secs = days
            .checked_mul(86_400)?
            .checked_add(hours * 3600 + minutes * 60 + seconds)?;
        Some(Duration::new(secs, nanos))
    }
}
