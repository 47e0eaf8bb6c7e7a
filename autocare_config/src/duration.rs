use std::{fmt, ops::Deref};

use serde::{de, Deserialize};

/// A duration written as space separated `<number><unit>` parts
/// (e.g. `1m 30s`) or as a plain number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn parse_seconds(s: &str) -> Option<u64> {
    s.split_whitespace().try_fold(0u64, |total, part| {
        let split = part.find(|c: char| !c.is_ascii_digit())?;
        let (value, unit) = part.split_at(split);
        let factor = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 60 * 60,
            "d" => 24 * 60 * 60,
            _ => return None,
        };
        total.checked_add(value.parse::<u64>().ok()?.checked_mul(factor)?)
    })
}

struct DurationVisitor;

impl de::Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration like `30s` or `1h 5m`")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Duration(std::time::Duration::from_secs(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map_err(|_| E::custom("Negative duration"))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_seconds(v)
            .map(|secs| Duration(std::time::Duration::from_secs(secs)))
            .ok_or_else(|| E::custom("Invalid duration"))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }
}
