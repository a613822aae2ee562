use std::ops::Deref;

use serde::Deserialize;
use thiserror::Error;

/// A duration written in a human readable form, e.g. `"1m 30s"` or `"250ms"`.
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

impl std::str::FromStr for Duration {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                let split = part
                    .find(|c: char| !c.is_ascii_digit())
                    .filter(|&idx| idx > 0)
                    .ok_or(InvalidDuration)?;
                let (value, unit) = part.split_at(split);
                let value = value.parse::<u64>().map_err(|_| InvalidDuration)?;
                let part = match unit {
                    "ms" => Some(std::time::Duration::from_millis(value)),
                    "s" => Some(std::time::Duration::from_secs(value)),
                    "m" => value.checked_mul(60).map(std::time::Duration::from_secs),
                    "h" => value.checked_mul(60 * 60).map(std::time::Duration::from_secs),
                    "d" => value
                        .checked_mul(24 * 60 * 60)
                        .map(std::time::Duration::from_secs),
                    _ => None,
                }
                .ok_or(InvalidDuration)?;
                total.checked_add(part).ok_or(InvalidDuration)
            })
            .map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid duration")]
pub struct InvalidDuration;

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
