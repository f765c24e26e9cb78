use crate::domain::models::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Sub;

const MILLIS_PER_TENTH: u64 = 100;
const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})(?:[.,](\d{1,7}))?$").expect("time pattern should compile")
});

/// Offset from the start of the media, held in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue {
    millis: u64,
}

impl TimeValue {
    pub const ZERO: TimeValue = TimeValue { millis: 0 };

    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * MILLIS_PER_SECOND,
        }
    }

    pub fn sample(millis: u64) -> Self {
        Self::from_millis(millis).canonical()
    }

    pub fn as_millis(self) -> u64 {
        self.millis
    }

    pub fn canonical(self) -> Self {
        Self {
            millis: self.millis - self.millis % MILLIS_PER_TENTH,
        }
    }

    pub fn is_canonical(self) -> bool {
        self.millis % MILLIS_PER_TENTH == 0
    }

    /// Shifts by a signed offset. Results before zero clamp to zero.
    pub fn add_millis(self, delta_ms: i64) -> Self {
        let millis = if delta_ms >= 0 {
            self.millis.saturating_add(delta_ms.unsigned_abs())
        } else {
            self.millis.saturating_sub(delta_ms.unsigned_abs())
        };
        Self { millis }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let captures = TIME_PATTERN
            .captures(trimmed)
            .ok_or_else(|| AppError::Format(format!("invalid timestamp '{trimmed}'")))?;

        let field = |index: usize| -> Result<u64, AppError> {
            captures
                .get(index)
                .map(|value| value.as_str())
                .unwrap_or("0")
                .parse::<u64>()
                .map_err(|error| AppError::Format(format!("invalid timestamp '{trimmed}': {error}")))
        };
        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(AppError::Format(format!(
                "invalid timestamp '{trimmed}': minutes and seconds must be below 60"
            )));
        }

        // Fraction digits are positional: ".5" is 500ms, ",050" is 50ms.
        let fraction_ms = match captures.get(4) {
            Some(fraction) => {
                let digits = fraction.as_str();
                let padded = format!("{digits:0<3}");
                padded[..3].parse::<u64>().map_err(|error| {
                    AppError::Format(format!("invalid timestamp '{trimmed}': {error}"))
                })?
            }
            None => 0,
        };

        let millis = hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|value| value.checked_add(minutes * MILLIS_PER_MINUTE))
            .and_then(|value| value.checked_add(seconds * MILLIS_PER_SECOND))
            .and_then(|value| value.checked_add(fraction_ms))
            .filter(|value| i64::try_from(*value).is_ok())
            .ok_or_else(|| AppError::Format(format!("timestamp '{trimmed}' is out of range")))?;
        Ok(Self { millis })
    }
}

impl Sub for TimeValue {
    type Output = i64;

    fn sub(self, rhs: TimeValue) -> i64 {
        let delta = i128::from(self.millis) - i128::from(rhs.millis);
        i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.millis / MILLIS_PER_HOUR;
        let minutes = (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let tenths = (self.millis % MILLIS_PER_SECOND) / MILLIS_PER_TENTH;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
    }
}

impl Serialize for TimeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TimeValue::parse(&raw).map_err(serde::de::Error::custom)
    }
}
