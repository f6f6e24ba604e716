//! Webhook timestamps in the provider's RFC 1123 layout.
//!
//! Callbacks carry timestamps as text like `Mon, 02 Jan 2006 15:04:05
//! -0700`: RFC 1123 with a numeric timezone offset. [`TimeRfc1123z`] parses
//! and formats exactly that layout, keeping the provider's offset so that
//! re-serialization reproduces the original text.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The provider's timestamp layout.
const LAYOUT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A callback timestamp with its original timezone offset.
///
/// Equality compares instants, so two values naming the same moment at
/// different offsets compare equal. The zero value is the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRfc1123z(DateTime<FixedOffset>);

impl TimeRfc1123z {
    /// Parses provider-layout text, falling back to the zero value.
    ///
    /// Lenient construction for timestamps from already-validated sources.
    /// Use the [`FromStr`] implementation when a parse failure must surface.
    pub fn new(text: &str) -> Self {
        text.parse().unwrap_or_default()
    }

    /// The timestamp with the provider's offset.
    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// The timestamp normalized to UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

impl Default for TimeRfc1123z {
    fn default() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for TimeRfc1123z {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl fmt::Display for TimeRfc1123z {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LAYOUT))
    }
}

impl FromStr for TimeRfc1123z {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_str(s, LAYOUT).map(Self)
    }
}

impl Serialize for TimeRfc1123z {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeRfc1123z {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
