//! Conference recording status callback events.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    decode::{FormField, FormSchema},
    error::ValidationError,
    time::TimeRfc1123z,
    validate::Validate,
};

/// Recording lifecycle state reported in `RecordingStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingStatus {
    /// The recording is still being captured.
    InProgress,
    /// The recording finished and is available for download.
    Completed,
    /// No recording exists for the conference.
    Absent,
}

impl RecordingStatus {
    /// The wire token for this recording state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "absent" => Ok(Self::Absent),
            _ => {
                Err(ValidationError::UnknownToken { kind: "RecordingStatus", value: s.to_string() })
            },
        }
    }
}

impl Validate for RecordingStatus {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Serialize for RecordingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Recording status callback record.
///
/// Sent when a conference recording changes state. All fields except
/// `recording_status` may be absent from the payload and default to their
/// zero values. Wire names are the `PascalCase` form of the field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordingEvent {
    /// Identifier of the account that owns the recording.
    #[serde(default)]
    pub account_sid: String,

    /// Identifier of the conference that was recorded.
    #[serde(default)]
    pub conference_sid: String,

    /// Identifier of the recording itself.
    #[serde(default)]
    pub recording_sid: String,

    /// Where the recording media can be fetched from.
    #[serde(default)]
    pub recording_url: String,

    /// Current state of the recording.
    pub recording_status: RecordingStatus,

    /// Length of the recording in seconds.
    #[serde(default)]
    pub recording_duration: u32,

    /// Number of audio channels in the recording.
    #[serde(default)]
    pub recording_channels: u32,

    /// When the recording started.
    #[serde(default)]
    pub recording_start_time: TimeRfc1123z,

    /// What initiated the recording.
    #[serde(default)]
    pub recording_source: String,
}

impl Validate for RecordingEvent {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl FormSchema for RecordingEvent {
    const FIELDS: &'static [FormField] = &[
        FormField::text("AccountSid"),
        FormField::text("ConferenceSid"),
        FormField::text("RecordingSid"),
        FormField::text("RecordingUrl"),
        FormField::text("RecordingStatus"),
        FormField::uint("RecordingDuration"),
        FormField::uint("RecordingChannels"),
        FormField::text("RecordingStartTime"),
        FormField::text("RecordingSource"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::is_valid;

    #[test]
    fn status_tokens_round_trip() {
        for status in [RecordingStatus::InProgress, RecordingStatus::Completed, RecordingStatus::Absent]
        {
            assert_eq!(status.as_str().parse::<RecordingStatus>().unwrap(), status);
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn unknown_status_is_rejected_with_type_and_value() {
        let err = "paused".parse::<RecordingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown RecordingStatus value: paused");
    }

    #[test]
    fn any_decoded_recording_event_is_valid() {
        let event = RecordingEvent {
            account_sid: "AID1234".to_string(),
            conference_sid: "SID1234".to_string(),
            recording_sid: "RID1234".to_string(),
            recording_url: String::new(),
            recording_status: RecordingStatus::Absent,
            recording_duration: 0,
            recording_channels: 0,
            recording_start_time: TimeRfc1123z::default(),
            recording_source: String::new(),
        };

        assert!(is_valid(&event));
    }
}
