//! Conference lifecycle callback events.
//!
//! A provider reports conference activity through status callbacks: the
//! conference starting and ending, participants joining, leaving, muting,
//! holding, speaking, and announcements finishing or failing. Every
//! callback type decodes into the single [`ConferenceEvent`] shape; fields
//! that only accompany some callback types are optional and stay absent
//! through re-serialization.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    decode::{FormField, FormSchema},
    error::ValidationError,
    time::TimeRfc1123z,
    validate::Validate,
};

/// Conference status callback type.
///
/// Closed set of tokens the provider sends in `StatusCallbackEvent`.
/// Parsing rejects anything outside the set, so a value of this type is
/// valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// The conference ended.
    ConferenceEnd,
    /// The conference started.
    ConferenceStart,
    /// A participant left the conference.
    ParticipantLeave,
    /// A participant joined the conference.
    ParticipantJoin,
    /// A participant was muted.
    ParticipantMute,
    /// A participant was unmuted.
    ParticipantUnmute,
    /// A participant was placed on hold.
    ParticipantHold,
    /// A participant was taken off hold.
    ParticipantUnhold,
    /// A participant started speaking.
    ParticipantSpeechStart,
    /// A participant stopped speaking.
    ParticipantSpeechStop,
    /// An announcement finished playing.
    AnnouncementEnd,
    /// An announcement could not be played.
    AnnouncementFail,
}

impl EventStatus {
    /// The wire token for this callback type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConferenceEnd => "conference-end",
            Self::ConferenceStart => "conference-start",
            Self::ParticipantLeave => "participant-leave",
            Self::ParticipantJoin => "participant-join",
            Self::ParticipantMute => "participant-mute",
            Self::ParticipantUnmute => "participant-unmute",
            Self::ParticipantHold => "participant-hold",
            Self::ParticipantUnhold => "participant-unhold",
            Self::ParticipantSpeechStart => "participant-speech-start",
            Self::ParticipantSpeechStop => "participant-speech-stop",
            Self::AnnouncementEnd => "announcement-end",
            Self::AnnouncementFail => "announcement-fail",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conference-end" => Ok(Self::ConferenceEnd),
            "conference-start" => Ok(Self::ConferenceStart),
            "participant-leave" => Ok(Self::ParticipantLeave),
            "participant-join" => Ok(Self::ParticipantJoin),
            "participant-mute" => Ok(Self::ParticipantMute),
            "participant-unmute" => Ok(Self::ParticipantUnmute),
            "participant-hold" => Ok(Self::ParticipantHold),
            "participant-unhold" => Ok(Self::ParticipantUnhold),
            "participant-speech-start" => Ok(Self::ParticipantSpeechStart),
            "participant-speech-stop" => Ok(Self::ParticipantSpeechStop),
            "announcement-end" => Ok(Self::AnnouncementEnd),
            "announcement-fail" => Ok(Self::AnnouncementFail),
            _ => Err(ValidationError::UnknownToken { kind: "EventStatus", value: s.to_string() }),
        }
    }
}

impl Validate for EventStatus {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Serialize for EventStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Why a conference ended.
///
/// Sent in `ReasonConferenceEnded` alongside `conference-end` callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConferenceEndReason {
    /// The conference was ended through the provider API.
    EndedViaApi,
    /// The last participant was kicked out.
    LastParticipantKicked,
    /// The last participant left.
    LastParticipantLeft,
    /// A participant flagged end-conference-on-exit was kicked out.
    EndConferenceOnExitKicked,
    /// A participant flagged end-conference-on-exit left.
    EndConferenceOnExitLeft,
}

impl ConferenceEndReason {
    /// The wire token for this end reason.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndedViaApi => "conference-ended-via-api",
            Self::LastParticipantKicked => "last-participant-kicked",
            Self::LastParticipantLeft => "last-participant-left",
            Self::EndConferenceOnExitKicked => "participant-with-end-conference-on-exit-kicked",
            Self::EndConferenceOnExitLeft => "participant-with-end-conference-on-exit-left",
        }
    }
}

impl fmt::Display for ConferenceEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConferenceEndReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conference-ended-via-api" => Ok(Self::EndedViaApi),
            "last-participant-kicked" => Ok(Self::LastParticipantKicked),
            "last-participant-left" => Ok(Self::LastParticipantLeft),
            "participant-with-end-conference-on-exit-kicked" => {
                Ok(Self::EndConferenceOnExitKicked)
            },
            "participant-with-end-conference-on-exit-left" => Ok(Self::EndConferenceOnExitLeft),
            _ => Err(ValidationError::UnknownToken {
                kind: "ConferenceEndReason",
                value: s.to_string(),
            }),
        }
    }
}

impl Validate for ConferenceEndReason {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Serialize for ConferenceEndReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConferenceEndReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Unified conference status callback record.
///
/// `status_callback_event` identifies the callback type; the optional
/// fields carry whatever that type includes and stay `None` otherwise, so
/// absence survives re-serialization. Wire names are the `PascalCase` form
/// of the field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConferenceEvent {
    /// Identifier of the conference this callback belongs to.
    #[serde(default)]
    pub conference_sid: String,

    /// Human-readable conference name.
    #[serde(default)]
    pub friendly_name: String,

    /// Identifier of the account that owns the conference.
    #[serde(default)]
    pub account_sid: String,

    /// Position of this callback in the conference's event sequence.
    #[serde(default)]
    pub sequence_number: u32,

    /// When the provider emitted the callback.
    #[serde(default)]
    pub timestamp: TimeRfc1123z,

    /// Which callback type this is.
    pub status_callback_event: EventStatus,

    /// Call leg the callback refers to, for participant callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sid: Option<String>,

    /// Whether the participant is muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Whether the participant is on hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<bool>,

    /// Whether the participant is in coaching mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coaching: Option<bool>,

    /// Whether this participant leaving ends the conference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_conference_on_exit: Option<bool>,

    /// Whether the conference starts when this participant enters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_conference_on_enter: Option<bool>,

    /// Call leg whose exit ended the conference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_sid_ending_conference: Option<String>,

    /// Label of the participant whose exit ended the conference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_label_ending_conference: Option<String>,

    /// Why the conference ended. Required for `conference-end` callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_conference_ended: Option<ConferenceEndReason>,

    /// Free-text elaboration of the end reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Why an announcement failed to play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_announcement_failed: Option<String>,

    /// URL of the announcement audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announce_url: Option<String>,
}

impl Validate for ConferenceEvent {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.status_callback_event == EventStatus::ConferenceEnd
            && self.reason_conference_ended.is_none()
        {
            return Err(ValidationError::MissingEndReason);
        }
        Ok(())
    }
}

impl FormSchema for ConferenceEvent {
    const FIELDS: &'static [FormField] = &[
        FormField::text("ConferenceSid"),
        FormField::text("FriendlyName"),
        FormField::text("AccountSid"),
        FormField::uint("SequenceNumber"),
        FormField::text("Timestamp"),
        FormField::text("StatusCallbackEvent"),
        FormField::text("CallSid"),
        FormField::boolean("Muted"),
        FormField::boolean("Hold"),
        FormField::boolean("Coaching"),
        FormField::boolean("EndConferenceOnExit"),
        FormField::boolean("StartConferenceOnEnter"),
        FormField::text("CallSidEndingConference"),
        FormField::text("ParticipantLabelEndingConference"),
        FormField::text("ReasonConferenceEnded"),
        FormField::text("Reason"),
        FormField::text("ReasonAnnouncementFailed"),
        FormField::text("AnnounceUrl"),
    ];
}
