//! Payload builders for conference and recording callbacks.
//!
//! Each builder keeps the raw wire fields and renders them as a URL-encoded
//! form body or as a JSON document. The form body preserves insertion order;
//! the JSON document orders keys alphabetically. Tests describe an event
//! once and feed both decode channels from it.

use callhook_core::{
    decode::FieldKind, ConferenceEndReason, ConferenceEvent, EventStatus, FormField, FormSchema,
    RecordingEvent, RecordingStatus,
};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Builder for conference status callback payloads.
pub struct ConferenceEventBuilder {
    fields: Vec<(String, String)>,
}

impl ConferenceEventBuilder {
    /// Creates a builder with no fields set.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Creates a builder describing a typical participant-join callback.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.set("ConferenceSid", "CF1234".to_string());
        builder.set("FriendlyName", "test-conference".to_string());
        builder.set("AccountSid", "AC1234".to_string());
        builder.set("SequenceNumber", "1".to_string());
        builder.set("Timestamp", "Tue, 09 Apr 2024 16:42:13 +0000".to_string());
        builder.set("StatusCallbackEvent", EventStatus::ParticipantJoin.as_str().to_string());
        builder.set("CallSid", "CA1234".to_string());
        builder
    }

    fn set(&mut self, name: &str, value: String) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    /// Sets the conference identifier.
    #[must_use]
    pub fn conference_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("ConferenceSid", sid.into());
        self
    }

    /// Sets the human-readable conference name.
    #[must_use]
    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.set("FriendlyName", name.into());
        self
    }

    /// Sets the owning account identifier.
    #[must_use]
    pub fn account_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("AccountSid", sid.into());
        self
    }

    /// Sets the event sequence number.
    #[must_use]
    pub fn sequence(mut self, number: u32) -> Self {
        self.set("SequenceNumber", number.to_string());
        self
    }

    /// Sets the callback timestamp as provider-formatted text.
    #[must_use]
    pub fn timestamp(mut self, text: impl Into<String>) -> Self {
        self.set("Timestamp", text.into());
        self
    }

    /// Sets the callback type.
    #[must_use]
    pub fn status(mut self, status: EventStatus) -> Self {
        self.set("StatusCallbackEvent", status.as_str().to_string());
        self
    }

    /// Sets the participant call leg.
    #[must_use]
    pub fn call_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("CallSid", sid.into());
        self
    }

    /// Sets the participant mute flag.
    #[must_use]
    pub fn muted(mut self, muted: bool) -> Self {
        self.set("Muted", muted.to_string());
        self
    }

    /// Sets the participant hold flag.
    #[must_use]
    pub fn hold(mut self, hold: bool) -> Self {
        self.set("Hold", hold.to_string());
        self
    }

    /// Sets the participant coaching flag.
    #[must_use]
    pub fn coaching(mut self, coaching: bool) -> Self {
        self.set("Coaching", coaching.to_string());
        self
    }

    /// Sets the end-conference-on-exit flag.
    #[must_use]
    pub fn end_conference_on_exit(mut self, flag: bool) -> Self {
        self.set("EndConferenceOnExit", flag.to_string());
        self
    }

    /// Sets the start-conference-on-enter flag.
    #[must_use]
    pub fn start_conference_on_enter(mut self, flag: bool) -> Self {
        self.set("StartConferenceOnEnter", flag.to_string());
        self
    }

    /// Sets why the conference ended.
    #[must_use]
    pub fn end_reason(mut self, reason: ConferenceEndReason) -> Self {
        self.set("ReasonConferenceEnded", reason.as_str().to_string());
        self
    }

    /// Sets the free-text end reason.
    #[must_use]
    pub fn reason(mut self, text: impl Into<String>) -> Self {
        self.set("Reason", text.into());
        self
    }

    /// Sets an arbitrary wire field, for malformed or unknown payloads.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.set(&name, value.into());
        self
    }

    /// Renders the event as a URL-encoded form body.
    pub fn form_body(&self) -> String {
        encode_form(&self.fields)
    }

    /// Renders the event as a JSON document with provider field types.
    pub fn json_body(&self) -> String {
        encode_json(&self.fields, ConferenceEvent::FIELDS)
    }
}

impl Default for ConferenceEventBuilder {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for recording status callback payloads.
pub struct RecordingEventBuilder {
    fields: Vec<(String, String)>,
}

impl RecordingEventBuilder {
    /// Creates a builder with no fields set.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Creates a builder describing a completed conference recording.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.set("AccountSid", "AC1234".to_string());
        builder.set("ConferenceSid", "CF1234".to_string());
        builder.set("RecordingSid", "RE1234".to_string());
        builder.set("RecordingUrl", "https://api.example.com/recordings/RE1234".to_string());
        builder.set("RecordingStatus", RecordingStatus::Completed.as_str().to_string());
        builder.set("RecordingDuration", "42".to_string());
        builder.set("RecordingChannels", "1".to_string());
        builder.set("RecordingStartTime", "Tue, 09 Apr 2024 16:40:00 +0000".to_string());
        builder.set("RecordingSource", "StartConferenceRecordingAPI".to_string());
        builder
    }

    fn set(&mut self, name: &str, value: String) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    /// Sets the owning account identifier.
    #[must_use]
    pub fn account_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("AccountSid", sid.into());
        self
    }

    /// Sets the recorded conference identifier.
    #[must_use]
    pub fn conference_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("ConferenceSid", sid.into());
        self
    }

    /// Sets the recording identifier.
    #[must_use]
    pub fn recording_sid(mut self, sid: impl Into<String>) -> Self {
        self.set("RecordingSid", sid.into());
        self
    }

    /// Sets the media URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.set("RecordingUrl", url.into());
        self
    }

    /// Sets the recording state.
    #[must_use]
    pub fn status(mut self, status: RecordingStatus) -> Self {
        self.set("RecordingStatus", status.as_str().to_string());
        self
    }

    /// Sets the recording length in seconds.
    #[must_use]
    pub fn duration(mut self, seconds: u32) -> Self {
        self.set("RecordingDuration", seconds.to_string());
        self
    }

    /// Sets the channel count.
    #[must_use]
    pub fn channels(mut self, channels: u32) -> Self {
        self.set("RecordingChannels", channels.to_string());
        self
    }

    /// Sets the recording start time as provider-formatted text.
    #[must_use]
    pub fn start_time(mut self, text: impl Into<String>) -> Self {
        self.set("RecordingStartTime", text.into());
        self
    }

    /// Sets what initiated the recording.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.set("RecordingSource", source.into());
        self
    }

    /// Sets an arbitrary wire field, for malformed or unknown payloads.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.set(&name, value.into());
        self
    }

    /// Renders the event as a URL-encoded form body.
    pub fn form_body(&self) -> String {
        encode_form(&self.fields)
    }

    /// Renders the event as a JSON document with provider field types.
    pub fn json_body(&self) -> String {
        encode_json(&self.fields, RecordingEvent::FIELDS)
    }
}

impl Default for RecordingEventBuilder {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn encode_form(fields: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// Renders raw fields as JSON, typing each value by its form schema kind.
///
/// Values that do not parse as the declared kind stay strings, so decoding
/// the rendered document surfaces the mismatch the same way a JSON-posting
/// provider would.
fn encode_json(fields: &[(String, String)], schema: &[FormField]) -> String {
    let mut object = Map::new();
    for (name, value) in fields {
        let kind = schema
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .map_or(FieldKind::Text, |field| field.kind);
        object.insert(name.clone(), typed_value(kind, value));
    }
    Value::Object(object).to_string()
}

fn typed_value(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Bool => {
            raw.parse::<bool>().map_or_else(|_| Value::String(raw.to_string()), Value::Bool)
        },
        FieldKind::UInt => {
            raw.parse::<u64>().map_or_else(|_| Value::String(raw.to_string()), Value::from)
        },
        FieldKind::Text => Value::String(raw.to_string()),
    }
}

/// Factory functions for common callback scenarios.
pub mod scenarios {
    use super::{ConferenceEndReason, ConferenceEventBuilder, EventStatus, RecordingEventBuilder};

    /// A participant being muted mid-conference.
    pub fn participant_mute() -> ConferenceEventBuilder {
        ConferenceEventBuilder::with_defaults().status(EventStatus::ParticipantMute).muted(true)
    }

    /// A conference ended through the provider API.
    pub fn conference_end() -> ConferenceEventBuilder {
        ConferenceEventBuilder::with_defaults()
            .status(EventStatus::ConferenceEnd)
            .end_reason(ConferenceEndReason::EndedViaApi)
            .reason("ended by host")
            .field("CallSidEndingConference", "CA1234")
            .field("ParticipantLabelEndingConference", "host")
    }

    /// An announcement that failed to play.
    pub fn announcement_fail() -> ConferenceEventBuilder {
        ConferenceEventBuilder::with_defaults()
            .status(EventStatus::AnnouncementFail)
            .field("ReasonAnnouncementFailed", "timeout")
            .field("AnnounceUrl", "http://media.example.com/greeting.mp3")
    }

    /// A finished conference recording.
    pub fn recording_completed() -> RecordingEventBuilder {
        RecordingEventBuilder::with_defaults()
    }
}
