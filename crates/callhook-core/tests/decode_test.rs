//! Integration tests for dual-channel callback decoding.
//!
//! Feeds the same logical payload through the form and JSON channels and
//! verifies both produce the same record, that validation agrees, and that
//! re-serialization reproduces the provider's JSON byte for byte.

use anyhow::Result;
use callhook_core::{
    from_form, from_json, is_valid, ConferenceEndReason, ConferenceEvent, DecodeError,
    EventStatus, FormSchema, RecordingEvent, RecordingStatus, Validate,
};
use callhook_testing::{fixtures::scenarios, ConferenceEventBuilder, RecordingEventBuilder};

/// Decodes a payload through both channels and checks they agree.
///
/// Returns the decoded record after asserting validity and that the
/// serialized form reproduces `json` exactly.
fn decode_matched<T>(form: &str, json: &str) -> Result<T>
where
    T: FormSchema + Validate + serde::Serialize + PartialEq + std::fmt::Debug,
{
    let decoded_form: T = from_form(form)?;
    let decoded_json: T = from_json(json.as_bytes())?;

    assert_eq!(decoded_form, decoded_json, "channels disagree");
    assert!(is_valid(&decoded_form));
    assert_eq!(serde_json::to_string(&decoded_form)?, json);

    Ok(decoded_form)
}

/// Verifies a participant-mute callback decodes identically from form and
/// JSON payloads and re-serializes to the provider layout.
///
/// The form body uses a lowercase `muted` key, which must match the
/// canonical `Muted` field case-insensitively.
#[test]
fn participant_mute_callback_round_trips_on_both_channels() -> Result<()> {
    let form = "ConferenceSid=SID1234&FriendlyName=call-name&AccountSid=AID1234&muted=true&StatusCallbackEvent=participant-mute&Timestamp=Mon, 02 Jan 2006 15:04:05 -0700&CallSid=CA1234";
    let json = r#"{"ConferenceSid":"SID1234","FriendlyName":"call-name","AccountSid":"AID1234","SequenceNumber":0,"Timestamp":"Mon, 02 Jan 2006 15:04:05 -0700","StatusCallbackEvent":"participant-mute","CallSid":"CA1234","Muted":true}"#;

    let event: ConferenceEvent = decode_matched(form, json)?;

    assert_eq!(event.status_callback_event, EventStatus::ParticipantMute);
    assert_eq!(event.call_sid.as_deref(), Some("CA1234"));
    assert_eq!(event.muted, Some(true));
    assert_eq!(event.hold, None);
    Ok(())
}

/// Verifies a conference-end callback carrying an end reason decodes and
/// round-trips, including the plus-encoded free-text reason.
#[test]
fn conference_end_callback_round_trips_on_both_channels() -> Result<()> {
    let form = "ConferenceSid=SID1234&FriendlyName=call-name&AccountSid=AID1234&StatusCallbackEvent=conference-end&Timestamp=Mon, 02 Jan 2006 15:04:05 -0700&CallSidEndingConference=SID1234&ParticipantLabelEndingConference=PID1234&ReasonConferenceEnded=conference-ended-via-api&Reason=ended+by+host";
    let json = r#"{"ConferenceSid":"SID1234","FriendlyName":"call-name","AccountSid":"AID1234","SequenceNumber":0,"Timestamp":"Mon, 02 Jan 2006 15:04:05 -0700","StatusCallbackEvent":"conference-end","CallSidEndingConference":"SID1234","ParticipantLabelEndingConference":"PID1234","ReasonConferenceEnded":"conference-ended-via-api","Reason":"ended by host"}"#;

    let event: ConferenceEvent = decode_matched(form, json)?;

    assert_eq!(event.reason_conference_ended, Some(ConferenceEndReason::EndedViaApi));
    assert_eq!(event.reason.as_deref(), Some("ended by host"));
    assert_eq!(event.call_sid, None);
    Ok(())
}

/// Verifies an announcement-fail callback with the full participant flag
/// set decodes and round-trips.
#[test]
fn announcement_failure_callback_round_trips_on_both_channels() -> Result<()> {
    let form = "ConferenceSid=SID1234&FriendlyName=call-name&AccountSid=AID1234&Timestamp=Mon, 02 Jan 2006 15:04:05 -0700&StatusCallbackEvent=announcement-fail&CallSid=CA1234&muted=true&Hold=false&Coaching=false&EndConferenceOnExit=true&StartConferenceOnEnter=false&ReasonAnnouncementFailed=timeout&AnnounceUrl=http://some.url/file.mp4";
    let json = r#"{"ConferenceSid":"SID1234","FriendlyName":"call-name","AccountSid":"AID1234","SequenceNumber":0,"Timestamp":"Mon, 02 Jan 2006 15:04:05 -0700","StatusCallbackEvent":"announcement-fail","CallSid":"CA1234","Muted":true,"Hold":false,"Coaching":false,"EndConferenceOnExit":true,"StartConferenceOnEnter":false,"ReasonAnnouncementFailed":"timeout","AnnounceUrl":"http://some.url/file.mp4"}"#;

    let event: ConferenceEvent = decode_matched(form, json)?;

    assert_eq!(event.status_callback_event, EventStatus::AnnouncementFail);
    assert_eq!(event.reason_announcement_failed.as_deref(), Some("timeout"));
    assert_eq!(event.announce_url.as_deref(), Some("http://some.url/file.mp4"));
    assert_eq!(event.end_conference_on_exit, Some(true));
    assert_eq!(event.start_conference_on_enter, Some(false));
    Ok(())
}

/// Verifies a recording status callback decodes identically from both
/// channels and re-serializes to the provider layout.
#[test]
fn recording_callback_round_trips_on_both_channels() -> Result<()> {
    let form = "AccountSid=AID1234&ConferenceSid=SID1234&RecordingSid=RID1234&RecordingUrl=http://some.url/file.wav&RecordingStatus=completed&RecordingDuration=63&RecordingChannels=1&RecordingStartTime=Mon, 02 Jan 2006 15:04:05 -0700&RecordingSource=StartConferenceRecordingAPI";
    let json = r#"{"AccountSid":"AID1234","ConferenceSid":"SID1234","RecordingSid":"RID1234","RecordingUrl":"http://some.url/file.wav","RecordingStatus":"completed","RecordingDuration":63,"RecordingChannels":1,"RecordingStartTime":"Mon, 02 Jan 2006 15:04:05 -0700","RecordingSource":"StartConferenceRecordingAPI"}"#;

    let event: RecordingEvent = decode_matched(form, json)?;

    assert_eq!(event.recording_status, RecordingStatus::Completed);
    assert_eq!(event.recording_duration, 63);
    assert_eq!(event.recording_channels, 1);
    Ok(())
}

/// Verifies an unrecognized status token is rejected on both channels
/// with the offending value in the message.
#[test]
fn unknown_status_token_is_rejected_on_both_channels() {
    let builder = ConferenceEventBuilder::with_defaults()
        .field("StatusCallbackEvent", "conference-endXX");

    let form_err = from_form::<ConferenceEvent>(&builder.form_body()).unwrap_err();
    let json_err = from_json::<ConferenceEvent>(builder.json_body().as_bytes()).unwrap_err();

    for err in [form_err, json_err] {
        assert!(
            err.to_string().contains("unknown EventStatus value: conference-endXX"),
            "unexpected message: {err}"
        );
    }
}

/// Verifies an unrecognized end reason token is rejected on both channels.
#[test]
fn unknown_end_reason_token_is_rejected_on_both_channels() {
    let builder = ConferenceEventBuilder::with_defaults()
        .status(EventStatus::ConferenceEnd)
        .field("ReasonConferenceEnded", "conference-ended-via-apiXX");

    let form_err = from_form::<ConferenceEvent>(&builder.form_body()).unwrap_err();
    let json_err = from_json::<ConferenceEvent>(builder.json_body().as_bytes()).unwrap_err();

    for err in [form_err, json_err] {
        assert!(
            err.to_string().contains("unknown ConferenceEndReason value: conference-ended-via-apiXX"),
            "unexpected message: {err}"
        );
    }
}

/// Verifies a conference-end callback without an end reason decodes
/// structurally but fails validation on both channels.
#[test]
fn conference_end_without_reason_is_rejected_as_semantic() {
    let builder = ConferenceEventBuilder::with_defaults().status(EventStatus::ConferenceEnd);

    let form_err = from_form::<ConferenceEvent>(&builder.form_body()).unwrap_err();
    let json_err = from_json::<ConferenceEvent>(builder.json_body().as_bytes()).unwrap_err();

    for err in [form_err, json_err] {
        assert!(matches!(err, DecodeError::Validation(_)), "unexpected class: {err:?}");
        assert_eq!(err.to_string(), "decoded error: event ReasonConferenceEnded empty");
    }
}

/// Verifies an unrecognized recording status token is rejected on both
/// channels.
#[test]
fn unknown_recording_status_is_rejected_on_both_channels() {
    let builder = RecordingEventBuilder::with_defaults().field("RecordingStatus", "completedXX");

    let form_err = from_form::<RecordingEvent>(&builder.form_body()).unwrap_err();
    let json_err = from_json::<RecordingEvent>(builder.json_body().as_bytes()).unwrap_err();

    for err in [form_err, json_err] {
        assert!(
            err.to_string().contains("unknown RecordingStatus value: completedXX"),
            "unexpected message: {err}"
        );
    }
}

/// Verifies a payload missing the status field fails structurally rather
/// than semantically. The status has no default, so serde reports it.
#[test]
fn missing_status_field_is_a_structural_error() {
    let err =
        from_form::<ConferenceEvent>("ConferenceSid=SID1234&CallSid=CA1234").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "unexpected class: {err:?}");
    assert!(err.to_string().contains("missing field"), "unexpected message: {err}");

    let err = from_json::<ConferenceEvent>(br#"{"ConferenceSid":"SID1234"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "unexpected class: {err:?}");
    assert!(err.to_string().contains("missing field"), "unexpected message: {err}");
}

/// Verifies JSON `null` clears an optional field but is rejected on a
/// plain field, where only omission falls back to the zero value.
#[test]
fn json_null_is_accepted_only_for_optional_fields() {
    let event: ConferenceEvent = from_json(
        br#"{"ConferenceSid":"SID1234","StatusCallbackEvent":"participant-join","CallSid":null,"Muted":null}"#,
    )
    .unwrap();
    assert_eq!(event.call_sid, None);
    assert_eq!(event.muted, None);

    // Cleared optionals serialize as omitted, not as null.
    let json = serde_json::to_string(&event).unwrap();
    assert!(!json.contains("CallSid"), "unexpected serialization: {json}");

    let err = from_json::<ConferenceEvent>(
        br#"{"ConferenceSid":null,"StatusCallbackEvent":"participant-join"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "unexpected class: {err:?}");
    assert!(err.to_string().contains("invalid type"), "unexpected message: {err}");
}

/// Verifies form keys match the canonical names case-insensitively while
/// output always uses the canonical spelling.
#[test]
fn form_keys_match_case_insensitively() {
    let event: ConferenceEvent = from_form(
        "CONFERENCESID=SID1234&statuscallbackevent=participant-join&callsid=CA1234",
    )
    .unwrap();

    assert_eq!(event.conference_sid, "SID1234");
    assert_eq!(event.status_callback_event, EventStatus::ParticipantJoin);

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""ConferenceSid":"SID1234""#));
    assert!(json.contains(r#""StatusCallbackEvent":"participant-join""#));
}

/// Verifies keys outside the record's schema are ignored instead of
/// rejected.
#[test]
fn unknown_form_keys_are_ignored() {
    let event: ConferenceEvent = from_form(
        "StatusCallbackEvent=participant-join&NotAField=anything&AnotherOne=42",
    )
    .unwrap();

    assert_eq!(event.status_callback_event, EventStatus::ParticipantJoin);
    assert_eq!(event.conference_sid, "");
}

/// Verifies an empty form value is treated as if the key were absent.
#[test]
fn empty_form_values_are_treated_as_absent() {
    let event: ConferenceEvent =
        from_form("StatusCallbackEvent=participant-leave&CallSid=&Muted=").unwrap();

    assert_eq!(event.call_sid, None);
    assert_eq!(event.muted, None);

    // An empty status is absent too, which makes the payload structurally
    // incomplete rather than an unknown token.
    let err = from_form::<ConferenceEvent>("StatusCallbackEvent=").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "unexpected class: {err:?}");
}

/// Verifies the first occurrence wins when a form key repeats.
#[test]
fn repeated_form_keys_keep_the_first_value() {
    let event: ConferenceEvent = from_form(
        "StatusCallbackEvent=participant-join&CallSid=CA_first&CallSid=CA_second&callsid=CA_third",
    )
    .unwrap();

    assert_eq!(event.call_sid.as_deref(), Some("CA_first"));
}

/// Verifies a form value that cannot coerce to its field's kind reports
/// the field, the expected kind, and the raw value.
#[test]
fn malformed_form_values_report_the_coercion_failure() {
    let err = from_form::<ConferenceEvent>(
        "StatusCallbackEvent=participant-join&SequenceNumber=abc",
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Form { .. }), "unexpected class: {err:?}");
    assert_eq!(err.to_string(), "form field SequenceNumber expects unsigned integer, got 'abc'");

    let err = from_form::<ConferenceEvent>(
        "StatusCallbackEvent=participant-join&Muted=maybe",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "form field Muted expects boolean, got 'maybe'");
}

/// Verifies scenario fixtures decode to the same record on both channels.
#[test]
fn scenario_payloads_decode_identically_on_both_channels() {
    let conference = scenarios::conference_end();
    let from_form_body: ConferenceEvent = from_form(&conference.form_body()).unwrap();
    let from_json_body: ConferenceEvent =
        from_json(conference.json_body().as_bytes()).unwrap();
    assert_eq!(from_form_body, from_json_body);
    assert_eq!(from_form_body.reason_conference_ended, Some(ConferenceEndReason::EndedViaApi));

    let recording = scenarios::recording_completed();
    let from_form_body: RecordingEvent = from_form(&recording.form_body()).unwrap();
    let from_json_body: RecordingEvent = from_json(recording.json_body().as_bytes()).unwrap();
    assert_eq!(from_form_body, from_json_body);
    assert_eq!(from_form_body.recording_status, RecordingStatus::Completed);
}
