#![no_main]

//! Fuzz target for form-channel callback decoding.
//!
//! Feeds arbitrary UTF-8 bodies through the form decode channel for both
//! record types. Key matching, value coercion, and validation must reject
//! bad input with errors, never panics.

use callhook_core::{from_form, ConferenceEvent, RecordingEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = from_form::<ConferenceEvent>(body);
        let _ = from_form::<RecordingEvent>(body);
    }
});
