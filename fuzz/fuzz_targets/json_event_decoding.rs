#![no_main]

//! Fuzz target for JSON callback decoding.
//!
//! Feeds arbitrary bytes through the JSON decode channel for both record
//! types. Malformed documents, bad tokens, and semantic rule violations
//! must all surface as errors, never as panics.

use callhook_core::{from_json, ConferenceEvent, RecordingEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = from_json::<ConferenceEvent>(data);
    let _ = from_json::<RecordingEvent>(data);
});
