//! Test fixtures for conference callback payloads.
//!
//! Provides builders that render the same event as either a URL-encoded
//! form body or a JSON document, so tests can exercise both decode
//! channels from one description.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{ConferenceEventBuilder, RecordingEventBuilder};
