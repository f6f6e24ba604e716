//! Typed decoding for telephony conference status callbacks.
//!
//! Providers deliver conference lifecycle and recording notifications as
//! HTTP callbacks, either URL-encoded form bodies or JSON documents. This
//! crate decodes both payload shapes into the same typed records,
//! validates them, and re-serializes them to the provider's JSON layout.
//!
//! # Example
//!
//! ```rust
//! use callhook_core::{from_form, ConferenceEvent, EventStatus};
//!
//! let body = "ConferenceSid=CF1234&StatusCallbackEvent=participant-join&CallSid=CA1234";
//! let event: ConferenceEvent = from_form(body)?;
//!
//! assert_eq!(event.status_callback_event, EventStatus::ParticipantJoin);
//! assert_eq!(event.call_sid.as_deref(), Some("CA1234"));
//! # Ok::<(), callhook_core::DecodeError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod conference;
pub mod decode;
pub mod error;
pub mod recording;
pub mod time;
pub mod validate;

pub use conference::{ConferenceEndReason, ConferenceEvent, EventStatus};
pub use decode::{from_form, from_json, FormField, FormSchema};
pub use error::{DecodeError, Result, ValidationError};
pub use recording::{RecordingEvent, RecordingStatus};
pub use time::TimeRfc1123z;
pub use validate::{is_valid, Validate};
