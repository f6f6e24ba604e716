//! Generic decode entry points for webhook payloads.
//!
//! Providers deliver callbacks either as URL-encoded form bodies or as JSON
//! documents. The form channel coerces raw values against the record's
//! [`FormSchema`] and then feeds them through the same serde implementation
//! the JSON channel uses, so a logical payload is accepted or rejected
//! identically regardless of transport. Both entry points finish with the
//! record's [`Validate`] check.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::form_urlencoded;

use crate::{
    error::{DecodeError, Result},
    validate::Validate,
};

/// Value kind a form field coerces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Passed through as a string: identifiers, enum tokens, timestamps.
    Text,
    /// Boolean accepting `1/t/T/TRUE/true/True` and `0/f/F/FALSE/false/False`.
    Bool,
    /// Unsigned decimal integer.
    UInt,
}

impl FieldKind {
    /// Human-readable kind name for error messages.
    const fn expected(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "boolean",
            Self::UInt => "unsigned integer",
        }
    }
}

/// One wire field a record accepts on the form channel.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    /// Canonical wire name, identical to the JSON channel's field name.
    pub name: &'static str,
    /// How the raw value is coerced.
    pub kind: FieldKind,
}

impl FormField {
    /// A field passed through as text.
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    /// A boolean field.
    pub const fn boolean(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Bool }
    }

    /// An unsigned integer field.
    pub const fn uint(name: &'static str) -> Self {
        Self { name, kind: FieldKind::UInt }
    }
}

/// Mapping from form keys onto a record's wire fields.
///
/// Incoming keys are matched case-insensitively against the canonical
/// names; anything not listed is ignored. Coerced values are deserialized
/// through the record's serde implementation, so the form channel cannot
/// drift from the JSON channel.
pub trait FormSchema: DeserializeOwned {
    /// The record's accepted form fields.
    const FIELDS: &'static [FormField];
}

/// Decodes a record from a URL-encoded form body and validates it.
///
/// Unknown keys are ignored, empty values are treated as absent, and the
/// first occurrence wins when a key repeats. Structural failures surface
/// as-is; a record that decodes but breaks a semantic rule is rejected
/// with the `decoded error: ` prefix.
pub fn from_form<T>(body: &str) -> Result<T>
where
    T: FormSchema + Validate,
{
    let mut object = Map::new();

    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        let Some(field) = T::FIELDS.iter().find(|f| f.name.eq_ignore_ascii_case(&key)) else {
            continue;
        };
        if value.is_empty() || object.contains_key(field.name) {
            continue;
        }
        let coerced = coerce(*field, &value).map_err(|err| reject("form", err))?;
        object.insert(field.name.to_string(), coerced);
    }

    let record: T = serde_json::from_value(Value::Object(object))
        .map_err(|err| reject("form", err.into()))?;
    finish(record, "form")
}

/// Decodes a record from JSON bytes and validates it.
///
/// Field names are the canonical provider names; unknown fields are
/// ignored. Structural failures surface as-is; semantic failures carry
/// the `decoded error: ` prefix.
pub fn from_json<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_slice(bytes).map_err(|err| reject("json", err.into()))?;
    finish(record, "json")
}

fn finish<T: Validate>(record: T, channel: &'static str) -> Result<T> {
    if let Err(err) = record.validate() {
        debug!(error = %err, channel, "webhook payload failed validation");
        return Err(err.into());
    }
    trace!(channel, "webhook payload decoded");
    Ok(record)
}

fn reject(channel: &'static str, err: DecodeError) -> DecodeError {
    debug!(error = %err, channel, "webhook payload failed to decode");
    err
}

fn coerce(field: FormField, value: &str) -> Result<Value> {
    let coerced = match field.kind {
        FieldKind::Text => Some(Value::String(value.to_string())),
        FieldKind::Bool => parse_flag(value).map(Value::Bool),
        FieldKind::UInt => value.parse::<u64>().ok().map(Value::from),
    };

    coerced.ok_or_else(|| DecodeError::Form {
        field: field.name,
        expected: field.kind.expected(),
        value: value.to_string(),
    })
}

/// Boolean tokens accepted on the form channel.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
