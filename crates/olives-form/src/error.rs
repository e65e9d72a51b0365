//! Codec error type.
//!
//! Codec failures are programmer/schema errors rather than expected
//! runtime conditions: they are fatal to the single encode/decode call,
//! never produce partial results, and carry the offending field path so
//! the HTTP boundary can turn them into a useful client error.

use thiserror::Error;

/// Error raised by flat-form encoding, decoding, and the multipart
/// wire layer.
#[derive(Error, Debug)]
pub enum CodecError {
    /// No value exists at the given path. Sequence probing treats this
    /// as end-of-sequence; struct decoding treats it as a skippable
    /// field. It only escapes to the caller when the root is absent.
    #[error("missing value at `{path}`")]
    Missing { path: String },

    /// A value exists at the path but cannot be converted to the
    /// target type.
    #[error("cannot convert value at `{path}` to {target}: {reason}")]
    Conversion {
        path: String,
        target: &'static str,
        reason: String,
    },

    /// A value exists at the path but is the wrong kind (text where a
    /// file is required, or vice versa).
    #[error("expected a {expected} value at `{path}`")]
    UnexpectedValueKind {
        path: String,
        expected: &'static str,
    },

    /// The target type has no flat-form decoding.
    #[error("type {type_name} cannot be decoded from a flat form")]
    UnsupportedType { type_name: &'static str },

    /// The multipart boundary token is empty or contains characters
    /// outside the RFC 2046 boundary alphabet.
    #[error("invalid multipart boundary: {0}")]
    InvalidBoundary(String),

    /// The multipart payload does not follow the expected grammar.
    #[error("malformed multipart payload: {0}")]
    MalformedPayload(String),
}

impl CodecError {
    /// Whether this error merely reports an absent value.
    pub fn is_missing(&self) -> bool {
        matches!(self, CodecError::Missing { .. })
    }
}
