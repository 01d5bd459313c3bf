//! Error types for message parsing and stream framing.

use std::io;

use thiserror::Error;

/// Errors surfaced while framing, reading, or decoding messages.
///
/// The transport never recovers internally: each violation is reported
/// immediately and the caller decides whether to abandon or restart the
/// stream.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// IO error on the underlying byte source or sink.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Message content is not valid JSON.
    #[error("invalid JSON content: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame does not contain the `\r\n\r\n` header terminator.
    #[error(r"frame does not contain \r\n\r\n")]
    MissingTerminator,

    /// Frame header is structurally invalid.
    #[error("malformed frame header: {reason}")]
    MalformedHeader {
        /// Description of the structural violation.
        reason: String,
    },

    /// Declared content length is not a decimal integer.
    #[error("invalid content length: '{value}'")]
    InvalidContentLength {
        /// The text found where a decimal length was expected.
        value: String,
    },

    /// The source ended before the declared content length was read.
    #[error("content truncated: expected {expected} bytes, read {read}")]
    ContentTruncated {
        /// Bytes the header declared.
        expected: usize,
        /// Bytes actually read before the source ended.
        read: usize,
    },

    /// The source ended part-way through a frame header.
    #[error("stream ended with {pending} stray bytes")]
    TrailingBytes {
        /// Bytes accumulated without reaching a message boundary.
        pending: usize,
    },

    /// Decoded content lacks a field required by the inferred message kind.
    #[error("message content is missing required field '{field}'")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
}

impl ProtocolError {
    /// Creates a malformed header error.
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            reason: reason.into(),
        }
    }

    /// Creates an invalid content length error.
    pub fn invalid_content_length(value: impl Into<String>) -> Self {
        Self::InvalidContentLength {
            value: value.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
