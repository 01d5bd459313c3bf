//! Content-Length frame codec.
//!
//! Each frame carries a UTF-8 JSON body prefixed by a header block:
//! ```text
//! Content-Length: <byte length of body>\r\n
//! Content-Type: application/vscode-jsonrpc;charset=utf-8\r\n
//! \r\n
//! <body>
//! ```
//! The declared length is the exact byte count of the body, and the header
//! block always ends with a blank line.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ProtocolError;

/// MIME type declared for every frame body.
pub const CONTENT_TYPE: &str = "application/vscode-jsonrpc;charset=utf-8";

/// Byte sequence terminating the header block.
pub(crate) const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Serialises `content` and prefixes the framing header.
///
/// The body is encoded with the field order of `content`'s `Serialize`
/// implementation, so callers control which field is emitted first.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if `content` cannot be serialised.
pub fn encode<T: Serialize>(content: &T) -> Result<Vec<u8>, ProtocolError> {
    let body = serde_json::to_vec(content)?;
    let header = format!(
        "Content-Length: {}\r\nContent-Type: {CONTENT_TYPE}\r\n\r\n",
        body.len()
    );
    let mut frame = Vec::with_capacity(header.len() + body.len());
    frame.extend_from_slice(header.as_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decodes the JSON body of a complete frame.
///
/// Splits `buffer` on the first header terminator and JSON-decodes everything
/// after it. The header text itself is not validated here; the stream reader
/// checks it before a full frame is assembled.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingTerminator`] if no blank line separates
/// header and body, or [`ProtocolError::Json`] if the body is not valid JSON.
pub fn decode(buffer: &[u8]) -> Result<Value, ProtocolError> {
    let boundary = buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .ok_or(ProtocolError::MissingTerminator)?;
    let content = &buffer[boundary + HEADER_TERMINATOR.len()..];
    Ok(serde_json::from_slice(content)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn encodes_exact_header() {
        let frame = encode(&json!({"a": 1})).expect("encode failed");

        let expected =
            b"Content-Length: 7\r\nContent-Type: application/vscode-jsonrpc;charset=utf-8\r\n\r\n{\"a\":1}";
        assert_eq!(frame, expected);
    }

    #[rstest]
    fn declared_length_matches_body() {
        let frame = encode(&json!({"method": "note/create", "id": 42})).expect("encode failed");
        let text = String::from_utf8(frame).expect("invalid utf8");

        let (header, body) = text.split_once("\r\n\r\n").expect("terminator missing");
        let declared: usize = header
            .split_once(' ')
            .and_then(|(_, rest)| rest.split_once('\r'))
            .map(|(digits, _)| digits.parse().expect("length not numeric"))
            .expect("header missing length");
        assert_eq!(declared, body.len());
    }

    #[rstest]
    fn decodes_body_after_first_terminator() {
        let frame = b"Content-Length: 4\r\n\r\ntrue";

        let content = decode(frame).expect("decode failed");

        assert_eq!(content, json!(true));
    }

    #[rstest]
    fn round_trips_content() {
        let content = json!({"jsonrpc": "2.0", "id": 7, "method": "note/open"});

        let frame = encode(&content).expect("encode failed");
        let decoded = decode(&frame).expect("decode failed");

        assert_eq!(decoded, content);
    }

    #[rstest]
    fn rejects_frame_without_terminator() {
        let result = decode(b"Content-Length: 4true");

        assert!(matches!(result, Err(ProtocolError::MissingTerminator)));
    }

    #[rstest]
    fn propagates_invalid_json_body() {
        let result = decode(b"Content-Length: 3\r\n\r\n{{{");

        assert!(matches!(result, Err(ProtocolError::Json(_))));
    }
}
