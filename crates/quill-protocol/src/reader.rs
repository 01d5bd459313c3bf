//! Incremental message reading over any byte stream.
//!
//! [`MessageReader`] pulls one frame at a time from a [`Read`] source,
//! accumulating header bytes until the blank-line terminator arrives and then
//! reading exactly the declared number of content bytes. The reader does no
//! buffering of its own, so callers can hand the underlying stream to a fresh
//! reader without losing bytes; wrap raw file descriptors in a buffered
//! reader first if byte-at-a-time reads would be too slow.

use std::io::{self, Read};

use crate::errors::ProtocolError;
use crate::framing::HEADER_TERMINATOR;
use crate::message::Message;

/// Reads Content-Length framed messages from an underlying byte stream.
#[derive(Debug)]
pub struct MessageReader<R: Read> {
    source: R,
}

impl<R: Read> MessageReader<R> {
    /// Creates a reader over `source`.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads the next message, or `None` when the stream has ended cleanly.
    ///
    /// A clean end is end-of-input on a frame boundary. Interrupted reads are
    /// retried transparently.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TrailingBytes`] when the stream ends part-way
    /// through a header, [`ProtocolError::ContentTruncated`] when it ends
    /// part-way through declared content, header errors from length parsing,
    /// and content errors from [`Message::parse`].
    pub fn read_message(&mut self) -> Result<Option<Message>, ProtocolError> {
        let mut buffer = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            let read = read_with_retry(&mut self.source, &mut byte)?;
            if read == 0 {
                if buffer.is_empty() {
                    return Ok(None);
                }
                return Err(ProtocolError::TrailingBytes {
                    pending: buffer.len(),
                });
            }
            buffer.push(byte[0]);
            if buffer.ends_with(HEADER_TERMINATOR) {
                break;
            }
        }

        let length = parse_declared_length(&buffer)?;
        // The declared length is untrusted; the buffer grows with the bytes
        // that actually arrive rather than being reserved up front.
        let mut content = Vec::new();
        let read = (&mut self.source)
            .take(length as u64)
            .read_to_end(&mut content)?;
        if read < length {
            return Err(ProtocolError::ContentTruncated {
                expected: length,
                read,
            });
        }
        buffer.extend_from_slice(&content);

        Message::parse(&buffer).map(Some)
    }

    /// Returns an iterator yielding messages until the stream ends cleanly.
    ///
    /// Errors are yielded as items rather than ending the iteration, so the
    /// caller decides whether a failed frame is fatal.
    pub fn messages(&mut self) -> Messages<'_, R> {
        Messages { reader: self }
    }
}

/// Iterator over the messages of a [`MessageReader`].
#[derive(Debug)]
pub struct Messages<'a, R: Read> {
    reader: &'a mut MessageReader<R>,
}

impl<R: Read> Iterator for Messages<'_, R> {
    type Item = Result<Message, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_message().transpose()
    }
}

/// Extracts the declared content length from accumulated header bytes.
///
/// The digits sit between the first space and the first line break, so any
/// further header lines are tolerated without being inspected.
fn parse_declared_length(header: &[u8]) -> Result<usize, ProtocolError> {
    let space = header
        .iter()
        .position(|&byte| byte == b' ')
        .ok_or_else(|| ProtocolError::malformed_header("header does not contain a space"))?;
    let separator = header
        .windows(2)
        .position(|pair| pair == b"\r\n")
        .ok_or_else(|| ProtocolError::malformed_header("header does not contain a line break"))?;
    if space > separator {
        return Err(ProtocolError::malformed_header(
            "first space appears after the first line break",
        ));
    }
    let digits = &header[space + 1..separator];
    std::str::from_utf8(digits)
        .ok()
        .and_then(|text| text.parse::<usize>().ok())
        .ok_or_else(|| ProtocolError::invalid_content_length(String::from_utf8_lossy(digits)))
}

/// Reads into `buffer`, retrying when the read is interrupted by a signal.
fn read_with_retry(source: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buffer) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}
