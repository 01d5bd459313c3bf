//! Synchronous serve loop over framed byte streams.

use std::io::{self, Read, Write};

use quill_protocol::{MessageReader, ProtocolError};
use tracing::debug;

use crate::dispatch::Dispatcher;

pub(crate) const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Errors that abort a serve loop.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Reading or decoding an inbound frame failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// Writing a reply frame failed.
    #[error("failed to write reply: {0}")]
    Write(#[source] io::Error),
}

/// Reads messages from an input stream, dispatches them, and writes the
/// replies back as frames.
#[derive(Debug)]
pub struct Server<R: Read, W: Write, D: Dispatcher> {
    reader: MessageReader<R>,
    writer: W,
    dispatcher: D,
}

impl<R: Read, W: Write, D: Dispatcher> Server<R, W, D> {
    /// Creates a server over the given streams and dispatcher.
    pub fn new(reader: R, writer: W, dispatcher: D) -> Self {
        Self {
            reader: MessageReader::new(reader),
            writer,
            dispatcher,
        }
    }

    /// Serves messages until the input stream ends cleanly.
    ///
    /// The replies for each inbound message are written and the output is
    /// flushed before the next read, so a blocked client never waits on a
    /// reply the server has already produced.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Protocol`] when reading or decoding a frame
    /// fails and [`ServeError::Write`] when a reply cannot be written.
    pub fn run(&mut self) -> Result<(), ServeError> {
        while let Some(message) = self.reader.read_message()? {
            debug!(target: SERVER_TARGET, message = %message, "received message");
            for reply in self.dispatcher.dispatch(message) {
                debug!(target: SERVER_TARGET, message = %reply, "sending reply");
                let frame = reply.serialize()?;
                self.writer.write_all(&frame).map_err(ServeError::Write)?;
            }
            self.writer.flush().map_err(ServeError::Write)?;
        }
        Ok(())
    }
}
