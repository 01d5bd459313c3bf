//! Test harness utilities for the serve loop suites.

use std::io::Cursor;

use serde_json::json;

use quill_protocol::{Message, MessageReader, Notification, Request};

use crate::dispatch::NotImplementedDispatcher;
use crate::server::{ServeError, Server};

/// Scenario world shared across BDD steps.
///
/// Input frames are queued up front; running the loop consumes them and
/// captures whatever the server wrote.
#[derive(Debug, Default)]
pub struct ServerWorld {
    input: Vec<u8>,
    output: Vec<u8>,
    serve_error: Option<ServeError>,
    completed: bool,
}

impl ServerWorld {
    /// Queues a framed request for `method` with a small params payload.
    pub fn push_request(&mut self, method: &str) {
        let message = Message::from(Request::new(13, method, Some(json!({"foo": "bar"}))));
        self.push_frame(&message);
    }

    /// Queues a framed notification for `method`.
    pub fn push_notification(&mut self, method: &str) {
        let message = Message::from(Notification::new(method, None));
        self.push_frame(&message);
    }

    /// Queues a frame whose header lacks the length separator space.
    pub fn push_malformed_frame(&mut self) {
        self.input.extend_from_slice(b"BadHeader\r\n\r\n");
    }

    /// Queues a well-formed frame whose content fits no message kind.
    pub fn push_schema_error_frame(&mut self) {
        let body = br#"{"params": {"foo": "bar"}}"#;
        self.input
            .extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
        self.input.extend_from_slice(body);
    }

    /// Runs a single serve loop over the queued input.
    pub fn run_once(&mut self) {
        let input = std::mem::take(&mut self.input);
        let mut server = Server::new(
            Cursor::new(input),
            &mut self.output,
            NotImplementedDispatcher,
        );
        match server.run() {
            Ok(()) => self.completed = true,
            Err(error) => self.serve_error = Some(error),
        }
    }

    /// Serves the queued input until it closes, restarting after errors.
    pub fn run_until_closed(&mut self) {
        let input = std::mem::take(&mut self.input);
        crate::run_forever(Cursor::new(input), &mut self.output);
        self.completed = true;
    }

    /// Parses every reply frame the server wrote.
    pub fn replies(&self) -> Vec<Message> {
        let mut reader = MessageReader::new(&self.output[..]);
        reader
            .messages()
            .collect::<Result<_, _>>()
            .expect("reply stream failed to parse")
    }

    /// Returns whether the loop reached a clean end of input.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the error that aborted the loop, if any.
    pub fn serve_error(&self) -> Option<&ServeError> {
        self.serve_error.as_ref()
    }

    /// Returns true when the server wrote nothing at all.
    pub fn output_is_empty(&self) -> bool {
        self.output.is_empty()
    }

    fn push_frame(&mut self, message: &Message) {
        let frame = message.serialize().expect("serialize failed");
        self.input.extend_from_slice(&frame);
    }
}

/// Default test world fixture.
pub fn world() -> std::cell::RefCell<ServerWorld> {
    std::cell::RefCell::new(ServerWorld::default())
}
