//! Message dispatch.
//!
//! A [`Dispatcher`] turns one inbound message into the replies it earns. The
//! bundled [`NotImplementedDispatcher`] answers every request with an
//! internal error naming the method, which keeps the wire contract intact
//! while note handling is still being built out.

use quill_protocol::codes;
use quill_protocol::{ErrorObject, Message, Request, Response};
use tracing::debug;

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes one inbound message and collects the replies to send back.
pub trait Dispatcher {
    /// Handles `message`, returning replies in the order they should be
    /// written. Notifications and responses must produce no replies.
    fn dispatch(&mut self, message: Message) -> Vec<Message>;
}

/// Fallback dispatcher that rejects every request as unimplemented.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotImplementedDispatcher;

impl Dispatcher for NotImplementedDispatcher {
    fn dispatch(&mut self, message: Message) -> Vec<Message> {
        match message {
            Message::Request(request) => vec![not_implemented(request)],
            Message::Notification(notification) => {
                debug!(
                    target: DISPATCH_TARGET,
                    method = %notification.method,
                    "notification consumed without a handler"
                );
                Vec::new()
            }
            Message::Response(response) => {
                debug!(
                    target: DISPATCH_TARGET,
                    id = response.id,
                    "response consumed without a pending request"
                );
                Vec::new()
            }
        }
    }
}

/// Builds the error reply for a request no handler claims. The request
/// params ride along as the error data so callers can see what was dropped.
fn not_implemented(request: Request) -> Message {
    let error = ErrorObject::new(
        codes::INTERNAL_ERROR,
        format!("{} not implemented", request.method),
        request.params,
    );
    Message::from(Response::failure(request.id, error))
}
