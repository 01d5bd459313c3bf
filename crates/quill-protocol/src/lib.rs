//! JSON-RPC message model and Content-Length framing for the quill daemon.
#![deny(missing_docs)]
//!
//! The crate owns the wire-level concerns of the editor transport: the three
//! JSON-RPC message shapes and their structured-content conversions, the
//! header/content-length frame codec, and an incremental reader that turns an
//! open byte stream into a sequence of decoded messages. Nothing here recovers
//! from malformed input; every violation surfaces as a [`ProtocolError`] for
//! the caller to handle.

pub mod codes;
mod errors;
pub mod framing;
mod message;
mod reader;

pub use errors::ProtocolError;
pub use message::{ErrorObject, Message, Notification, Request, Response};
pub use reader::{MessageReader, Messages};
