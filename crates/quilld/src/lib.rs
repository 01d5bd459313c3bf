//! Note server daemon speaking JSON-RPC 2.0 over framed stdio.
//!
//! The daemon reads Content-Length framed messages from standard input,
//! hands each one to a dispatcher, and writes the reply frames to standard
//! output. Telemetry goes to stderr and, optionally, to a debug log file so
//! the transport streams stay clean. No note-handling methods exist yet;
//! every request is answered with an internal error naming the method, which
//! lets clients exercise the transport end to end while handlers land.

mod bootstrap;
mod config;
mod dispatch;
mod server;
pub mod telemetry;

pub use bootstrap::run_forever;
pub use config::{Cli, Config, LogFormat};
pub use dispatch::{Dispatcher, NotImplementedDispatcher};
pub use server::{ServeError, Server};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
