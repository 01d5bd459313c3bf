//! Daemon bootstrap: serve the stream, restarting the loop after errors.

use std::io::{Read, Write};

use tracing::{error, info};

use crate::dispatch::NotImplementedDispatcher;
use crate::server::Server;

pub(crate) const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

/// Serves `reader` until it ends cleanly, restarting the loop on error.
///
/// Each restart builds a fresh server over the same streams and picks up
/// wherever the failed read stopped, so one poisoned frame cannot take the
/// daemon down. Returns once the input reaches a clean end.
pub fn run_forever<R: Read, W: Write>(mut reader: R, mut writer: W) {
    loop {
        info!(target: BOOTSTRAP_TARGET, "starting server");
        let mut server = Server::new(&mut reader, &mut writer, NotImplementedDispatcher);
        match server.run() {
            Ok(()) => {
                info!(target: BOOTSTRAP_TARGET, "input closed, shutting down");
                break;
            }
            Err(error) => {
                error!(target: BOOTSTRAP_TARGET, error = %error, "server error, restarting");
            }
        }
    }
}
