//! Unit and behavioural tests for the daemon.

mod support;
