//! IPC listener that accepts commands over a Unix socket.
//!
//! Hotkey daemons, scripts and the like connect to the socket and send
//! newline-delimited JSON commands.

pub mod listener;

pub use listener::{UnixSocketError, UnixSocketListener};
