//! device-agent: the machine's network interface inventory over a local HTTP API.
//!
//! Binds `127.0.0.1` only and exposes two endpoints: `/api/device` returns
//! the interface inventory (name, IP, MAC) plus OS/version metadata, and
//! `/api/exit` shuts the agent down. Consumed by a browser front end running
//! on the same machine.

use std::time::Duration;

pub mod adapters;
pub mod config;
pub mod inventory;
pub mod server;

/// Reported in every `/api/device` response.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listen port when `config.json` is absent or unusable.
pub const DEFAULT_PORT: u16 = 18888;

/// Fixed relative path of the optional config file.
pub const CONFIG_PATH: &str = "config.json";

/// How long the deferred-exit task waits after the `/api/exit`
/// acknowledgment before terminating the process, so the response bytes
/// reach the transport first.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(150);
