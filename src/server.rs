//! HTTP surface: `/api/device` and `/api/exit`.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::any;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{inventory, APP_VERSION};

/// Wire format of `/api/device`.
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub interfaces: Vec<inventory::InterfaceInfo>,
    pub os: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// Wire format of `/api/exit`.
#[derive(Debug, Serialize)]
pub struct ExitResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Clone)]
struct AppState {
    shutdown: mpsc::Sender<()>,
}

/// Builds the router. Handlers answer any HTTP method: the browser front
/// end probes these endpoints from an untrusted origin, so both carry a
/// permissive CORS header — safe only because the socket binds loopback.
pub fn router(shutdown: mpsc::Sender<()>) -> Router {
    Router::new()
        .route("/api/device", any(device))
        .route("/api/exit", any(exit))
        .with_state(AppState { shutdown })
}

fn cors() -> [(header::HeaderName, &'static str); 1] {
    [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")]
}

/// Fresh inventory on every call; enumeration problems degrade to an empty
/// list rather than an error status.
async fn device() -> impl IntoResponse {
    let body = InventoryResponse {
        interfaces: inventory::collect(),
        os: std::env::consts::OS,
        version: APP_VERSION,
        status: "success",
    };
    (cors(), Json(body))
}

/// Acknowledges first, then signals the deferred-exit task so the response
/// is handed to the transport before the process terminates.
async fn exit(State(state): State<AppState>) -> impl IntoResponse {
    info!("exit requested, scheduling shutdown");
    if let Err(err) = state.shutdown.try_send(()) {
        // A shutdown is already in flight; the first signal wins.
        debug!("shutdown already signaled: {err}");
    }
    let body = ExitResponse {
        status: "success",
        message: "service shutting down...",
    };
    (cors(), Json(body))
}
