//! Request logging and tracing setup.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // `axum::rejection=trace` surfaces rejections from built-in extractors
        EnvFilter::new(format!(
            "{}=debug,tower_http=debug,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs one line when a request arrives and one when it completes, tagged
/// with a generated request id so the two can be correlated. The completion
/// level follows the status class.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    info!(%request_id, %method, %path, "request received");

    let started = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        error!(%request_id, %method, %path, %status, elapsed_ms, "request failed");
    } else if status.is_client_error() {
        warn!(%request_id, %method, %path, %status, elapsed_ms, "request rejected");
    } else {
        info!(%request_id, %method, %path, %status, elapsed_ms, "request completed");
    }

    response
}
