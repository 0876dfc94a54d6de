//! Per-request access log.

use std::net::SocketAddr;
use std::time::Instant;

use tracing::info;

/// Captured when the request head arrives, emitted once the response is
/// ready.
pub(crate) struct AccessLog {
    method: String,
    path: String,
    peer: SocketAddr,
    started: Instant,
}

impl AccessLog {
    pub(crate) fn start(method: &http::Method, path: &str, peer: SocketAddr) -> Self {
        Self {
            method: method.as_str().to_owned(),
            path: path.to_owned(),
            peer,
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self, status: http::StatusCode) {
        info!(
            method = %self.method,
            path = %self.path,
            peer = %self.peer,
            status = status.as_u16(),
            latency_us = self.started.elapsed().as_micros() as u64,
            "request"
        );
    }
}
