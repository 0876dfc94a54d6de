//! Health-check handlers for the orchestrator.
//!
//! | Check | Path | Answer |
//! |---|---|---|
//! | Liveness | `/healthz` | `200 ok` while the process serves HTTP |
//! | Readiness | `/readyz` | `200 ready`; the store is in memory, so there is nothing to wait on |
//!
//! Both are plain text, outside the JSON envelope used by the book routes.

use crate::{Request, Response};

pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
