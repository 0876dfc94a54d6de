//! Handler deadline.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::envelope::Envelope;
use crate::response::Response;
use crate::status::Status;

/// Runs `handler`, answering `503` with an error envelope if it has not
/// produced a response within `limit`. The handler future is dropped on
/// expiry.
pub(crate) async fn deadline<F>(limit: Duration, handler: F) -> Response
where
    F: Future<Output = Response>,
{
    match tokio::time::timeout(limit, handler).await {
        Ok(res) => res,
        Err(_) => {
            warn!(limit_ms = limit.as_millis() as u64, "handler deadline exceeded");
            Envelope::error(format!("request not answered within {limit:?}"))
                .respond(Status::ServiceUnavailable)
        }
    }
}
