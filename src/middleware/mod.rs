//! Middleware applied by the server around every routed request.
//!
//! - [`trace`]: the access log: one line per request with method, path,
//!   peer, status and latency.
//! - [`deadline`]: bounds how long a handler may take to answer.

pub(crate) mod deadline;
pub(crate) mod trace;
