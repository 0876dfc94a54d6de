//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::BodyExt;

use crate::method::Method;

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    method: Method,
    path: String,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self { method, path: path.into(), body: body.into(), params: HashMap::new() }
    }

    /// Buffers the hyper body. The path is kept raw; route parameters are
    /// decoded when the router attaches them.
    pub(crate) async fn from_hyper(req: hyper::Request<hyper::body::Incoming>) -> Result<Self, hyper::Error> {
        let (parts, body) = req.into_parts();
        let body = body.collect().await?.to_bytes();
        Ok(Self::new(Method::from(&parts.method), parts.uri.path(), body))
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/book/{*id}`, `req.param("id")` on `/book/Dune%20II`
    /// returns `Some("Dune II")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
