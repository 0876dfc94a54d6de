//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.

use bytes::Bytes;
use http_body_util::Full;
use tracing::error;

use crate::status::Status;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// An outgoing HTTP response.
///
/// ```rust
/// use bookshelf::{Response, Status};
///
/// Response::text("ok");
/// Response::status(Status::NotFound);
///
/// Response::builder()
///     .status(Status::Conflict)
///     .json(br#"{"Message":null,"Error":"taken"}"#.to_vec());
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response sent on the wire.
    ///
    /// A header the `http` crate rejects degrades the whole response to an
    /// empty `500`.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(http::StatusCode::from(self.status));
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(res) => res,
            Err(e) => {
                error!("invalid response: {e}");
                let mut res = http::Response::new(Full::new(Bytes::new()));
                *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                res
            }
        }
    }
}

/// Fluent builder for [`Response`]. Defaults to `Status::Ok`.
pub struct ResponseBuilder {
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish(JSON, body)
    }

    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(TEXT, body.into().into_bytes())
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let headers = vec![("content-type".to_owned(), content_type.to_owned())];
        Response { body, headers, status: self.status }
    }
}

/// Conversion into an HTTP [`Response`], so handlers can return domain
/// types directly.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_status_and_content_type() {
        let res = Response::builder()
            .status(Status::Conflict)
            .json(b"{}".to_vec());
        assert_eq!(res.header("Content-Type"), Some(JSON));
        assert_eq!(res.status_code(), Status::Conflict);
    }

    #[test]
    fn into_inner_carries_status_and_body() {
        let res = Response::text("ok").into_inner();
        assert_eq!(res.status(), http::StatusCode::OK);
        assert_eq!(res.headers()["content-type"], TEXT);
    }

    #[test]
    fn invalid_header_degrades_to_500() {
        let res = Response {
            body: Vec::new(),
            headers: vec![("bad header".to_owned(), "x".to_owned())],
            status: Status::Ok,
        }
        .into_inner();
        assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_json_body_keeps_content_type() {
        let res = Response::builder().json(Vec::new()).into_inner();
        assert_eq!(res.status(), http::StatusCode::OK);
        assert_eq!(res.headers()["content-type"], JSON);
    }
}
