//! HTTP status codes the service answers with.
//!
//! ```rust
//! use bookshelf::{Response, Status};
//!
//! Response::status(Status::NotFound);
//!
//! Response::builder()
//!     .status(Status::Conflict)
//!     .json(br#"{"Message":null,"Error":"taken"}"#.to_vec());
//! ```

/// A status code produced by a handler or by the server itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    BadRequest,          // 400
    NotFound,            // 404
    Conflict,            // 409
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok                  => 200,
            Self::BadRequest          => 400,
            Self::NotFound            => 404,
            Self::Conflict            => 409,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                  => http::StatusCode::OK,
            Status::BadRequest          => http::StatusCode::BAD_REQUEST,
            Status::NotFound            => http::StatusCode::NOT_FOUND,
            Status::Conflict            => http::StatusCode::CONFLICT,
            Status::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable  => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
