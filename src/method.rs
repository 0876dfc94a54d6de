//! HTTP method as a typed enum.
//!
//! The RFC 9110 methods get their own variants. Any other token the HTTP
//! layer accepted (`PURGE`, `PROPFIND`, ...) is carried as
//! [`Method::Extension`] and still reaches the router, where only routes
//! registered with [`Router::any`](crate::Router::any) can match it.

use std::fmt;

/// An HTTP method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    Extension(Box<str>),
}

impl Method {
    const STANDARD: [Method; 9] = [
        Self::Connect,
        Self::Delete,
        Self::Get,
        Self::Head,
        Self::Options,
        Self::Patch,
        Self::Post,
        Self::Put,
        Self::Trace,
    ];

    /// Maps a method token. Case-sensitive per RFC 9110 §9.1, so `"get"` is
    /// an extension method, not `GET`.
    pub fn from_token(token: &str) -> Self {
        Self::STANDARD
            .into_iter()
            .find(|m| m.as_str() == token)
            .unwrap_or_else(|| Self::Extension(token.into()))
    }

    /// Returns the wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect      => "CONNECT",
            Self::Delete       => "DELETE",
            Self::Get          => "GET",
            Self::Head         => "HEAD",
            Self::Options      => "OPTIONS",
            Self::Patch        => "PATCH",
            Self::Post         => "POST",
            Self::Put          => "PUT",
            Self::Trace        => "TRACE",
            Self::Extension(t) => t,
        }
    }
}

impl From<&http::Method> for Method {
    fn from(m: &http::Method) -> Self {
        Self::from_token(m.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
