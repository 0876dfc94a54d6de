//! Infrastructure error type.

/// The error type returned by the server's fallible operations.
///
/// Application-level failures (unknown book, duplicate id, bad body) never
/// become an `Error`: handlers turn them into an [`Envelope`](crate::Envelope)
/// with a status code. This type covers binding, accepting and signal setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
