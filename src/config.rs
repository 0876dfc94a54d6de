//! Server configuration.
//!
//! The defaults are the service's fixed deployment values: port 3000 on all
//! interfaces, ten-second timeouts and a 1 MiB header budget.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_HEADER_BYTES: usize = 1 << 20;

/// hyper refuses read buffers smaller than this.
const MIN_HEADER_BYTES: usize = 8192;

/// Settings consumed by [`Server::bind`](crate::Server::bind).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Deadline for receiving a full request head, including the idle wait
    /// between requests on a keep-alive connection.
    pub read_timeout: Duration,
    /// Deadline for a handler to produce its response.
    pub write_timeout: Duration,
    /// Upper bound on the HTTP/1 read buffer, which caps the request head.
    pub max_header_bytes: usize,
}

impl ServerConfig {
    /// Parses `addr` as `host:port`.
    ///
    /// ```rust
    /// let cfg = bookshelf::ServerConfig::with_addr("127.0.0.1:0").unwrap();
    /// assert_eq!(cfg.addr.port(), 0);
    /// ```
    pub fn with_addr(addr: &str) -> Result<Self, Error> {
        let addr = addr.parse().map_err(|source| Error::Addr {
            addr: addr.to_owned(),
            source,
        })?;
        Ok(Self { addr, ..Self::default() })
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Values below hyper's 8 KiB floor are raised to it.
    pub fn max_header_bytes(mut self, bytes: usize) -> Self {
        self.max_header_bytes = bytes.max(MIN_HEADER_BYTES);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}
