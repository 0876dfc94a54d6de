//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server stops accepting, lets every in-flight
//! connection finish, then returns from [`Server::serve`].
//!
//! Per connection, hyper enforces [`ServerConfig::read_timeout`] on reading
//! a request head (and on idle keep-alive waits) and caps the HTTP/1 read
//! buffer at [`ServerConfig::max_header_bytes`]. Per request, the handler
//! must answer within [`ServerConfig::write_timeout`].

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::book::DecodeError;
use crate::config::ServerConfig;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::middleware::deadline::deadline;
use crate::middleware::trace::AccessLog;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// The HTTP server, bound and ready to serve.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Binds the listening socket described by `config`.
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), bookshelf::Error> {
    /// use bookshelf::{Router, Server, ServerConfig};
    ///
    /// let server = Server::bind(ServerConfig::with_addr("127.0.0.1:3000")?).await?;
    /// server.serve(Router::new()).await
    /// # }
    /// ```
    pub async fn bind(config: ServerConfig) -> Result<Self, Error> {
        let listener = TcpListener::bind(config.addr).await?;
        Ok(Self { listener, config })
    }

    /// The bound address; useful when binding port `0`.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains connections.
    ///
    /// Draining tells every open connection to finish its current request
    /// and close: HTTP/1 keep-alive is turned off, HTTP/2 peers get GOAWAY.
    /// Connections still open after [`ServerConfig::write_timeout`] are
    /// aborted.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        let router = Arc::new(router);
        let conn = connection_builder(&self.config);
        let write_timeout = self.config.write_timeout;
        let graceful = GracefulShutdown::new();

        info!(%addr, "bookshelf listening");

        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown wins over queued accepts.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req, peer, write_timeout).await }
                    });
                    let connection = graceful.watch(
                        conn.serve_connection(TokioIo::new(stream), svc).into_owned(),
                    );

                    tasks.spawn(async move {
                        if let Err(e) = connection.await {
                            error!(%peer, "connection error: {e}");
                        }
                    });
                }

                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(self.listener);
        if tokio::time::timeout(write_timeout, graceful.shutdown()).await.is_err() {
            warn!(remaining = tasks.len(), "drain timed out, aborting connections");
            tasks.abort_all();
        }
        while tasks.join_next().await.is_some() {}

        info!("bookshelf stopped");
        Ok(())
    }
}

fn connection_builder(config: &ServerConfig) -> ConnBuilder<TokioExecutor> {
    let mut builder = ConnBuilder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(config.read_timeout)
        .max_buf_size(config.max_header_bytes);
    builder
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and writes its access-log line. Every failure becomes
/// a response, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<Incoming>,
    peer: SocketAddr,
    write_timeout: Duration,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let log = AccessLog::start(req.method(), req.uri().path(), peer);
    let response = deadline(write_timeout, route(&router, req)).await.into_inner();
    log.finish(response.status());
    Ok(response)
}

async fn route(router: &Router, req: hyper::Request<Incoming>) -> Response {
    match Request::from_hyper(req).await {
        Ok(req) => router.handle(req).await,
        Err(e) => Envelope::error(DecodeError::Body(e).to_string()).respond(Status::BadRequest),
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on SIGTERM or SIGINT (Ctrl-C). On non-Unix platforms only
/// Ctrl-C is watched. A handler that cannot be installed is logged and
/// never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
