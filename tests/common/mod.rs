//! Shared harness: a real server on an ephemeral port.

#![allow(dead_code)]

use bookshelf::{Book, BookStore, Router, Server, ServerConfig, SharedStore, api};
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestApp {
    pub base: String,
    pub store: SharedStore,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), bookshelf::Error>>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Vec::new()).await
    }

    pub async fn spawn_with(books: Vec<Book>) -> Self {
        let store = BookStore::from(books).shared();
        let router = api::routes(store.clone());
        Self::start(local_config(), router, store).await
    }

    /// Serves a hand-built `router` under `config`; the address in `config`
    /// is replaced by an ephemeral local one.
    pub async fn spawn_router(config: ServerConfig, router: Router) -> Self {
        let config = ServerConfig { addr: local_config().addr, ..config };
        Self::start(config, router, BookStore::new().shared()).await
    }

    async fn start(config: ServerConfig, router: Router, store: SharedStore) -> Self {
        let server = Server::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_with_shutdown(router, async move {
            let _ = rx.await;
        }));

        Self {
            base: format!("http://{addr}"),
            store,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Sends `method path` with an optional raw body; returns status and
    /// the body parsed as JSON (`Null` when it is not JSON).
    pub async fn send(&self, method: reqwest::Method, path: &str, body: Option<&str>) -> (u16, Value) {
        let mut req = self.client.request(method, self.url(path));
        if let Some(body) = body {
            req = req.header("content-type", "application/json").body(body.to_owned());
        }
        let res = req.send().await.unwrap();
        let status = res.status().as_u16();
        let bytes = res.bytes().await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn local_config() -> ServerConfig {
    ServerConfig::with_addr("127.0.0.1:0").unwrap()
}
