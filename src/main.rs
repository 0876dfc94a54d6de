//! The `bookshelf` service on port 3000.
//!
//!   RUST_LOG=debug cargo run
//!
//!   curl -X POST localhost:3000/book/ -d '{"id":"1","name":"Dune","author":"Herbert"}'
//!   curl localhost:3000/book/1
//!   curl localhost:3000/books/

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use bookshelf::{BookStore, Server, ServerConfig, api};

#[tokio::main]
async fn main() -> Result<(), bookshelf::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bookshelf=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = BookStore::new().shared();

    Server::bind(ServerConfig::default())
        .await?
        .serve(api::routes(store))
        .await
}
