//! # bookshelf
//!
//! An in-memory book catalogue served over HTTP.
//!
//! Books (`id`, `name`, `author`) live in an ordered, id-unique
//! [`BookStore`] guarded by a read-write lock. Every book route answers with
//! the same JSON [`Envelope`]:
//!
//! ```json
//! {"Message": {"id":"1","name":"Dune","author":"Herbert"}, "Error": ""}
//! ```
//!
//! The HTTP layer is a small hyper-based framework: a radix-tree
//! [`Router`] (one `matchit` tree per method), type-erased async handlers,
//! an access log per request and graceful shutdown on SIGTERM / Ctrl-C.
//! Nothing is persisted; restarting empties the catalogue.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bookshelf::{BookStore, Server, ServerConfig, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bookshelf::Error> {
//!     let store = BookStore::new().shared();
//!     Server::bind(ServerConfig::default())
//!         .await?
//!         .serve(api::routes(store))
//!         .await
//! }
//! ```

mod book;
mod config;
mod envelope;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod api;
pub mod health;
pub(crate) mod middleware;

pub use book::{Book, DecodeError, decode};
pub use config::ServerConfig;
pub use envelope::{Envelope, Payload};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{BookStore, SharedStore, StoreError};
