//! Book catalogue routes.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | any | `/hello/{*name}` | [`hello`] |
//! | GET | `/book/{*id}` | [`get_book`] |
//! | POST | `/book/` | [`create_book`] |
//! | PUT | `/book/` | [`update_book`] |
//! | DELETE | `/book/` | [`delete_book`] |
//! | other | `/book/` | [`book_fallback`] |
//! | any | `/books/` | [`list_books`] |
//! | GET | `/healthz`, `/readyz` | [`health`](crate::health) |
//!
//! A missing id is `404` on GET and `400` on PUT and DELETE.

use std::future::Future;
use std::sync::Arc;

use crate::book::{self, DecodeError};
use crate::envelope::Envelope;
use crate::health;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{SharedStore, StoreError};

/// Builds the full route table around `store`.
///
/// Each route is registered both on its bare prefix (`/book/`) and with a
/// catch-all suffix (`/book/{*id}`), so anything under the prefix reaches
/// the same handler.
pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .any("/hello/", hello)
        .any("/hello/{*name}", hello)
        .get("/book/", with_store(store.clone(), get_book))
        .get("/book/{*id}", with_store(store.clone(), get_book))
        .post("/book/", with_store(store.clone(), create_book))
        .post("/book/{*rest}", with_store(store.clone(), create_book))
        .put("/book/", with_store(store.clone(), update_book))
        .put("/book/{*rest}", with_store(store.clone(), update_book))
        .delete("/book/", with_store(store.clone(), delete_book))
        .delete("/book/{*rest}", with_store(store.clone(), delete_book))
        .any("/book/", book_fallback)
        .any("/book/{*rest}", book_fallback)
        .any("/books/", with_store(store.clone(), list_books))
        .any("/books/{*rest}", with_store(store, list_books))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

/// Adapts a `(store, request)` handler into a plain route handler.
fn with_store<F, Fut, R>(store: SharedStore, f: F) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(SharedStore, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| f(Arc::clone(&store), req)
}

/// `/hello/{*name}` on any method: greets the percent-decoded suffix.
pub async fn hello(req: Request) -> Envelope {
    let name = req.param("name").unwrap_or("");
    Envelope::message(format!("Hello {name}! Glad to see you again."))
}

/// `GET /book/{*id}`
pub async fn get_book(store: SharedStore, req: Request) -> Response {
    let id = req.param("id").unwrap_or("");
    match store.read().await.find_by_id(id) {
        Some(book) => Envelope::message(book.clone()).respond(Status::Ok),
        None => failure(StoreError::NotFound(id.to_owned()), Status::NotFound),
    }
}

/// `POST /book/`: 409 when the id is taken. The confirmation reads
/// "updated", same as PUT.
pub async fn create_book(store: SharedStore, req: Request) -> Response {
    let book = match book::decode(req.body()) {
        Ok(book) => book,
        Err(e) => return bad_body(e),
    };
    let id = book.id.clone();
    match store.write().await.add(book) {
        Ok(()) => confirm(&id, "updated"),
        Err(e) => failure(e, Status::Conflict),
    }
}

/// `PUT /book/`
pub async fn update_book(store: SharedStore, req: Request) -> Response {
    let book = match book::decode(req.body()) {
        Ok(book) => book,
        Err(e) => return bad_body(e),
    };
    let id = book.id.clone();
    match store.write().await.update(book) {
        Ok(()) => confirm(&id, "updated"),
        Err(e) => failure(e, Status::BadRequest),
    }
}

/// `DELETE /book/`: only `id` in the body is looked at.
pub async fn delete_book(store: SharedStore, req: Request) -> Response {
    let book = match book::decode(req.body()) {
        Ok(book) => book,
        Err(e) => return bad_body(e),
    };
    match store.write().await.delete(&book.id) {
        Ok(()) => confirm(&book.id, "deleted"),
        Err(e) => failure(e, Status::BadRequest),
    }
}

/// Any other method on `/book/`: `200`, JSON content type, no body.
pub async fn book_fallback(_req: Request) -> Response {
    Response::builder().json(Vec::new())
}

/// `/books/` answers every method with the whole catalogue.
pub async fn list_books(store: SharedStore, _req: Request) -> Envelope {
    Envelope::message(store.read().await.list_all().to_vec())
}

fn bad_body(e: DecodeError) -> Response {
    Envelope::error(e.to_string()).respond(Status::BadRequest)
}

fn failure(e: StoreError, status: Status) -> Response {
    Envelope::error(e.to_string()).respond(status)
}

fn confirm(id: &str, action: &str) -> Response {
    Envelope::message(format!("Book with id:{id} {action} is SUCCESS!")).respond(Status::Ok)
}
