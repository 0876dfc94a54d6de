//! Radix-tree request router.
//!
//! One `matchit` tree per HTTP method, plus one method-agnostic tree filled
//! by [`Router::any`]. A method's own tree is consulted first; the agnostic
//! tree catches everything else, extension methods included. A path matched
//! by neither answers `404` with an empty body.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router. Build it once at startup and hand it to
/// [`Server::serve`](crate::Server::serve).
///
/// Paths use `matchit` syntax: `{id}` for one segment, `{*rest}` for the
/// remainder of the path. A catch-all never matches the empty string, so
/// `/book/{*id}` needs a sibling `/book/` route to see `/book/`. Parameters
/// reach handlers percent-decoded.
///
/// ```rust
/// # use bookshelf::{Request, Response, Router};
/// # async fn get_book(_: Request) -> Response { Response::text("") }
/// # async fn list(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .get("/book/{*id}", get_book)
///     .any("/books/", list);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    any: MatchitRouter<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Registers `handler` for `method` + `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an earlier route for
    /// the same method. Routes are static, so this is a startup bug.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let tree = self.routes.entry(method.clone()).or_default();
        insert(tree, &method, path, handler.into_boxed_handler());
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Registers `handler` for every method not claimed by a method-specific
    /// route on the same path, extension methods included.
    ///
    /// # Panics
    ///
    /// As [`Router::on`], against other `any` routes.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        insert(&mut self.any, &"*", path, handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let matched = self.routes
            .get(method)
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok())?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes `req` and runs the matching handler in-process.
    pub async fn handle(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => Response::status(Status::NotFound),
        }
    }
}

fn insert(tree: &mut MatchitRouter<BoxedHandler>, method: &dyn std::fmt::Display, path: &str, handler: BoxedHandler) {
    tree.insert(path, handler)
        .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo(req: Request) -> Response {
        Response::text(req.param("rest").unwrap_or("<none>").to_owned())
    }

    async fn method_name(req: Request) -> Response {
        Response::text(req.method().to_string())
    }

    fn router() -> Router {
        Router::new()
            .get("/echo/", echo)
            .get("/echo/{*rest}", echo)
            .any("/all/", method_name)
            .get("/shared/", echo)
            .any("/shared/", method_name)
    }

    async fn body(router: &Router, method: Method, path: &str) -> Vec<u8> {
        router.handle(Request::new(method, path, "")).await.body().to_vec()
    }

    #[tokio::test]
    async fn catch_all_keeps_slashes() {
        assert_eq!(body(&router(), Method::Get, "/echo/a/b").await, b"a/b");
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let router = router();
        assert_eq!(body(&router, Method::Get, "/echo/Dune%20II").await, b"Dune II");
        assert_eq!(body(&router, Method::Get, "/echo/J%C3%B6rg").await, "Jörg".as_bytes());
        assert_eq!(body(&router, Method::Get, "/echo/100%").await, b"100%");
    }

    #[tokio::test]
    async fn bare_prefix_has_no_param() {
        assert_eq!(body(&router(), Method::Get, "/echo/").await, b"<none>");
    }

    #[tokio::test]
    async fn any_answers_extension_methods() {
        let router = router();
        for m in [Method::Get, Method::Head, Method::Post, Method::from_token("PURGE")] {
            let expected = m.to_string();
            assert_eq!(body(&router, m, "/all/").await, expected.as_bytes());
        }
    }

    #[tokio::test]
    async fn method_route_wins_over_any() {
        let router = router();
        assert_eq!(body(&router, Method::Get, "/shared/").await, b"<none>");
        assert_eq!(body(&router, Method::Put, "/shared/").await, b"PUT");
    }

    #[tokio::test]
    async fn unmatched_is_empty_404() {
        let res = router().handle(Request::new(Method::Post, "/echo/x", "")).await;
        assert_eq!(res.status_code(), Status::NotFound);
        assert!(res.body().is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_route_panics() {
        let _ = Router::new().get("/x", echo).get("/x", echo);
    }
}
