//! Middleware run around every routed request.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info};

use crate::request::Request;
use crate::response::Response;

/// A boxed future for async middleware operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of middleware processing.
pub enum MiddlewareResult {
    /// Continue to the next middleware/handler.
    Continue(Request),
    /// Stop processing and return this response.
    Response(Response),
}

/// Processes requests before and responses after the handler.
///
/// `before` hooks run in registration order, `after` hooks in reverse. A
/// short-circuited response still passes through every `after` hook.
pub trait Middleware: Send + Sync {
    /// Called before the request handler.
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult>;

    /// Called after the request handler.
    fn after<'a>(&'a self, res: Response) -> BoxFuture<'a, Response>;
}

/// Logs each request and the status of its response.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult> {
        Box::pin(async move {
            info!(method = %req.method, path = %req.path, "request");
            MiddlewareResult::Continue(req.clone())
        })
    }

    fn after<'a>(&'a self, res: Response) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            info!(status = res.status, bytes = res.body.len(), "response");
            res
        })
    }
}

/// Rejects request bodies larger than a fixed number of bytes with 413.
pub struct BodyLimitMiddleware {
    max_bytes: usize,
}

impl BodyLimitMiddleware {
    /// Creates the middleware with the given limit.
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Middleware for BodyLimitMiddleware {
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult> {
        Box::pin(async move {
            if req.body.len() > self.max_bytes {
                debug!(
                    size = req.body.len(),
                    limit = self.max_bytes,
                    "request body over limit"
                );
                return MiddlewareResult::Response(Response::error(
                    413,
                    "body-too-large",
                    &format!("request body exceeds {} bytes", self.max_bytes),
                ));
            }
            MiddlewareResult::Continue(req.clone())
        })
    }

    fn after<'a>(&'a self, res: Response) -> BoxFuture<'a, Response> {
        Box::pin(async move { res })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_limit_passes_small_bodies() {
        let mw = BodyLimitMiddleware::new(8);
        let req = Request::post("/api/forms").body("1234");
        assert!(matches!(
            mw.before(&req).await,
            MiddlewareResult::Continue(_)
        ));
    }

    #[tokio::test]
    async fn test_body_limit_rejects_large_bodies() {
        let mw = BodyLimitMiddleware::new(8);
        let req = Request::post("/api/forms").body("123456789");
        match mw.before(&req).await {
            MiddlewareResult::Response(res) => {
                assert_eq!(res.status, 413);
                assert_eq!(res.body_json().unwrap()["error"], "body-too-large");
            }
            MiddlewareResult::Continue(_) => panic!("oversized body was accepted"),
        }
    }

    #[tokio::test]
    async fn test_logging_passes_through() {
        let req = Request::get("/health");
        assert!(matches!(
            LoggingMiddleware.before(&req).await,
            MiddlewareResult::Continue(_)
        ));
        let res = LoggingMiddleware.after(Response::new(204)).await;
        assert_eq!(res.status, 204);
    }
}
