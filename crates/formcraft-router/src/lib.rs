//! # formcraft-router
//!
//! A small, framework-free router for the formcraft HTTP endpoints.
//!
//! Handlers are async functions from [`Request`] to [`Response`]; the
//! server binary bridges these types to hyper.
//!
//! ```
//! use formcraft_router::{LoggingMiddleware, Request, Response, Router};
//!
//! async fn health(_req: Request) -> Response {
//!     Response::text("ok")
//! }
//!
//! let router = Router::new()
//!     .middleware(LoggingMiddleware)
//!     .get("/health", health);
//! # let _ = router;
//! ```

mod error;
mod middleware;
mod path;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use middleware::{BodyLimitMiddleware, BoxFuture, LoggingMiddleware, Middleware, MiddlewareResult};
pub use path::PathPattern;
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{Handler, Route, Router};
