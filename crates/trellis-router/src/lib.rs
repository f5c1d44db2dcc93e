//! # trellis-router
//!
//! A radix-tree HTTP path router.
//!
//! This crate provides:
//! - Prefix-compressed route storage with in-place node splitting
//! - Named single-segment parameters and rest-of-path wildcards
//! - A literal fast path that skips tree traversal for routes without
//!   captures
//! - One independent tree per HTTP method
//! - Bulk handler transformation for binding middleware after registration
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_router::{Method, Router};
//!
//! let router = Router::new()
//!     .get("/", "index")?
//!     .get("/user/:id", "user_detail")?
//!     .get("/static/*file", "assets")?;
//!
//! let matched = router.find(Method::Get, "/user/42").unwrap();
//! assert_eq!(*matched.handler, "user_detail");
//! assert_eq!(matched.params.get("id"), Some("42"));
//!
//! let assets = router.find(Method::Get, "/static/css/app.css").unwrap();
//! assert_eq!(assets.params.get("file"), Some("css/app.css"));
//! # Ok::<(), trellis_router::RouterError>(())
//! ```
//!
//! ## Pattern Syntax
//!
//! - `/users` matches the literal path; `/users/` resolves to the same handler
//! - `/users/:id` binds `:id` to exactly one `/`-delimited segment
//! - `/files/*path` binds `*path` to the remaining path, interior
//!   slashes included, and must be the final token
//!
//! When several patterns could match, a literal match wins over a
//! parameter, and a parameter wins over a wildcard. Captures are returned
//! in the order their tokens appear in the path, as exact substrings with
//! no URL-decoding.
//!
//! ## Handlers and Middleware
//!
//! Handlers are an opaque value of your choosing: an enum, an `Arc`'d
//! function, an index into a handler table. After every route is
//! registered, [`Router::bind`] rewrites each stored handler once, which is
//! the hook for wrapping them in middleware:
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_router::{Method, Router};
//!
//! type Handler = Arc<dyn Fn(&str) -> String + Send + Sync>;
//!
//! let handler: Handler = Arc::new(|id| format!("user {id}"));
//! let mut router = Router::new().get("/user/:id", handler)?;
//!
//! router.bind(|inner: Handler| {
//!     Arc::new(move |id: &str| format!("[logged] {}", inner(id)))
//! });
//! # Ok::<(), trellis_router::RouterError>(())
//! ```
//!
//! ## Concurrency
//!
//! Registration is synchronous and single-threaded; once serving begins
//! the router must be treated as frozen. Lookups take `&self` and mutate
//! nothing, so a frozen router (for example behind an `Arc`) supports
//! unlimited concurrent lookups without locks.

mod error;
mod method;
mod node;
mod params;
mod router;
mod tree;

pub use error::{Result, RouterError};
pub use method::Method;
pub use params::{Params, RouteMatch};
pub use router::Router;
pub use tree::RadixTree;
