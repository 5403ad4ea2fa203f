//! Protocol-scoped path routing with reverse URL lookup.
//!
//! wayfarer maps request paths, partitioned by protocol (HTTP,
//! WebSocket, or anything else), to opaque endpoint handles:
//!
//! - **Radix-tree matching** — templates share compressed literal
//!   prefixes, so lookup cost follows branching, not route count
//! - **Typed parameters** — `{id:int}` both extracts and validates;
//!   the converter vocabulary is extensible
//! - **Mixed segments** — `avatar.{suffix}` fuses literal text and a
//!   capture inside one segment
//! - **Reverse routing** — `url_for` turns a route name and parameter
//!   values back into a concrete URL
//!
//! # Quick Start
//!
//! ```
//! use wayfarer::prelude::*;
//!
//! let router = Router::from_routes(
//!     Routes::new()
//!         .http_named("/hello/world", "hello", "hello-world")
//!         .http_named("/sayhi/{name}", "sayhi", "sayhi")
//!         .websocket_named("/feed", "feed", "feed"),
//! )?;
//!
//! let hit = router.search(&Protocol::HTTP, "/sayhi/aber")?;
//! assert_eq!(hit.endpoint, &"sayhi");
//! assert_eq!(hit.params.get_str("name"), Some("aber"));
//!
//! assert_eq!(router.url_for("sayhi", &params! { "name" => "aber" })?, "/sayhi/aber");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Registration is expected to finish before serving begins; after
//! that, `search` and `url_for` only read and can be shared freely.
//!
//! # Crate Structure
//!
//! - [`wayfarer_tree`] — the radix-tree matching engine
//! - this crate — protocol namespaces, route names, reverse lookup

#![forbid(unsafe_code)]

mod error;
mod protocol;
mod router;
mod routes;

// Re-export the matching engine
pub use wayfarer_tree as tree;

pub use error::{NoMatchFound, NoRouteFound, RouteConflict};
pub use protocol::Protocol;
pub use router::{Matched, Router};
pub use routes::Routes;

// Re-export commonly used engine types
pub use wayfarer_tree::{
    Converter, Converters, DEFAULT_TAG, InsertError, PathMatch, PathParams, PathTemplate, PathTree,
    RenderError,
};

/// Build a [`PathParams`] from `name => value` pairs.
///
/// Values go through [`serde_json::json!`], so anything that macro
/// accepts works here.
///
/// ```
/// use wayfarer::params;
///
/// let params = params! { "name" => "aber", "time" => 123 };
/// assert_eq!(params.get_str("name"), Some("aber"));
/// assert_eq!(params.get_i64("time"), Some(123));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::PathParams::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::PathParams::new();
        $( params.insert($name, $crate::__private::json!($value)); )+
        params
    }};
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Matched, NoMatchFound, NoRouteFound, PathParams, PathTree, Protocol, RouteConflict, Router,
        Routes, params,
    };
}
