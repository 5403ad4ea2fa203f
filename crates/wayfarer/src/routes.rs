//! Declarative route registration.
//!
//! [`Routes`] collects route definitions before a [`Router`] exists,
//! so route tables can be assembled module by module and merged with
//! shared path prefixes.
//!
//! [`Router`]: crate::router::Router

use crate::protocol::Protocol;

/// A buildable collection of route definitions.
///
/// ```
/// use wayfarer::{Protocol, Router, Routes};
///
/// let api = Routes::with_prefix("/api")
///     .http_named("/users/{id:int}", "get-user", "user")
///     .http("/health", "health");
///
/// let router = Router::from_routes(
///     Routes::new().http("/", "index").include(api),
/// )?;
///
/// assert!(router.search(&Protocol::HTTP, "/api/users/7").is_ok());
/// assert!(router.search(&Protocol::HTTP, "/users/7").is_err());
/// # Ok::<(), wayfarer::RouteConflict>(())
/// ```
#[derive(Debug)]
pub struct Routes<T> {
    prefix: String,
    defs: Vec<RouteDef<T>>,
}

impl<T> Default for Routes<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub(crate) struct RouteDef<T> {
    pub(crate) protocol: Protocol,
    pub(crate) template: String,
    pub(crate) endpoint: T,
    pub(crate) name: Option<String>,
}

impl<T> Routes<T> {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            defs: Vec::new(),
        }
    }

    /// An empty collection whose routes all live under `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new().prefix(prefix)
    }

    /// Set the path prefix prepended to every route at build time.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let p = prefix.into();
        if p.is_empty() || p.starts_with('/') {
            self.prefix = p;
        } else {
            self.prefix = format!("/{p}");
        }
        while self.prefix.ends_with('/') && self.prefix.len() > 1 {
            self.prefix.pop();
        }
        self
    }

    /// Add an unnamed route under any protocol.
    #[must_use]
    pub fn route(mut self, protocol: Protocol, template: impl Into<String>, endpoint: T) -> Self {
        self.defs.push(RouteDef {
            protocol,
            template: template.into(),
            endpoint,
            name: None,
        });
        self
    }

    /// Add a named route under any protocol.
    #[must_use]
    pub fn route_named(
        mut self,
        protocol: Protocol,
        template: impl Into<String>,
        endpoint: T,
        name: impl Into<String>,
    ) -> Self {
        self.defs.push(RouteDef {
            protocol,
            template: template.into(),
            endpoint,
            name: Some(name.into()),
        });
        self
    }

    /// Add an unnamed HTTP route.
    #[must_use]
    pub fn http(self, template: impl Into<String>, endpoint: T) -> Self {
        self.route(Protocol::HTTP, template, endpoint)
    }

    /// Add a named HTTP route.
    #[must_use]
    pub fn http_named(
        self,
        template: impl Into<String>,
        endpoint: T,
        name: impl Into<String>,
    ) -> Self {
        self.route_named(Protocol::HTTP, template, endpoint, name)
    }

    /// Add an unnamed WebSocket route.
    #[must_use]
    pub fn websocket(self, template: impl Into<String>, endpoint: T) -> Self {
        self.route(Protocol::WEBSOCKET, template, endpoint)
    }

    /// Add a named WebSocket route.
    #[must_use]
    pub fn websocket_named(
        self,
        template: impl Into<String>,
        endpoint: T,
        name: impl Into<String>,
    ) -> Self {
        self.route_named(Protocol::WEBSOCKET, template, endpoint, name)
    }

    /// Merge another collection, folding its prefix into its routes.
    ///
    /// The merged routes still receive this collection's own prefix at
    /// build time, so nesting composes: a `/v1` collection included
    /// into a `/api` collection yields `/api/v1/...` templates.
    #[must_use]
    pub fn include(mut self, other: Routes<T>) -> Self {
        for mut def in other.defs {
            def.template = combine_paths(&other.prefix, &def.template);
            self.defs.push(def);
        }
        self
    }

    /// Number of route definitions collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether no routes have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub(crate) fn into_defs(self) -> Vec<RouteDef<T>> {
        let prefix = self.prefix;
        self.defs
            .into_iter()
            .map(|mut def| {
                def.template = combine_paths(&prefix, &def.template);
                def
            })
            .collect()
    }
}

/// Combines a prefix and a path, handling slashes correctly.
fn combine_paths(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => {
            if path.starts_with('/') {
                path.to_owned()
            } else {
                format!("/{path}")
            }
        }
        (false, true) => prefix.to_owned(),
        (false, false) => {
            let prefix = prefix.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            if path.is_empty() {
                prefix.to_owned()
            } else {
                format!("{prefix}/{path}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_paths_handles_slashes() {
        assert_eq!(combine_paths("", ""), "/");
        assert_eq!(combine_paths("", "/users"), "/users");
        assert_eq!(combine_paths("", "users"), "/users");
        assert_eq!(combine_paths("/api", ""), "/api");
        assert_eq!(combine_paths("/api", "/users"), "/api/users");
        assert_eq!(combine_paths("/api", "users"), "/api/users");
        assert_eq!(combine_paths("/api/", "/users"), "/api/users");
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(Routes::<()>::new().prefix("api").prefix, "/api");
        assert_eq!(Routes::<()>::new().prefix("/api/").prefix, "/api");
        assert_eq!(Routes::<()>::new().prefix("/api/v1").prefix, "/api/v1");
        assert_eq!(Routes::<()>::new().prefix("").prefix, "");
    }

    #[test]
    fn prefix_applies_at_build_time() {
        let routes = Routes::with_prefix("/api").http("/users", ()).http("", ());
        let defs = routes.into_defs();
        assert_eq!(defs[0].template, "/api/users");
        assert_eq!(defs[1].template, "/api");
    }

    #[test]
    fn include_nests_prefixes() {
        let v1 = Routes::with_prefix("/v1").http_named("/users/{id}", (), "user");
        let api = Routes::with_prefix("/api").include(v1);
        let defs = api.into_defs();
        assert_eq!(defs[0].template, "/api/v1/users/{id}");
        assert_eq!(defs[0].name.as_deref(), Some("user"));
    }

    #[test]
    fn include_keeps_protocols_apart() {
        let mixed = Routes::new()
            .http("/page", ())
            .websocket("/feed", ());
        let defs = Routes::new().include(mixed).into_defs();
        assert_eq!(defs[0].protocol, Protocol::HTTP);
        assert_eq!(defs[1].protocol, Protocol::WEBSOCKET);
    }
}
