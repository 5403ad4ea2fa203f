//! Protocol-scoped routing with reverse lookup.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use wayfarer_tree::{Converter, Converters, PathParams, PathTemplate, PathTree, RenderError};

use crate::error::{NoMatchFound, NoRouteFound, RouteConflict};
use crate::protocol::Protocol;
use crate::routes::Routes;

/// A router holding one path tree per protocol namespace plus a
/// name→template index for reverse lookup.
///
/// Endpoints are opaque handles: the router stores and returns them
/// without ever inspecting them. Build the table once at startup, then
/// share it read-only with the request-dispatch layer — `search` and
/// `url_for` take `&self` and are safe to call from parallel contexts.
///
/// ```
/// use wayfarer::{params, Protocol, Router};
///
/// let mut router = Router::new();
/// router.add_named(Protocol::HTTP, "/sayhi/{name}", "sayhi", "sayhi")?;
///
/// let hit = router.search(&Protocol::HTTP, "/sayhi/aber")?;
/// assert_eq!(hit.endpoint, &"sayhi");
/// assert_eq!(hit.params.get_str("name"), Some("aber"));
///
/// let url = router.url_for("sayhi", &params! { "name" => "aber" })?;
/// assert_eq!(url, "/sayhi/aber");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Router<T> {
    trees: BTreeMap<Protocol, PathTree<T>>,
    names: BTreeMap<Protocol, HashMap<String, PathTemplate>>,
    converters: Converters,
}

impl<T> Router<T> {
    /// An empty router with the default converter registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: BTreeMap::new(),
            names: BTreeMap::new(),
            converters: Converters::default(),
        }
    }

    /// Build a router from a declarative [`Routes`] collection.
    pub fn from_routes(routes: Routes<T>) -> Result<Self, RouteConflict> {
        let mut router = Self::new();
        router.mount(routes)?;
        Ok(router)
    }

    /// Register a converter tag for subsequently added routes.
    pub fn converter<C: Converter + 'static>(&mut self, tag: impl Into<String>, converter: C) {
        self.converters.register(tag, converter);
    }

    /// Register an unnamed route.
    pub fn add(
        &mut self,
        protocol: Protocol,
        template: &str,
        endpoint: T,
    ) -> Result<(), RouteConflict> {
        self.add_inner(protocol, template, endpoint, None)
    }

    /// Register a named route.
    ///
    /// The name must be unique within its protocol namespace; the same
    /// name may be reused under a different protocol.
    pub fn add_named(
        &mut self,
        protocol: Protocol,
        template: &str,
        endpoint: T,
        name: impl Into<String>,
    ) -> Result<(), RouteConflict> {
        self.add_inner(protocol, template, endpoint, Some(name.into()))
    }

    /// Register every route collected in `routes`.
    pub fn mount(&mut self, routes: Routes<T>) -> Result<(), RouteConflict> {
        for def in routes.into_defs() {
            self.add_inner(def.protocol, &def.template, def.endpoint, def.name)?;
        }
        Ok(())
    }

    fn add_inner(
        &mut self,
        protocol: Protocol,
        template: &str,
        endpoint: T,
        name: Option<String>,
    ) -> Result<(), RouteConflict> {
        let parsed = match PathTemplate::parse(template, &self.converters) {
            Ok(parsed) => parsed,
            Err(source) => {
                return Err(RouteConflict::Template {
                    protocol,
                    template: template.to_owned(),
                    source,
                });
            }
        };

        if let Some(name) = &name {
            let taken = self
                .names
                .get(&protocol)
                .is_some_and(|names| names.contains_key(name));
            if taken {
                return Err(RouteConflict::DuplicateName {
                    protocol,
                    name: name.clone(),
                });
            }
        }

        let inserted = self
            .trees
            .entry(protocol.clone())
            .or_insert_with(|| PathTree::with_converters(self.converters.clone()))
            .append_template(&parsed, endpoint);
        if let Err(source) = inserted {
            return Err(RouteConflict::Template {
                protocol,
                template: template.to_owned(),
                source,
            });
        }

        if let Some(name) = name {
            self.names.entry(protocol).or_default().insert(name, parsed);
        }
        Ok(())
    }

    /// Match a request path within a protocol namespace.
    ///
    /// The protocol is a hard partition: a path registered only under
    /// another protocol fails here, as does an entirely unknown
    /// protocol. Parameters come back fully converted.
    pub fn search<'r>(
        &'r self,
        protocol: &Protocol,
        path: &str,
    ) -> Result<Matched<'r, T>, NoMatchFound> {
        let no_match = || NoMatchFound {
            protocol: protocol.clone(),
            path: path.to_owned(),
        };
        let found = self
            .trees
            .get(protocol)
            .and_then(|tree| tree.search(path))
            .ok_or_else(no_match)?;
        let params = found.convert().ok_or_else(no_match)?;
        Ok(Matched {
            endpoint: found.endpoint,
            params,
        })
    }

    /// Generate a URL for a named route, searching every protocol
    /// namespace in lexicographic order and taking the first match.
    ///
    /// With the default namespaces that means `http` shadows
    /// `websocket` for names registered under both; use
    /// [`Router::url_for_in`] when the distinction matters.
    pub fn url_for(&self, name: &str, params: &PathParams) -> Result<String, NoRouteFound> {
        self.names
            .values()
            .find_map(|names| names.get(name))
            .ok_or_else(|| NoRouteFound::UnknownName {
                name: name.to_owned(),
            })
            .and_then(|template| render(template, name, params))
    }

    /// Generate a URL for a named route within one protocol namespace.
    pub fn url_for_in(
        &self,
        protocol: &Protocol,
        name: &str,
        params: &PathParams,
    ) -> Result<String, NoRouteFound> {
        self.names
            .get(protocol)
            .and_then(|names| names.get(name))
            .ok_or_else(|| NoRouteFound::UnknownName {
                name: name.to_owned(),
            })
            .and_then(|template| render(template, name, params))
    }

    /// The protocol namespaces that have at least one route.
    pub fn protocols(&self) -> impl Iterator<Item = &Protocol> {
        self.trees.keys()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn render(
    template: &PathTemplate,
    name: &str,
    params: &PathParams,
) -> Result<String, NoRouteFound> {
    template.render(params).map_err(|error| match error {
        RenderError::MissingParameter { name: parameter } => NoRouteFound::MissingParameter {
            name: name.to_owned(),
            parameter,
        },
    })
}

/// A successful protocol-scoped search.
#[derive(Debug)]
pub struct Matched<'r, T> {
    /// The endpoint handle bound to the matched route.
    pub endpoint: &'r T,
    /// Extracted parameters, converted to their declared types.
    pub params: PathParams,
}

impl<T> Matched<'_, T> {
    /// Deserialize the extracted parameters into a typed struct.
    pub fn params_into<D: DeserializeOwned>(&self) -> Result<D, serde_json::Error> {
        serde_json::from_value(self.params.to_value())
    }
}
