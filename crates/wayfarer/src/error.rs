//! The router's failure taxonomy.
//!
//! Registration-time failures ([`RouteConflict`]) are fatal to the
//! offending call; request-time failures ([`NoMatchFound`],
//! [`NoRouteFound`]) are expected outcomes the caller maps to a
//! protocol-appropriate response.

use std::fmt;

use wayfarer_tree::InsertError;

use crate::protocol::Protocol;

/// A registration that cannot coexist with the routes already present.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouteConflict {
    /// The route name is already bound within this protocol namespace.
    DuplicateName {
        /// Namespace the name was registered under.
        protocol: Protocol,
        /// The colliding route name.
        name: String,
    },
    /// The template could not be merged into the protocol's tree.
    Template {
        /// Namespace the template was registered under.
        protocol: Protocol,
        /// The offending template text.
        template: String,
        /// The underlying insertion failure.
        source: InsertError,
    },
}

impl fmt::Display for RouteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { protocol, name } => {
                write!(
                    f,
                    "route name \"{name}\" is already registered for protocol \"{protocol}\""
                )
            }
            Self::Template {
                protocol,
                template,
                source,
            } => {
                write!(
                    f,
                    "cannot register \"{template}\" under protocol \"{protocol}\": {source}"
                )
            }
        }
    }
}

impl std::error::Error for RouteConflict {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateName { .. } => None,
            Self::Template { source, .. } => Some(source),
        }
    }
}

/// No registered path satisfies the protocol/path pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoMatchFound {
    /// The protocol namespace that was searched.
    pub protocol: Protocol,
    /// The path that failed to match.
    pub path: String,
}

impl fmt::Display for NoMatchFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no route matches \"{}\" for protocol \"{}\"",
            self.path, self.protocol
        )
    }
}

impl std::error::Error for NoMatchFound {}

/// Reverse lookup failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NoRouteFound {
    /// No route was registered under the requested name.
    UnknownName {
        /// The requested route name.
        name: String,
    },
    /// The named route exists but a placeholder had no usable value.
    MissingParameter {
        /// The requested route name.
        name: String,
        /// The placeholder that could not be filled.
        parameter: String,
    },
}

impl fmt::Display for NoRouteFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName { name } => {
                write!(f, "no route is registered under the name \"{name}\"")
            }
            Self::MissingParameter { name, parameter } => {
                write!(
                    f,
                    "route \"{name}\" requires a value for parameter \"{parameter}\""
                )
            }
        }
    }
}

impl std::error::Error for NoRouteFound {}
