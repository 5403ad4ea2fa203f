//! Protocol namespace keys.

use std::borrow::Cow;
use std::fmt;

/// A protocol namespace.
///
/// Routes are partitioned by protocol: a template registered under
/// [`Protocol::HTTP`] is invisible to searches under
/// [`Protocol::WEBSOCKET`] and vice versa. The set is open — hosts
/// speaking other protocols can mint their own keys with
/// [`Protocol::new`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Protocol(Cow<'static, str>);

impl Protocol {
    /// The HTTP namespace.
    pub const HTTP: Protocol = Protocol(Cow::Borrowed("http"));

    /// The WebSocket namespace.
    pub const WEBSOCKET: Protocol = Protocol(Cow::Borrowed("websocket"));

    /// A custom protocol namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The namespace name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Protocol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Protocol {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_compare_with_custom_keys() {
        assert_eq!(Protocol::HTTP, Protocol::new("http"));
        assert_eq!(Protocol::from("websocket"), Protocol::WEBSOCKET);
        assert_ne!(Protocol::HTTP, Protocol::WEBSOCKET);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Protocol::HTTP < Protocol::WEBSOCKET);
        assert!(Protocol::new("amqp") < Protocol::HTTP);
    }
}
