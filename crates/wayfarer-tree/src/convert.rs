//! Typed path parameter converters.
//!
//! A [`Converter`] turns the raw text captured for a `{name:type}`
//! placeholder into a typed [`Value`], and renders supplied values back
//! into path text for URL generation. Converters with a declared
//! non-default type also gate matching: a candidate segment that fails
//! conversion makes the whole branch a non-match.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The converter tag assumed when a placeholder declares no type.
pub const DEFAULT_TAG: &str = "str";

/// Tag of the tail converter, which captures across `/` boundaries.
pub(crate) const TAIL_TAG: &str = "path";

/// A typed parser for captured path parameters.
pub trait Converter: Send + Sync {
    /// Parse a captured run of characters into a typed value.
    ///
    /// Returning `None` means the candidate does not belong to this type.
    fn convert(&self, raw: &str) -> Option<Value>;

    /// Cheap validity check consulted on the matching hot path.
    fn matches(&self, raw: &str) -> bool {
        self.convert(raw).is_some()
    }

    /// Render a supplied value back into path text for URL generation.
    fn format(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Default converter: any non-empty run of characters without `/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn convert(&self, raw: &str) -> Option<Value> {
        self.matches(raw).then(|| Value::String(raw.to_owned()))
    }

    fn matches(&self, raw: &str) -> bool {
        !raw.is_empty() && !raw.contains('/')
    }
}

/// `int`: a non-empty run of ASCII digits whose value fits an `i64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerConverter;

impl Converter for IntegerConverter {
    fn convert(&self, raw: &str) -> Option<Value> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<i64>().ok().map(Value::from)
    }
}

/// `float`: a decimal number written with digits and at most one `.`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatConverter;

impl Converter for FloatConverter {
    fn convert(&self, raw: &str) -> Option<Value> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return None;
        }
        let parsed = raw.parse::<f64>().ok()?;
        serde_json::Number::from_f64(parsed).map(Value::Number)
    }
}

/// `path`: a tail capture consuming the entire remaining path, `/` included.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathConverter;

impl Converter for PathConverter {
    fn convert(&self, raw: &str) -> Option<Value> {
        (!raw.is_empty()).then(|| Value::String(raw.to_owned()))
    }

    fn matches(&self, raw: &str) -> bool {
        !raw.is_empty()
    }
}

/// Registry mapping converter tags to implementations.
///
/// The default registry knows `str`, `int`, `float`, and `path`; custom
/// tags can be added with [`Converters::register`] before routes using
/// them are parsed.
#[derive(Clone)]
pub struct Converters {
    map: HashMap<String, Arc<dyn Converter>>,
}

impl Converters {
    /// A registry with no converters at all, not even the default.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register a converter under a tag, replacing any previous entry.
    pub fn register<C: Converter + 'static>(&mut self, tag: impl Into<String>, converter: C) {
        self.map.insert(tag.into(), Arc::new(converter));
    }

    /// Look up the converter registered under a tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<dyn Converter>> {
        self.map.get(tag).map(Arc::clone)
    }

    /// Whether a tag has a registered converter.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }
}

impl Default for Converters {
    fn default() -> Self {
        let mut converters = Self::empty();
        converters.register(DEFAULT_TAG, StringConverter);
        converters.register("int", IntegerConverter);
        converters.register("float", FloatConverter);
        converters.register(TAIL_TAG, PathConverter);
        converters
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.map.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_tuple("Converters").field(&tags).finish()
    }
}
