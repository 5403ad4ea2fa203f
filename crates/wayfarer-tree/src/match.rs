//! Match results and converted parameters.

use std::fmt;

use serde_json::Value;

use crate::convert::Converter;
use crate::template::ParamSpec;

/// A matched path with extracted parameters.
///
/// Captured values are kept as raw path text; [`PathMatch::convert`]
/// applies each placeholder's converter to produce typed values.
pub struct PathMatch<'t, 'p, T> {
    /// The endpoint bound to the matched template.
    pub endpoint: &'t T,
    pub(crate) captures: Vec<(&'t ParamSpec, &'p str)>,
}

impl<'t, 'p, T> PathMatch<'t, 'p, T> {
    /// Raw captured text for a parameter, by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'p str> {
        self.captures
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(_, raw)| *raw)
    }

    /// Iterate raw `(name, value)` captures in path order.
    pub fn raw(&self) -> impl Iterator<Item = (&'t str, &'p str)> + '_ {
        self.captures.iter().map(|(spec, raw)| (spec.name(), *raw))
    }

    /// The converter registered for a captured parameter.
    #[must_use]
    pub fn converter(&self, name: &str) -> Option<&'t dyn Converter> {
        self.captures
            .iter()
            .find(|(spec, _)| spec.name() == name)
            .map(|(spec, _)| spec.converter())
    }

    /// Convert every capture with its registered converter.
    ///
    /// Typed captures were already validated while matching, so this
    /// only returns `None` if a converter disagrees with itself.
    #[must_use]
    pub fn convert(&self) -> Option<PathParams> {
        let mut params = PathParams::new();
        for (spec, raw) in &self.captures {
            params.insert(spec.name(), spec.convert(raw)?);
        }
        Some(params)
    }
}

impl<T> fmt::Debug for PathMatch<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.raw()).finish()
    }
}

/// Converted path parameters, in capture order.
///
/// Compared as a map: ordering is preserved for iteration but ignored
/// by equality.
#[derive(Clone, Debug, Default)]
pub struct PathParams {
    entries: Vec<(String, Value)>,
}

impl PathParams {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Get a string value by name.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an integer value by name.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The parameters as a JSON object, for serde-based extraction.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}

impl PartialEq for PathParams {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl IntoIterator for PathParams {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_replaces_by_name() {
        let mut params = PathParams::new();
        params.insert("name", "aber");
        params.insert("name", "bert");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get_str("name"), Some("bert"));
    }

    #[test]
    fn equality_ignores_order() {
        let a: PathParams = [("x", json!(1)), ("y", json!(2))].into_iter().collect();
        let b: PathParams = [("y", json!(2)), ("x", json!(1))].into_iter().collect();
        assert_eq!(a, b);
        let c: PathParams = [("x", json!(1))].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn typed_accessors() {
        let params: PathParams = [("time", json!(123)), ("name", json!("aber"))]
            .into_iter()
            .collect();
        assert_eq!(params.get_i64("time"), Some(123));
        assert_eq!(params.get_str("name"), Some("aber"));
        assert_eq!(params.get_i64("name"), None);
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn to_value_builds_an_object() {
        let params: PathParams = [("id", json!(7))].into_iter().collect();
        assert_eq!(params.to_value(), json!({"id": 7}));
    }
}
