//! Compressed path trie.
//!
//! Templates are stored as radix-compressed literal fragments with at
//! most one parameter edge per node. Lookup is a depth-first search that
//! always prefers the literal branch and backtracks into the parameter
//! edge when a literal subtree dead-ends. Every literal child owns a
//! non-empty fragment and every capture consumes at least one byte, so
//! recursion depth stays bounded by the request path length no matter
//! how the templates overlap.

use std::mem;

use memchr::memchr;

use crate::convert::Converters;
use crate::error::InsertError;
use crate::r#match::PathMatch;
use crate::template::{ParamSpec, Part, PathTemplate};

/// A compressed trie mapping path templates to endpoints.
///
/// The tree knows nothing about protocols or route names; it stores one
/// namespace worth of templates and answers structural lookups.
///
/// ```
/// use wayfarer_tree::PathTree;
///
/// let mut tree = PathTree::new();
/// tree.append("/hello/{time:int}", "clock")?;
///
/// let found = tree.search("/hello/123").expect("matches");
/// assert_eq!(found.endpoint, &"clock");
/// assert_eq!(found.get("time"), Some("123"));
/// assert!(tree.search("/hello/now").is_none());
/// # Ok::<(), wayfarer_tree::InsertError>(())
/// ```
#[derive(Debug)]
pub struct PathTree<T> {
    root: Node<T>,
    converters: Converters,
}

impl<T> PathTree<T> {
    /// An empty tree with the default converter registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_converters(Converters::default())
    }

    /// An empty tree with a caller-supplied converter registry.
    #[must_use]
    pub fn with_converters(converters: Converters) -> Self {
        Self {
            root: Node::new(String::new()),
            converters,
        }
    }

    /// The converter registry used to parse templates.
    #[must_use]
    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// Mutable access to the converter registry, for registering custom
    /// tags before the routes that use them.
    pub fn converters_mut(&mut self) -> &mut Converters {
        &mut self.converters
    }

    /// Parse a template and insert it.
    ///
    /// Re-registering an identical template replaces the previously
    /// bound endpoint: last write wins.
    pub fn append(&mut self, template: &str, endpoint: T) -> Result<(), InsertError> {
        let template = PathTemplate::parse(template, &self.converters)?;
        self.append_template(&template, endpoint)
    }

    /// Insert an already-parsed template.
    pub fn append_template(
        &mut self,
        template: &PathTemplate,
        endpoint: T,
    ) -> Result<(), InsertError> {
        self.root.insert(template.parts(), endpoint)
    }

    /// Match a request path against the tree.
    ///
    /// Returns `None` when no registered template accepts the path,
    /// including when a typed capture fails its converter. Trailing
    /// slashes are significant; nothing is normalized.
    #[must_use]
    pub fn search<'t, 'p>(&'t self, path: &'p str) -> Option<PathMatch<'t, 'p, T>> {
        let mut captures = Vec::new();
        let endpoint = self.root.find(path, &mut captures)?;
        Some(PathMatch { endpoint, captures })
    }
}

impl<T> Default for PathTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Node<T> {
    /// Radix-compressed literal fragment; may span `/` boundaries.
    prefix: String,
    /// Literal children, unique in their first byte by construction.
    children: Vec<Node<T>>,
    /// The single parameter edge leaving this node, if any.
    param: Option<Box<ParamEdge<T>>>,
    /// Endpoint bound here when a registered template ends at this node.
    endpoint: Option<T>,
}

#[derive(Debug)]
struct ParamEdge<T> {
    spec: ParamSpec,
    child: Node<T>,
}

impl<T> Node<T> {
    fn new(prefix: String) -> Self {
        Self {
            prefix,
            children: Vec::new(),
            param: None,
            endpoint: None,
        }
    }

    fn insert(&mut self, parts: &[Part], endpoint: T) -> Result<(), InsertError> {
        let Some((first, rest)) = parts.split_first() else {
            self.endpoint = Some(endpoint);
            return Ok(());
        };
        match first {
            Part::Literal(text) => self.insert_literal(text, rest, endpoint),
            Part::Param(spec) => match &mut self.param {
                Some(edge) if edge.spec.compatible(spec) => edge.child.insert(rest, endpoint),
                Some(edge) => Err(InsertError::Conflict {
                    with: edge.spec.to_string(),
                }),
                None => {
                    let mut edge = Box::new(ParamEdge {
                        spec: spec.clone(),
                        child: Node::new(String::new()),
                    });
                    edge.child.insert(rest, endpoint)?;
                    self.param = Some(edge);
                    Ok(())
                }
            },
        }
    }

    /// Place `text` below this node, splitting an existing child where
    /// the new fragment diverges mid-literal.
    fn insert_literal(&mut self, text: &str, rest: &[Part], endpoint: T) -> Result<(), InsertError> {
        debug_assert!(!text.is_empty());
        let lead = text.as_bytes()[0];
        let Some(position) = self
            .children
            .iter()
            .position(|child| child.prefix.as_bytes()[0] == lead)
        else {
            let mut child = Node::new(text.to_owned());
            child.insert(rest, endpoint)?;
            self.children.push(child);
            return Ok(());
        };

        let child = &mut self.children[position];
        let common = common_prefix(&child.prefix, text);
        if common < child.prefix.len() {
            child.split(common);
        }
        if common == text.len() {
            child.insert(rest, endpoint)
        } else {
            child.insert_literal(&text[common..], rest, endpoint)
        }
    }

    /// Split this node's fragment at `at`, pushing everything below the
    /// split point (children, parameter edge, endpoint) into a new child.
    fn split(&mut self, at: usize) {
        let tail = Node {
            prefix: self.prefix.split_off(at),
            children: mem::take(&mut self.children),
            param: self.param.take(),
            endpoint: self.endpoint.take(),
        };
        self.children.push(tail);
    }

    fn find<'t, 'p>(
        &'t self,
        path: &'p str,
        captures: &mut Vec<(&'t ParamSpec, &'p str)>,
    ) -> Option<&'t T> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            // Only terminal nodes accept; a parameter edge cannot match
            // an empty capture.
            return self.endpoint.as_ref();
        }

        let mark = captures.len();
        let lead = rest.as_bytes()[0];
        if let Some(child) = self
            .children
            .iter()
            .find(|child| child.prefix.as_bytes()[0] == lead)
        {
            if let Some(found) = child.find(rest, captures) {
                return Some(found);
            }
            captures.truncate(mark);
        }

        if let Some(edge) = &self.param {
            if let Some(found) = edge.find(rest, captures) {
                return Some(found);
            }
            captures.truncate(mark);
        }

        None
    }
}

impl<T> ParamEdge<T> {
    fn find<'t, 'p>(
        &'t self,
        rest: &'p str,
        captures: &mut Vec<(&'t ParamSpec, &'p str)>,
    ) -> Option<&'t T> {
        let (raw, remainder) = if self.spec.is_tail() {
            (rest, "")
        } else {
            let end = memchr(b'/', rest.as_bytes()).unwrap_or(rest.len());
            let segment = &rest[..end];
            let raw = segment.strip_suffix(self.spec.suffix())?;
            (raw, &rest[end..])
        };
        if raw.is_empty() {
            return None;
        }
        if self.spec.gates() && !self.spec.converter().matches(raw) {
            return None;
        }

        captures.push((&self.spec, raw));
        if let Some(found) = self.child.find(remainder, captures) {
            return Some(found);
        }
        captures.pop();
        None
    }
}

/// Length in bytes of the longest common prefix, clamped to a character
/// boundary.
fn common_prefix(a: &str, b: &str) -> usize {
    let mut len = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(len) {
        len -= 1;
    }
    len
}
