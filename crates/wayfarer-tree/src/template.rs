//! Parsed path templates.
//!
//! A template like `/users/{id:int}/avatar.{ext}` is parsed once, at
//! registration time, into alternating literal runs and parameter specs.
//! The parsed form drives both tree insertion and reverse URL rendering.

use std::fmt;
use std::mem;
use std::sync::Arc;

use memchr::memchr;
use serde_json::Value;

use crate::convert::{Converter, Converters, DEFAULT_TAG, TAIL_TAG};
use crate::error::{InsertError, RenderError};
use crate::r#match::PathParams;

/// One `{name}` / `{name:type}` placeholder, together with the literal
/// text fused after it inside the same segment (the `.png` of
/// `avatar.{name}.png`-style templates).
#[derive(Clone)]
pub struct ParamSpec {
    name: String,
    tag: Option<String>,
    suffix: String,
    converter: Arc<dyn Converter>,
    gate: bool,
    tail: bool,
}

impl ParamSpec {
    /// The placeholder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared converter tag, or the default tag if none was given.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(DEFAULT_TAG)
    }

    /// The converter bound to this placeholder.
    #[must_use]
    pub fn converter(&self) -> &dyn Converter {
        &*self.converter
    }

    /// Convert captured text with the bound converter.
    #[must_use]
    pub fn convert(&self, raw: &str) -> Option<Value> {
        self.converter.convert(raw)
    }

    /// The fused literal that must terminate the captured segment.
    pub(crate) fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether the converter is consulted while matching.
    pub(crate) fn gates(&self) -> bool {
        self.gate
    }

    /// Whether the capture consumes the rest of the path.
    pub(crate) fn is_tail(&self) -> bool {
        self.tail
    }

    /// Whether two specs may share a single parameter edge.
    pub(crate) fn compatible(&self, other: &ParamSpec) -> bool {
        self.name == other.name && self.tag() == other.tag() && self.suffix == other.suffix
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{{{}:{}}}{}", self.name, tag, self.suffix),
            None => write!(f, "{{{}}}{}", self.name, self.suffix),
        }
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// One parsed piece of a template.
#[derive(Clone, Debug)]
pub(crate) enum Part {
    /// Fixed text, may span several segments.
    Literal(String),
    /// A placeholder with its fused suffix.
    Param(ParamSpec),
}

/// A path template parsed into literal runs and parameter specs.
///
/// ```
/// use wayfarer_tree::{Converters, PathParams, PathTemplate};
///
/// let converters = Converters::default();
/// let template = PathTemplate::parse("/hello/{time:int}", &converters)?;
/// assert_eq!(template.pattern(), "/hello/{time:int}");
///
/// let mut params = PathParams::new();
/// params.insert("time", 123);
/// assert_eq!(template.render(&params)?, "/hello/123");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct PathTemplate {
    pattern: String,
    parts: Vec<Part>,
}

impl PathTemplate {
    /// Parse a template, resolving converter tags against `converters`.
    pub fn parse(pattern: &str, converters: &Converters) -> Result<Self, InsertError> {
        if !pattern.starts_with('/') {
            return Err(InsertError::MissingLeadingSlash);
        }

        let bytes = pattern.as_bytes();
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut last_param_end: Option<usize> = None;
        let mut i = 0;

        while i < bytes.len() {
            let Some(offset) = memchr(b'{', &bytes[i..]) else {
                literal.push_str(&pattern[i..]);
                break;
            };
            let start = i + offset;
            literal.push_str(&pattern[i..start]);

            // A second placeholder with no `/` since the previous one
            // would put two captures in one segment.
            if let Some(end) = last_param_end {
                if memchr(b'/', &bytes[end..start]).is_none() {
                    return Err(InsertError::TooManyParams);
                }
            }

            let close = memchr(b'}', &bytes[start..])
                .map(|off| start + off)
                .ok_or(InsertError::UnclosedParam)?;
            let body = &pattern[start + 1..close];
            let (name, tag) = match body.split_once(':') {
                Some((name, tag)) => (name, Some(tag)),
                None => (body, None),
            };
            if name.is_empty() {
                return Err(InsertError::UnnamedParam);
            }
            let tag_name = tag.unwrap_or(DEFAULT_TAG);
            let converter =
                converters
                    .get(tag_name)
                    .ok_or_else(|| InsertError::UnknownConverter {
                        tag: tag_name.to_owned(),
                    })?;
            let tail = tag_name == TAIL_TAG;
            if tail && close + 1 != bytes.len() {
                return Err(InsertError::InvalidTail);
            }

            // The fused suffix runs to the end of the segment.
            let mut after = close + 1;
            while after < bytes.len() && bytes[after] != b'/' && bytes[after] != b'{' {
                after += 1;
            }
            let suffix = pattern[close + 1..after].to_owned();

            if !literal.is_empty() {
                parts.push(Part::Literal(mem::take(&mut literal)));
            }
            parts.push(Part::Param(ParamSpec {
                name: name.to_owned(),
                tag: tag.map(str::to_owned),
                suffix,
                converter,
                gate: tag.is_some_and(|t| t != DEFAULT_TAG && t != TAIL_TAG),
                tail,
            }));

            last_param_end = Some(close + 1);
            i = after;
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            parts,
        })
    }

    /// The original template text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Names of the placeholders, in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Param(spec) => Some(spec.name()),
            Part::Literal(_) => None,
        })
    }

    pub(crate) fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Substitute `params` into the placeholders, in template order.
    ///
    /// Values are rendered through each placeholder's converter; a
    /// placeholder whose value is absent or unrenderable fails with
    /// [`RenderError::MissingParameter`].
    pub fn render(&self, params: &PathParams) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.pattern.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Param(spec) => {
                    let rendered = params
                        .get(spec.name())
                        .and_then(|value| spec.converter.format(value))
                        .ok_or_else(|| RenderError::MissingParameter {
                            name: spec.name().to_owned(),
                        })?;
                    out.push_str(&rendered);
                    out.push_str(&spec.suffix);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> Result<PathTemplate, InsertError> {
        PathTemplate::parse(pattern, &Converters::default())
    }

    #[test]
    fn literal_only() {
        let template = parse("/hello/world").unwrap();
        assert_eq!(template.param_names().count(), 0);
        assert_eq!(template.render(&PathParams::new()).unwrap(), "/hello/world");
    }

    #[test]
    fn typed_and_untyped_params() {
        let template = parse("/sayhi/{name}/at/{time:int}").unwrap();
        assert_eq!(template.param_names().collect::<Vec<_>>(), ["name", "time"]);
    }

    #[test]
    fn mixed_segment_keeps_suffix_out_of_literals() {
        let template = parse("/sayhi/{name}/avatar.{suffix}").unwrap();
        let mut params = PathParams::new();
        params.insert("name", "aber");
        params.insert("suffix", "png");
        assert_eq!(template.render(&params).unwrap(), "/sayhi/aber/avatar.png");
    }

    #[test]
    fn fused_suffix_is_rendered_after_the_value() {
        let template = parse("/report/{year:int}.pdf").unwrap();
        let mut params = PathParams::new();
        params.insert("year", 2024);
        assert_eq!(template.render(&params).unwrap(), "/report/2024.pdf");
    }

    #[test]
    fn grammar_violations() {
        assert_eq!(parse_err("hello"), InsertError::MissingLeadingSlash);
        assert_eq!(parse_err("/x/{a}{b}"), InsertError::TooManyParams);
        assert_eq!(parse_err("/x/{a}.v{b}"), InsertError::TooManyParams);
        assert_eq!(parse_err("/x/{a"), InsertError::UnclosedParam);
        assert_eq!(parse_err("/x/{}"), InsertError::UnnamedParam);
        assert_eq!(parse_err("/x/{:int}"), InsertError::UnnamedParam);
        assert_eq!(
            parse_err("/x/{id:uuid}"),
            InsertError::UnknownConverter {
                tag: "uuid".to_owned()
            }
        );
    }

    #[test]
    fn two_params_in_distinct_segments_are_fine() {
        assert!(parse("/x/{a}/y/{b}").is_ok());
    }

    #[test]
    fn tail_must_be_final() {
        assert!(parse("/files/{rest:path}").is_ok());
        assert_eq!(parse_err("/files/{rest:path}/x"), InsertError::InvalidTail);
        assert_eq!(parse_err("/files/{rest:path}.txt"), InsertError::InvalidTail);
    }

    #[test]
    fn render_missing_parameter() {
        let template = parse("/sayhi/{name}").unwrap();
        assert_eq!(
            template.render(&PathParams::new()),
            Err(RenderError::MissingParameter {
                name: "name".to_owned()
            })
        );
    }

    fn parse_err(pattern: &str) -> InsertError {
        parse(pattern).map(|_| ()).unwrap_err()
    }
}
