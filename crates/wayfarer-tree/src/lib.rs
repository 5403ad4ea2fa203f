//! Radix-tree path matcher.
//!
//! This crate provides the matching engine underneath wayfarer: a
//! compressed trie over URL path templates with typed parameter
//! capture and reverse rendering.
//!
//! # Features
//!
//! - Radix trie for fast lookups
//! - Path parameter extraction (`/items/{id}`)
//! - Type-safe path converters (`{id:int}`, extensible registry)
//! - Mixed segments fusing literals and captures (`avatar.{suffix}`)
//! - Tail captures spanning segments (`/files/{rest:path}`)
//! - Reverse rendering of parsed templates for URL generation

#![warn(unsafe_code)]

mod convert;
mod error;
mod r#match;
mod template;
mod trie;

pub use convert::{
    Converter, Converters, DEFAULT_TAG, FloatConverter, IntegerConverter, PathConverter,
    StringConverter,
};
pub use error::{InsertError, RenderError};
pub use r#match::{PathMatch, PathParams};
pub use template::{ParamSpec, PathTemplate};
pub use trie::PathTree;
