//! # Query Matchers
//!
//! Test assertions that evaluate jq expressions against JSON, YAML and
//! Kubernetes objects.
//!
//! Whatever the test holds (JSON text or bytes, a reader, captured output, a
//! Kubernetes object, a decoded map) is first turned into a canonical value
//! tree by an extensible converter registry, then queried.
//!
//! ## Modules
//!
//! - [`value`] - Raw and canonical value trees and numeric normalization
//! - [`convert`] - Converter registry and the conversion pipeline
//! - [`query`] - Compiled jq expressions
//! - [`matcher`] - The matcher contract, combinators and `expect`
//! - [`jq`] - jq matchers and transforms over converted values
//! - [`yq`] - The same expression language over YAML documents
//! - [`k8s`] - Kubernetes objects, clients and resource helpers

pub mod convert;
pub mod jq;
pub mod k8s;
pub mod matcher;
pub mod query;
pub mod value;
pub mod yq;

pub use convert::{convert, register_converter, Error, Input, Registry};
pub use matcher::{expect, Matcher};
pub use value::{Canonical, Value};

/// Shorthand for [`jq::matches`].
pub fn match_jq(expression: impl Into<String>) -> jq::JqMatcher {
    jq::matches(expression)
}
