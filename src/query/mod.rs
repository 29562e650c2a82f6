//! Query module - evaluates jq expressions against canonical values.
//!
//! Expressions are parsed and compiled once by [`Query::parse`] and can then be
//! run against any number of [`Canonical`](crate::value::Canonical) values.
//! [`format_expression`] builds parameterized expressions.

mod engine;
mod template;

pub use engine::*;
pub use template::*;
