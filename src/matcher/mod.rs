//! Matcher module - the assertion contract shared by the query matchers.
//!
//! A [`Matcher`] evaluates an actual value and can describe a failed positive
//! or negated assertion. [`not`], [`and`] and [`with_transform`] compose
//! matchers; [`expect`] runs them.

mod matcher;
mod message;

pub use matcher::*;
pub use message::*;
