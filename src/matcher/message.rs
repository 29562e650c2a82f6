//! Failure message formatting.

use crate::convert::{format_object, Input};
use std::fmt;

/// PathSegment is one step of a path into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Key of a mapping.
    Key(String),
    /// Index into a sequence.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Formats the standard "Expected <actual> <message> <expected>" text.
pub fn format_message(actual: &dyn Input, message: &str, expected: impl fmt::Display) -> String {
    format!(
        "Expected\n{}\n{}\n    {}",
        format_object(actual),
        message,
        expected
    )
}

/// Appends the first mismatched key, if any, to a comparison message.
pub fn formatted_message(comparison: String, failure_path: &[PathSegment]) -> String {
    if failure_path.is_empty() {
        return comparison;
    }

    format!(
        "{}\n\nfirst mismatched key: {}",
        comparison,
        formatted_failure_path(failure_path)
    )
}

/// Renders a root-first path: keys quoted and dot-separated, indices as `[n]`.
pub fn formatted_failure_path(failure_path: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in failure_path.iter().enumerate() {
        match segment {
            PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
            PathSegment::Key(key) => {
                if i != 0 {
                    out.push('.');
                }
                out.push_str(&format!("\"{}\"", key));
            }
        }
    }
    out
}
