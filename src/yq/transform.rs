//! Transforms for composing YAML queries with other matchers.

use super::support::{evaluate, text};
use crate::convert::{convert, Error, Input};
use crate::value::Canonical;

/// Returns a transform that evaluates `expression` and renders its first
/// result as YAML text, ready to be matched again.
///
/// Empty input, or an expression without results, yields an empty string.
pub fn extract(expression: impl Into<String>) -> impl Fn(&dyn Input) -> Result<String, Error> {
    let expression = expression.into();

    move |actual: &dyn Input| {
        if text(actual).is_some_and(|t| t.is_empty()) {
            return Ok(String::new());
        }

        match evaluate(&expression, actual)?.first() {
            Some(result) => to_yaml(result),
            None => Ok(String::new()),
        }
    }
}

/// Returns a transform that renders the actual value as YAML text.
pub fn as_yaml() -> impl Fn(&dyn Input) -> Result<String, Error> {
    |actual: &dyn Input| to_yaml(&convert(actual)?)
}

fn to_yaml(value: &Canonical) -> Result<String, Error> {
    serde_yaml::to_string(value).map_err(|e| Error::Encode(e.to_string()))
}
