//! Boolean YAML expression matcher.

use super::support::evaluate;
use crate::convert::{Error, Input};
use crate::matcher::{format_message, formatted_message, Matcher, PathSegment};
use crate::query::format_expression;
use crate::value::Canonical;
use std::fmt;

/// YqMatcher succeeds when an expression evaluated over YAML documents yields
/// a single true result.
#[derive(Debug, Clone, PartialEq)]
pub struct YqMatcher {
    expression: String,
    first_failure_path: Vec<PathSegment>,
}

/// Creates a matcher for a literal expression.
pub fn matches(expression: impl Into<String>) -> YqMatcher {
    YqMatcher {
        expression: expression.into(),
        first_failure_path: Vec::new(),
    }
}

/// Creates a matcher for a parameterized expression. Each `%s`, `%v` or `%d`
/// in `template` is replaced by the next argument.
pub fn matches_fmt(template: &str, args: &[&dyn fmt::Display]) -> YqMatcher {
    matches(format_expression(template, args))
}

impl YqMatcher {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Annotates failure messages with the first point of mismatch.
    pub fn with_failure_path(mut self, path: Vec<PathSegment>) -> Self {
        self.first_failure_path = path;
        self
    }
}

impl Matcher for YqMatcher {
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        let results = evaluate(&self.expression, actual)?;

        match results.as_slice() {
            [result] => as_bool(result),
            _ => Err(Error::Result(format!(
                "expected exactly one result, got {}",
                results.len()
            ))),
        }
    }

    fn failure_message(&self, actual: &dyn Input) -> String {
        formatted_message(
            format_message(actual, "to match expression", &self.expression),
            &self.first_failure_path,
        )
    }

    fn negated_failure_message(&self, actual: &dyn Input) -> String {
        formatted_message(
            format_message(actual, "not to match expression", &self.expression),
            &self.first_failure_path,
        )
    }
}

// Scalar results are read the way a YAML node's text would be.
fn as_bool(result: &Canonical) -> Result<bool, Error> {
    let text = match result {
        Canonical::Bool(b) => return Ok(*b),
        Canonical::String(s) => s.clone(),
        Canonical::Int(i) => i.to_string(),
        Canonical::BigInt(n) => n.to_string(),
        other => return Err(Error::Result(format!("{} is not a boolean", other))),
    };

    parse_bool(&text)
        .ok_or_else(|| Error::Result(format!("invalid boolean literal {:?}", text)))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::expect;

    #[test]
    fn test_match_yaml_text() {
        let actual = "a: 1".to_string();
        assert!(matches(".a == 1").matches(&actual).unwrap());
        assert!(!matches(".a == 2").matches(&actual).unwrap());

        expect(&actual).to(matches(".a == 1"));
        expect(&"a: 1").to_not(matches(".a == 2"));
    }

    #[test]
    fn test_match_bytes() {
        let actual = b"items:\n  - name: x\n".to_vec();
        assert!(matches(r#".items[0].name == "x""#).matches(&actual).unwrap());
    }

    #[test]
    fn test_match_converted_input() {
        let actual = serde_json::json!({"a": 1});
        assert!(matches(".a == 1").matches(&actual).unwrap());
    }

    #[test]
    fn test_boolean_like_results() {
        let actual = "flag: \"true\"\nzero: 0\nname: web\n".to_string();
        assert!(matches(".flag").matches(&actual).unwrap());
        assert!(!matches(".zero").matches(&actual).unwrap());

        let err = matches(".name").matches(&actual).unwrap_err();
        assert!(matches!(err, Error::Result(_)));
        assert!(err.to_string().starts_with("failure parsing result: "));
    }

    #[test]
    fn test_exactly_one_result_required() {
        let actual = "a: 1\n---\na: 2\n".to_string();
        let err = matches(".a == 1").matches(&actual).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failure parsing result: expected exactly one result, got 2"
        );

        assert!(matches("select(.a == 2) | .a == 2").matches(&actual).unwrap());

        let err = matches("empty").matches(&"a: 1".to_string()).unwrap_err();
        assert!(matches!(err, Error::Result(_)));
    }

    #[test]
    fn test_matches_fmt() {
        let matcher = matches_fmt(".a == %d", &[&1]);
        assert_eq!(matcher.expression(), ".a == 1");
        assert!(matcher.matches(&"a: 1".to_string()).unwrap());
    }

    #[test]
    fn test_failure_messages() {
        let actual = "a: 1".to_string();
        let matcher = matches(".a == 2").with_failure_path(vec![PathSegment::from("a")]);

        let msg = matcher.failure_message(&actual);
        assert!(msg.contains("to match expression\n    .a == 2"));
        assert!(msg.ends_with("first mismatched key: \"a\""));

        let msg = matcher.negated_failure_message(&actual);
        assert!(msg.contains("not to match expression\n    .a == 2"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("F"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
