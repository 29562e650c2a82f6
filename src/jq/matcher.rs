//! Boolean jq expression matcher.

use crate::convert::{convert, Error, Input};
use crate::matcher::{format_message, formatted_message, Matcher, PathSegment};
use crate::query::{format_expression, Query};
use crate::value::Canonical;
use std::fmt;

/// JqMatcher succeeds when a jq expression yields `true` for the actual value.
#[derive(Debug, Clone, PartialEq)]
pub struct JqMatcher {
    expression: String,
    first_failure_path: Vec<PathSegment>,
}

/// Creates a matcher for a literal jq expression.
pub fn matches(expression: impl Into<String>) -> JqMatcher {
    JqMatcher {
        expression: expression.into(),
        first_failure_path: Vec::new(),
    }
}

/// Creates a matcher for a parameterized expression. Each `%s`, `%v` or `%d`
/// in `template` is replaced by the next argument.
pub fn matches_fmt(template: &str, args: &[&dyn fmt::Display]) -> JqMatcher {
    matches(format_expression(template, args))
}

impl JqMatcher {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Annotates failure messages with the first point of mismatch.
    pub fn with_failure_path(mut self, path: Vec<PathSegment>) -> Self {
        self.first_failure_path = path;
        self
    }
}

impl Matcher for JqMatcher {
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        let query = Query::parse(&self.expression)?;
        let data = convert(actual)?;

        match query.first(&data) {
            None => Ok(false),
            Some(Err(err)) => Err(err),
            Some(Ok(Canonical::Bool(matched))) => Ok(matched),
            Some(Ok(_)) => Ok(false),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{expect, not};

    fn doc(json: &str) -> String {
        json.to_string()
    }

    #[test]
    fn test_boolean_result() {
        let actual = doc(r#"{"Values": ["foo"]}"#);
        assert!(matches(r#".Values[0] == "foo""#).matches(&actual).unwrap());
        assert!(matches(r#"[.Values[] | select(. == "foo")] | length == 1"#)
            .matches(&actual)
            .unwrap());
        assert!(!matches(r#".Values[0] == "bar""#).matches(&actual).unwrap());
    }

    #[test]
    fn test_non_boolean_result_does_not_match() {
        assert!(!matches(".a").matches(&doc(r#"{"a": 1}"#)).unwrap());
        assert!(!matches(".a").matches(&doc(r#"{"a": "true"}"#)).unwrap());
    }

    #[test]
    fn test_no_result_does_not_match() {
        assert!(!matches("empty").matches(&doc("{}")).unwrap());
    }

    #[test]
    fn test_first_result_decides() {
        let actual = doc("[true, false]");
        assert!(matches(".[]").matches(&actual).unwrap());
        assert!(!matches(".[1], .[0]").matches(&actual).unwrap());
    }

    #[test]
    fn test_parse_error() {
        let err = matches(".a ==").matches(&doc("{}")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_conversion_error() {
        let err = matches(".a").matches(&doc("42")).unwrap_err();
        assert!(matches!(err, Error::NotAContainer));

        let err = matches(".a").matches(&7u32).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_query_error() {
        let err = matches(r#"error("boom")"#).matches(&doc("{}")).unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[test]
    fn test_matches_fmt() {
        let matcher = matches_fmt(r#".name == "%s" and .replicas == %d"#, &[&"web", &3]);
        assert_eq!(matcher.expression(), r#".name == "web" and .replicas == 3"#);
        assert!(matcher
            .matches(&doc(r#"{"name": "web", "replicas": 3}"#))
            .unwrap());
    }

    #[test]
    fn test_failure_messages() {
        let actual = doc(r#"{"a": 1}"#);
        let matcher = matches(".a == 2");

        let msg = matcher.failure_message(&actual);
        assert!(msg.starts_with("Expected\n    <alloc::string::String>: "));
        assert!(msg.ends_with("to match expression\n    .a == 2"));

        let msg = matcher.negated_failure_message(&actual);
        assert!(msg.ends_with("not to match expression\n    .a == 2"));
    }

    #[test]
    fn test_failure_path() {
        let matcher = matches(".spec[0].name == \"x\"").with_failure_path(vec![
            PathSegment::from("spec"),
            PathSegment::from(0usize),
            PathSegment::from("name"),
        ]);
        let msg = matcher.failure_message(&doc("{}"));
        assert!(msg.ends_with("\n\nfirst mismatched key: \"spec\"[0].\"name\""));
    }

    #[test]
    fn test_expect() {
        let actual = doc(r#"{"a": 1}"#);
        expect(&actual).to(matches(".a == 1"));
        expect(&actual).to_not(matches(".a == 2"));
        expect(&actual).to(not(matches(".a == 2")));
    }
}
