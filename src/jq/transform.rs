//! Transforms for composing jq queries with other matchers.

use crate::convert::{convert, Error, Input};
use crate::query::Query;
use crate::value::Canonical;

/// Returns a transform that evaluates `expression` and yields its first
/// result, of any shape.
///
/// Empty text or bytes mean there is nothing to query and yield
/// [`Canonical::Null`] whatever the expression is. A query that produces no
/// result also yields `Null` rather than `false`, so an absent value can be
/// told apart from a boolean one.
pub fn extract(expression: impl Into<String>) -> impl Fn(&dyn Input) -> Result<Canonical, Error> {
    let expression = expression.into();

    move |actual: &dyn Input| {
        if is_empty_text(actual) {
            return Ok(Canonical::Null);
        }

        let query = Query::parse(&expression)?;
        let data = convert(actual)?;

        query.first(&data).unwrap_or(Ok(Canonical::Null))
    }
}

/// Returns a transform that renders the actual value as JSON bytes, which the
/// pipeline accepts again as input.
pub fn as_json() -> impl Fn(&dyn Input) -> Result<Vec<u8>, Error> {
    |actual: &dyn Input| {
        let data = convert(actual)?;
        serde_json::to_vec(&data).map_err(|e| Error::Encode(e.to_string()))
    }
}

fn is_empty_text(actual: &dyn Input) -> bool {
    let any = actual.as_any();
    if let Some(s) = any.downcast_ref::<String>() {
        return s.is_empty();
    }
    if let Some(s) = any.downcast_ref::<&'static str>() {
        return s.is_empty();
    }
    if let Some(b) = any.downcast_ref::<Vec<u8>>() {
        return b.is_empty();
    }
    if let Some(b) = any.downcast_ref::<&'static [u8]>() {
        return b.is_empty();
    }
    false
}
