//! Document decoding and evaluation shared by the YAML matchers.

use crate::convert::{convert, Error, Input};
use crate::query::Query;
use crate::value::{normalize, Canonical, Value};
use serde::Deserialize;
use std::borrow::Cow;

/// Returns the text of textual inputs: strings and byte buffers.
pub(crate) fn text(actual: &dyn Input) -> Option<Cow<'_, str>> {
    let any = actual.as_any();
    if let Some(s) = any.downcast_ref::<String>() {
        return Some(Cow::Borrowed(s.as_str()));
    }
    if let Some(s) = any.downcast_ref::<&'static str>() {
        return Some(Cow::Borrowed(*s));
    }
    if let Some(b) = any.downcast_ref::<Vec<u8>>() {
        return Some(String::from_utf8_lossy(b));
    }
    if let Some(b) = any.downcast_ref::<&'static [u8]>() {
        return Some(String::from_utf8_lossy(b));
    }
    None
}

/// Decodes every `---` separated document of a YAML stream.
///
/// Unlike JSON conversion, scalar documents are kept as they are.
pub fn decode_documents(yaml: &str) -> Result<Vec<Canonical>, Error> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(yaml) {
        let decoded = serde_yaml::Value::deserialize(document).map_err(Error::DecodeYaml)?;
        documents.push(normalize(Value::from(decoded)));
    }
    Ok(documents)
}

/// Returns the documents held by `actual`. Textual inputs are read as YAML;
/// anything else goes through the conversion pipeline as a single document.
pub(crate) fn documents(actual: &dyn Input) -> Result<Vec<Canonical>, Error> {
    match text(actual) {
        Some(yaml) => decode_documents(&yaml),
        None => convert(actual).map(|document| vec![document]),
    }
}

/// Evaluates `expression` against every document and collects all results in
/// document order.
pub(crate) fn evaluate(expression: &str, actual: &dyn Input) -> Result<Vec<Canonical>, Error> {
    let query = Query::parse(expression)?;
    let documents = documents(actual)?;

    let mut results = Vec::new();
    for document in &documents {
        results.extend(query.all(document)?);
    }

    tracing::trace!(
        expression,
        documents = documents.len(),
        results = results.len(),
        "yaml expression evaluated"
    );

    Ok(results)
}
