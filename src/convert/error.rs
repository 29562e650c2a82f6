//! Error types for conversion and query evaluation.

use thiserror::Error;

/// Error represents every failure the conversion pipeline and the query
/// adapters can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned by converters for inputs they do not handle. The registry
    /// recovers it and tries the next converter; callers never see it from
    /// [`convert`](super::convert).
    #[error("type not supported by this converter")]
    TypeNotSupported,

    #[error("unsupported type:\n{0}")]
    UnsupportedType(String),

    #[error("a valid document is expected")]
    EmptyDocument,

    #[error("a mapping or sequence is required")]
    NotAContainer,

    #[error("unable to unmarshal result, {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failure reading document: {0}")]
    DecodeYaml(#[source] serde_yaml::Error),

    #[error("failed to read from reader: {0}")]
    Read(#[source] std::io::Error),

    #[error("unable to parse expression {expression}, {message}")]
    Parse { expression: String, message: String },

    #[error("failure evaluating expression: {0}")]
    Query(String),

    #[error("failure parsing result: {0}")]
    Result(String),

    #[error("unable to marshal result, {0}")]
    Encode(String),

    /// A converter recognized its input but failed for a domain reason.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a converter-specific error.
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Custom(err.into())
    }

    /// Creates a parse error for the given expression.
    pub fn parse(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is the "type not supported" sentinel.
    pub fn is_type_not_supported(&self) -> bool {
        matches!(self, Error::TypeNotSupported)
    }

    /// Returns the wrapped converter error, if this is one and it has type `E`.
    pub fn downcast_custom<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Error::Custom(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
