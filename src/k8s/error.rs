//! Errors reported by clients and resource helpers.

use super::object::{GroupVersionKind, ObjectKey};
use thiserror::Error;

/// ClientError is returned by [`Client`](super::Client) implementations and
/// the helpers built on them.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{gvk} \"{key}\" not found")]
    NotFound { gvk: GroupVersionKind, key: ObjectKey },

    #[error("{gvk} \"{key}\" already exists")]
    AlreadyExists { gvk: GroupVersionKind, key: ObjectKey },

    #[error("no kind is registered for the type {0}")]
    MissingKind(&'static str),

    #[error("failed to serialize object: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to convert object: {0}")]
    Conversion(String),

    /// A step of a read-modify-write update failed.
    #[error("failed to {step} resource: {source}")]
    Update {
        step: &'static str,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Creates a not found error.
    pub fn not_found(gvk: &GroupVersionKind, key: &ObjectKey) -> Self {
        ClientError::NotFound {
            gvk: gvk.clone(),
            key: key.clone(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(gvk: &GroupVersionKind, key: &ObjectKey) -> Self {
        ClientError::AlreadyExists {
            gvk: gvk.clone(),
            key: key.clone(),
        }
    }

    pub(crate) fn update_step(step: &'static str) -> impl FnOnce(ClientError) -> ClientError {
        move |source| ClientError::Update {
            step,
            source: Box::new(source),
        }
    }

    /// Returns true for a not found error, including one raised by a step of
    /// an update.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound { .. } => true,
            ClientError::Update { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
