//! k8s module - Kubernetes objects and test helpers.
//!
//! [`Unstructured`] and [`UnstructuredList`] are understood by the conversion
//! pipeline, so anything fetched through a [`Client`] can be matched with the
//! jq and yq matchers directly. [`Helper`] addresses objects by kind and key;
//! [`TypedHelper`] takes both from typed [`Resource`]s.

mod client;
mod error;
mod object;
mod typed;
mod unstructured;

pub use client::*;
pub use error::*;
pub use object::*;
pub use typed::*;
pub use unstructured::*;
