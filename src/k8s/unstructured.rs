//! Kind-keyed helpers returning deferred client calls.

use super::client::{Client, ListOptions};
use super::error::ClientError;
use super::object::{GroupVersionKind, ObjectKey, Unstructured, UnstructuredList};

/// Helper wraps a client and hands out closures suitable for polling
/// assertions: each call of a returned closure hits the client again.
///
/// ```ignore
/// let k = Helper::new(&client);
/// let pod = GroupVersionKind::new("", "v1", "Pod");
/// let get = k.get(&pod, named("web").in_namespace("default"));
/// expect(&get()?).to(jq::matches(r#".status.phase == "Running""#));
/// ```
#[derive(Debug)]
pub struct Helper<'c, C: ?Sized> {
    client: &'c C,
}

impl<'c, C: Client + ?Sized> Helper<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Helper { client }
    }

    /// Returns a closure fetching the object of kind `gvk` at `key`.
    ///
    /// Cluster-scoped objects use [`named`](super::named); namespaced ones
    /// `named(..).in_namespace(..)` or [`namespaced_named`](super::namespaced_named).
    pub fn get(
        &self,
        gvk: &GroupVersionKind,
        key: ObjectKey,
    ) -> impl Fn() -> Result<Unstructured, ClientError> + 'c {
        let client = self.client;
        let gvk = gvk.clone();
        move || client.get(&gvk, &key)
    }

    /// Returns a closure listing the objects of kind `gvk`.
    pub fn list(
        &self,
        gvk: &GroupVersionKind,
        options: ListOptions,
    ) -> impl Fn() -> Result<UnstructuredList, ClientError> + 'c {
        let client = self.client;
        let gvk = gvk.clone();
        move || client.list(&gvk, &options)
    }

    /// Returns a closure deleting the object of kind `gvk` at `key`.
    pub fn delete(
        &self,
        gvk: &GroupVersionKind,
        key: ObjectKey,
    ) -> impl Fn() -> Result<(), ClientError> + 'c {
        let client = self.client;
        let gvk = gvk.clone();
        move || client.delete(&gvk, &key)
    }
}
