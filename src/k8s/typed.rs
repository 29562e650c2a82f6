//! Helpers driven by typed resources.
//!
//! A typed resource names its own kind through [`Resource`] and converts to
//! and from [`Unstructured`] with a serde round trip. Results are always
//! returned unstructured, ready for the query matchers.

use super::client::{Client, ListOptions};
use super::error::ClientError;
use super::object::{named, GroupVersionKind, ObjectKey, Unstructured, UnstructuredList};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Resource is a typed API object.
pub trait Resource: Serialize + DeserializeOwned {
    /// Returns the kind of this type.
    fn gvk() -> GroupVersionKind;

    fn name(&self) -> &str;

    /// Returns the namespace, empty for cluster-scoped objects.
    fn namespace(&self) -> &str;

    fn key(&self) -> ObjectKey {
        named(self.name()).in_namespace(self.namespace())
    }
}

/// Returns the kind of `R`, failing when the type does not name one.
pub fn resource_gvk<R: Resource>() -> Result<GroupVersionKind, ClientError> {
    let gvk = R::gvk();
    if gvk.kind.is_empty() || gvk.version.is_empty() {
        return Err(ClientError::MissingKind(std::any::type_name::<R>()));
    }
    Ok(gvk)
}

/// Converts a typed resource into its unstructured form, with type metadata
/// set from [`Resource::gvk`].
pub fn to_unstructured<R: Resource>(resource: &R) -> Result<Unstructured, ClientError> {
    let gvk = resource_gvk::<R>()?;
    let json = serde_json::to_value(resource)?;

    let mut object = Unstructured::from_json(json).ok_or_else(|| {
        ClientError::Conversion(format!(
            "{} does not serialize to an object",
            std::any::type_name::<R>()
        ))
    })?;
    object.set_gvk(&gvk);
    Ok(object)
}

/// Converts an unstructured object into a typed resource.
pub fn from_unstructured<R: Resource>(object: &Unstructured) -> Result<R, ClientError> {
    Ok(serde_json::from_value(object.to_json())?)
}

/// TypedHelper wraps a client and takes kinds and keys from typed resources.
///
/// Like [`Helper`](super::Helper), every operation returns a closure that
/// performs the call each time it runs.
#[derive(Debug)]
pub struct TypedHelper<'c, C: ?Sized> {
    client: &'c C,
}

impl<'c, C: Client + ?Sized> TypedHelper<'c, C> {
    pub fn new(client: &'c C) -> Self {
        TypedHelper { client }
    }

    /// Returns a closure fetching the object identified by `resource`.
    pub fn get<R: Resource + 'c>(
        &self,
        resource: &R,
    ) -> impl Fn() -> Result<Unstructured, ClientError> + 'c {
        let client = self.client;
        let key = resource.key();

        move || client.get(&resource_gvk::<R>()?, &key)
    }

    /// Returns a closure listing objects of the kind of `R`.
    pub fn list<R: Resource + 'c>(
        &self,
        options: ListOptions,
    ) -> impl Fn() -> Result<UnstructuredList, ClientError> + 'c {
        let client = self.client;

        move || client.list(&resource_gvk::<R>()?, &options)
    }

    /// Returns a closure deleting the object identified by `resource`.
    pub fn delete<R: Resource + 'c>(
        &self,
        resource: &R,
    ) -> impl Fn() -> Result<(), ClientError> + 'c {
        let client = self.client;
        let key = resource.key();

        move || client.delete(&resource_gvk::<R>()?, &key)
    }

    /// Returns a closure that reads the object identified by `resource`,
    /// applies `update_fn` to its typed form, writes it back, and returns the
    /// stored result.
    pub fn update<R, F>(
        &self,
        resource: &R,
        update_fn: F,
    ) -> impl Fn() -> Result<Unstructured, ClientError> + 'c
    where
        R: Resource + 'c,
        F: Fn(&mut R) + 'c,
    {
        let client = self.client;
        let key = resource.key();

        move || {
            let gvk = resource_gvk::<R>()?;

            let current = client
                .get(&gvk, &key)
                .map_err(ClientError::update_step("get"))?;
            let mut typed: R = from_unstructured(&current)?;

            update_fn(&mut typed);

            let mut updated = to_unstructured(&typed)?;
            updated.set_name(key.name.clone());
            updated.set_namespace(key.namespace.clone());
            client
                .update(&updated)
                .map_err(ClientError::update_step("update"))?;

            client
                .get(&gvk, &key)
                .map_err(ClientError::update_step("get updated"))
        }
    }
}
