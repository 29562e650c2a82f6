//! The client contract and an in-memory implementation.

use super::error::ClientError;
use super::object::{GroupVersionKind, ObjectKey, Unstructured, UnstructuredList};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// ListOptions narrows a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only objects in this namespace; empty means every namespace.
    pub namespace: String,
    /// Only objects carrying all of these labels.
    pub labels: BTreeMap<String, String>,
}

impl ListOptions {
    pub fn new() -> Self {
        ListOptions::default()
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn matching_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Returns whether `object` passes the namespace and label filters.
    pub fn matches(&self, object: &Unstructured) -> bool {
        if !self.namespace.is_empty() && object.namespace() != self.namespace {
            return false;
        }

        self.labels.iter().all(|(key, expected)| {
            object.nested_str(&["metadata", "labels", key.as_str()]) == Some(expected.as_str())
        })
    }
}

/// Client reads and writes objects of an API server.
pub trait Client {
    /// Fetches the object of kind `gvk` identified by `key`.
    fn get(&self, gvk: &GroupVersionKind, key: &ObjectKey) -> Result<Unstructured, ClientError>;

    /// Lists the objects of kind `gvk`, which may be either the item or the
    /// list kind.
    fn list(
        &self,
        gvk: &GroupVersionKind,
        options: &ListOptions,
    ) -> Result<UnstructuredList, ClientError>;

    fn create(&self, object: &Unstructured) -> Result<(), ClientError>;

    /// Replaces an existing object.
    fn update(&self, object: &Unstructured) -> Result<(), ClientError>;

    fn delete(&self, gvk: &GroupVersionKind, key: &ObjectKey) -> Result<(), ClientError>;
}

/// FakeClient keeps objects in memory.
///
/// Every write bumps `metadata.resourceVersion`, so tests can observe that an
/// update went through.
#[derive(Debug, Default)]
pub struct FakeClient {
    objects: RwLock<BTreeMap<(GroupVersionKind, ObjectKey), Unstructured>>,
}

impl FakeClient {
    pub fn new() -> Self {
        FakeClient::default()
    }

    /// Creates a client already holding `objects`. Later duplicates replace
    /// earlier ones.
    pub fn with_objects(objects: impl IntoIterator<Item = Unstructured>) -> Self {
        let client = FakeClient::new();
        {
            let mut store = client
                .objects
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            for mut object in objects {
                set_resource_version(&mut object, 1);
                store.insert((object.gvk(), object.key()), object);
            }
        }
        client
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Client for FakeClient {
    fn get(&self, gvk: &GroupVersionKind, key: &ObjectKey) -> Result<Unstructured, ClientError> {
        let store = self.objects.read().unwrap_or_else(PoisonError::into_inner);

        tracing::debug!(%gvk, %key, "get");
        store
            .get(&(gvk.clone(), key.clone()))
            .cloned()
            .ok_or_else(|| ClientError::not_found(gvk, key))
    }

    fn list(
        &self,
        gvk: &GroupVersionKind,
        options: &ListOptions,
    ) -> Result<UnstructuredList, ClientError> {
        let item_kind = gvk.item_kind();
        let store = self.objects.read().unwrap_or_else(PoisonError::into_inner);

        let mut list = UnstructuredList::new(item_kind.list_kind());
        list.items = store
            .iter()
            .filter(|((kind, _), object)| *kind == item_kind && options.matches(object))
            .map(|(_, object)| object.clone())
            .collect();

        tracing::debug!(%gvk, namespace = %options.namespace, count = list.len(), "list");
        Ok(list)
    }

    fn create(&self, object: &Unstructured) -> Result<(), ClientError> {
        let gvk = checked_gvk(object)?;
        let key = object.key();
        let mut store = self.objects.write().unwrap_or_else(PoisonError::into_inner);

        let id = (gvk, key);
        if store.contains_key(&id) {
            return Err(ClientError::already_exists(&id.0, &id.1));
        }

        tracing::debug!(gvk = %id.0, key = %id.1, "create");
        let mut object = object.clone();
        set_resource_version(&mut object, 1);
        store.insert(id, object);
        Ok(())
    }

    fn update(&self, object: &Unstructured) -> Result<(), ClientError> {
        let gvk = checked_gvk(object)?;
        let key = object.key();
        let mut store = self.objects.write().unwrap_or_else(PoisonError::into_inner);

        let current = store
            .get_mut(&(gvk.clone(), key.clone()))
            .ok_or_else(|| ClientError::not_found(&gvk, &key))?;

        let version = resource_version(current) + 1;
        tracing::debug!(%gvk, %key, version, "update");
        *current = object.clone();
        set_resource_version(current, version);
        Ok(())
    }

    fn delete(&self, gvk: &GroupVersionKind, key: &ObjectKey) -> Result<(), ClientError> {
        let mut store = self.objects.write().unwrap_or_else(PoisonError::into_inner);

        tracing::debug!(%gvk, %key, "delete");
        store
            .remove(&(gvk.clone(), key.clone()))
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found(gvk, key))
    }
}

fn checked_gvk(object: &Unstructured) -> Result<GroupVersionKind, ClientError> {
    let gvk = object.gvk();
    if gvk.kind.is_empty() {
        return Err(ClientError::MissingKind("Unstructured"));
    }
    Ok(gvk)
}

fn resource_version(object: &Unstructured) -> u64 {
    object
        .nested_str(&["metadata", "resourceVersion"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn set_resource_version(object: &mut Unstructured, version: u64) {
    object.set_metadata_field("resourceVersion", Value::String(version.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::{named, namespaced_named};

    fn config_map(namespace: &str, name: &str, env: &str) -> Unstructured {
        let mut u = Unstructured::with_gvk(&GroupVersionKind::new("", "v1", "ConfigMap"));
        u.set_name(name);
        u.set_namespace(namespace);

        let mut labels = crate::value::Map::new();
        labels.insert("env".to_string(), Value::from(env));
        if let Some(Value::Map(metadata)) = u.object.get_mut("metadata") {
            metadata.insert("labels".to_string(), Value::Map(labels));
        }
        u
    }

    fn cm_gvk() -> GroupVersionKind {
        GroupVersionKind::new("", "v1", "ConfigMap")
    }

    #[test]
    fn test_get() {
        let client = FakeClient::with_objects([config_map("default", "a", "prod")]);

        let object = client.get(&cm_gvk(), &namespaced_named("default", "a")).unwrap();
        assert_eq!(object.name(), "a");
        assert_eq!(
            object.nested_str(&["metadata", "resourceVersion"]),
            Some("1")
        );

        let err = client.get(&cm_gvk(), &named("a")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_filters() {
        let client = FakeClient::with_objects([
            config_map("default", "a", "prod"),
            config_map("default", "b", "dev"),
            config_map("other", "c", "prod"),
        ]);

        let all = client.list(&cm_gvk(), &ListOptions::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.gvk.kind, "ConfigMapList");

        let default = client
            .list(&cm_gvk().list_kind(), &ListOptions::new().in_namespace("default"))
            .unwrap();
        let names: Vec<_> = default.iter().map(Unstructured::name).collect();
        assert_eq!(names, vec!["a", "b"]);

        let prod = client
            .list(&cm_gvk(), &ListOptions::new().matching_label("env", "prod"))
            .unwrap();
        assert_eq!(prod.len(), 2);

        let pods = client
            .list(&GroupVersionKind::new("", "v1", "Pod"), &ListOptions::new())
            .unwrap();
        assert!(pods.is_empty());
    }

    #[test]
    fn test_create_update_delete() {
        let client = FakeClient::new();
        let object = config_map("default", "a", "prod");

        client.create(&object).unwrap();
        assert!(matches!(
            client.create(&object).unwrap_err(),
            ClientError::AlreadyExists { .. }
        ));

        client.update(&config_map("default", "a", "dev")).unwrap();
        let updated = client.get(&cm_gvk(), &object.key()).unwrap();
        assert_eq!(updated.nested_str(&["metadata", "labels", "env"]), Some("dev"));
        assert_eq!(
            updated.nested_str(&["metadata", "resourceVersion"]),
            Some("2")
        );

        client.delete(&cm_gvk(), &object.key()).unwrap();
        assert!(client.is_empty());
        assert!(client.delete(&cm_gvk(), &object.key()).unwrap_err().is_not_found());
        assert!(client.update(&object).unwrap_err().is_not_found());
    }

    #[test]
    fn test_missing_kind() {
        let client = FakeClient::new();
        let err = client.create(&Unstructured::new()).unwrap_err();
        assert!(matches!(err, ClientError::MissingKind(_)));
    }
}
