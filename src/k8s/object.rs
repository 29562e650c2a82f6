//! Loosely-typed Kubernetes objects.

use crate::value::{normalize, Map, Value};
use std::fmt;

/// GroupVersionKind identifies a resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        GroupVersionKind {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Parses an `apiVersion` string (`group/version` or `version`) and a kind.
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        let (group, version) = match api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };
        GroupVersionKind::new(group, version, kind)
    }

    /// Returns the `apiVersion` form of the group and version.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Returns the kind of the matching list type.
    pub fn list_kind(&self) -> GroupVersionKind {
        if self.kind.ends_with("List") {
            return self.clone();
        }
        GroupVersionKind::new(&self.group, &self.version, format!("{}List", self.kind))
    }

    /// Returns the item kind when this is a list kind.
    pub fn item_kind(&self) -> GroupVersionKind {
        match self.kind.strip_suffix("List") {
            Some(kind) => GroupVersionKind::new(&self.group, &self.version, kind),
            None => self.clone(),
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// ObjectKey identifies an object by namespace and name.
///
/// Cluster-scoped objects leave the namespace empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

/// Creates a key with just a name.
pub fn named(name: impl Into<String>) -> ObjectKey {
    ObjectKey {
        namespace: String::new(),
        name: name.into(),
    }
}

/// Creates a key with both namespace and name.
pub fn namespaced_named(namespace: impl Into<String>, name: impl Into<String>) -> ObjectKey {
    ObjectKey {
        namespace: namespace.into(),
        name: name.into(),
    }
}

impl ObjectKey {
    /// Sets the namespace, as in `named("foo").in_namespace("bar")`.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

/// Unstructured is a map-backed object carrying its own type metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unstructured {
    pub object: Map,
}

impl Unstructured {
    pub fn new() -> Self {
        Unstructured::default()
    }

    /// Creates an object from its backing map.
    pub fn from_map(object: Map) -> Self {
        Unstructured { object }
    }

    /// Creates an empty object of the given type.
    pub fn with_gvk(gvk: &GroupVersionKind) -> Self {
        let mut u = Unstructured::new();
        u.set_gvk(gvk);
        u
    }

    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::from_api_version(
            self.nested_str(&["apiVersion"]).unwrap_or_default(),
            self.nested_str(&["kind"]).unwrap_or_default(),
        )
    }

    pub fn set_gvk(&mut self, gvk: &GroupVersionKind) {
        self.object
            .insert("apiVersion".to_string(), Value::String(gvk.api_version()));
        self.object
            .insert("kind".to_string(), Value::String(gvk.kind.clone()));
    }

    pub fn name(&self) -> &str {
        self.nested_str(&["metadata", "name"]).unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_metadata_field("name", Value::String(name.into()));
    }

    pub fn namespace(&self) -> &str {
        self.nested_str(&["metadata", "namespace"]).unwrap_or_default()
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if namespace.is_empty() {
            if let Some(metadata) = self.object.get_mut("metadata").and_then(Value::as_map_mut) {
                metadata.remove("namespace");
            }
            return;
        }
        self.set_metadata_field("namespace", Value::String(namespace));
    }

    /// Returns the key identifying this object.
    pub fn key(&self) -> ObjectKey {
        namespaced_named(self.namespace(), self.name())
    }

    /// Walks nested maps along `path`.
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.object.get(*first)?;
        for segment in rest {
            current = current.as_map()?.get(*segment)?;
        }
        Some(current)
    }

    /// Walks nested maps along `path` and returns the string found there.
    pub fn nested_str(&self, path: &[&str]) -> Option<&str> {
        self.nested(path).and_then(Value::as_str)
    }

    /// Renders the object as JSON, normalizing numeric leaves on the way.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(normalize(Value::Map(self.object.clone())))
    }

    /// Builds an object from a JSON value, which must be an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match Value::from(json) {
            Value::Map(object) => Some(Unstructured { object }),
            _ => None,
        }
    }

    /// Sets `metadata.<field>`, replacing a missing or non-map `metadata`.
    pub(crate) fn set_metadata_field(&mut self, field: &str, value: Value) {
        if let Some(Value::Map(metadata)) = self.object.get_mut("metadata") {
            metadata.insert(field.to_string(), value);
            return;
        }

        let mut metadata = Map::new();
        metadata.insert(field.to_string(), value);
        self.object
            .insert("metadata".to_string(), Value::Map(metadata));
    }
}

/// UnstructuredList is a collection of [`Unstructured`] objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnstructuredList {
    /// Type of the list itself, e.g. `v1, Kind=PodList`.
    pub gvk: GroupVersionKind,
    pub items: Vec<Unstructured>,
}

impl UnstructuredList {
    pub fn new(gvk: GroupVersionKind) -> Self {
        UnstructuredList {
            gvk,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unstructured> {
        self.items.iter()
    }
}
