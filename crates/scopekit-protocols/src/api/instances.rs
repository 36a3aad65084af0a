//! Resolved API instance sets.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::ApiRef;

/// An opaque, shareable API instance.
pub type ApiInstance = Arc<dyn Any + Send + Sync>;

/// A set of API instances, keyed by their reference id.
///
/// Sets are built once per resolution. Contexts share them behind an `Arc`, so
/// nothing can modify a set after it has been attached to a context.
#[derive(Clone, Default)]
pub struct ApiInstances {
    items: HashMap<String, ApiInstance>,
}

impl ApiInstances {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instance, replacing any previous entry for the same id.
    pub fn insert(&mut self, id: impl Into<String>, instance: ApiInstance) -> Option<ApiInstance> {
        self.items.insert(id.into(), instance)
    }

    /// Get the untyped instance for an id.
    pub fn get_raw(&self, id: &str) -> Option<&ApiInstance> {
        self.items.get(id)
    }

    /// Get a typed instance. Returns `None` when absent or of a different type.
    pub fn get<T: Any + Send + Sync>(&self, api: &ApiRef<T>) -> Option<Arc<T>> {
        self.items
            .get(api.id())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Ids present in the set, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.items.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for ApiInstances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiInstances")
            .field("ids", &self.ids())
            .finish()
    }
}

impl<S: Into<String>> FromIterator<(S, ApiInstance)> for ApiInstances {
    fn from_iter<I: IntoIterator<Item = (S, ApiInstance)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }
}
