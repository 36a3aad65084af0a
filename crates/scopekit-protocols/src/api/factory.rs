//! API factory declarations.

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{AnyApiRef, ApiInstance, ApiRef};
use crate::error::ApiError;

/// Produce function stored in a factory.
pub type ProduceFn = dyn Fn(&ApiDeps) -> Result<ApiInstance, ApiError> + Send + Sync;

/// Declares how to produce the instance for an API from named dependencies.
#[derive(Clone)]
pub struct ApiFactory {
    api: AnyApiRef,
    deps: BTreeMap<String, AnyApiRef>,
    produce: Arc<ProduceFn>,
}

impl ApiFactory {
    /// Start declaring a factory for the given API.
    pub fn builder<T: Any + Send + Sync>(api: &ApiRef<T>) -> ApiFactoryBuilder<T> {
        ApiFactoryBuilder {
            api: api.erase(),
            deps: BTreeMap::new(),
            _marker: PhantomData,
        }
    }

    /// Create an untyped factory from its parts.
    pub fn from_parts(
        api: AnyApiRef,
        deps: BTreeMap<String, AnyApiRef>,
        produce: Arc<ProduceFn>,
    ) -> Self {
        Self { api, deps, produce }
    }

    /// The API this factory produces.
    pub fn api(&self) -> &AnyApiRef {
        &self.api
    }

    /// Dependencies by name.
    pub fn deps(&self) -> &BTreeMap<String, AnyApiRef> {
        &self.deps
    }

    /// Run the produce step.
    pub fn produce(&self, deps: &ApiDeps) -> Result<ApiInstance, ApiError> {
        (self.produce)(deps)
    }
}

impl fmt::Debug for ApiFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFactory")
            .field("api", &self.api)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Builder for typed factories.
pub struct ApiFactoryBuilder<T> {
    api: AnyApiRef,
    deps: BTreeMap<String, AnyApiRef>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ApiFactoryBuilder<T> {
    /// Declare a named dependency.
    pub fn dep(mut self, name: impl Into<String>, api: impl Into<AnyApiRef>) -> Self {
        self.deps.insert(name.into(), api.into());
        self
    }

    /// Finish with the produce closure.
    pub fn build<F>(self, produce: F) -> ApiFactory
    where
        F: Fn(&ApiDeps) -> Result<T, ApiError> + Send + Sync + 'static,
    {
        ApiFactory {
            api: self.api,
            deps: self.deps,
            produce: Arc::new(move |deps: &ApiDeps| {
                produce(deps).map(|instance| Arc::new(instance) as ApiInstance)
            }),
        }
    }
}

/// Dependency instances handed to a factory, keyed by dependency name.
pub struct ApiDeps {
    api: String,
    items: BTreeMap<String, ApiInstance>,
}

impl ApiDeps {
    /// Create the dependency view for the factory producing `api`.
    pub fn new(api: impl Into<String>, items: BTreeMap<String, ApiInstance>) -> Self {
        Self {
            api: api.into(),
            items,
        }
    }

    /// Id of the API being produced.
    pub fn api(&self) -> &str {
        &self.api
    }

    /// Get a dependency by name.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ApiError> {
        let instance = self.get_raw(name)?;
        instance
            .clone()
            .downcast::<T>()
            .map_err(|_| ApiError::DependencyTypeMismatch {
                api: self.api.clone(),
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Get a dependency by name without a type check.
    pub fn get_raw(&self, name: &str) -> Result<&ApiInstance, ApiError> {
        self.items
            .get(name)
            .ok_or_else(|| ApiError::UndeclaredDependency {
                api: self.api.clone(),
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for ApiDeps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiDeps")
            .field("api", &self.api)
            .field("names", &self.items.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// An entry passed to resolution: transfer an existing instance, or produce a new one.
#[derive(Debug, Clone)]
pub enum ApiItem {
    /// Carry the parent's instance through unchanged.
    Ref(AnyApiRef),
    /// Produce a new instance.
    Factory(ApiFactory),
}

impl ApiItem {
    /// Id of the API this item provides.
    pub fn id(&self) -> &str {
        match self {
            ApiItem::Ref(api) => api.id(),
            ApiItem::Factory(factory) => factory.api().id(),
        }
    }

    pub fn as_factory(&self) -> Option<&ApiFactory> {
        match self {
            ApiItem::Factory(factory) => Some(factory),
            ApiItem::Ref(_) => None,
        }
    }
}

impl From<AnyApiRef> for ApiItem {
    fn from(api: AnyApiRef) -> Self {
        ApiItem::Ref(api)
    }
}

impl<T> From<&ApiRef<T>> for ApiItem {
    fn from(api: &ApiRef<T>) -> Self {
        ApiItem::Ref(api.erase())
    }
}

impl<T> From<ApiRef<T>> for ApiItem {
    fn from(api: ApiRef<T>) -> Self {
        ApiItem::Ref(api.into())
    }
}

impl From<ApiFactory> for ApiItem {
    fn from(factory: ApiFactory) -> Self {
        ApiItem::Factory(factory)
    }
}

impl From<&ApiFactory> for ApiItem {
    fn from(factory: &ApiFactory) -> Self {
        ApiItem::Factory(factory.clone())
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
