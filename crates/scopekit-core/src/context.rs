//! Context chain passed down the call chain.
//!
//! A [`Context`] is an immutable node pointing at its parent. Every `with_*`
//! method returns a new node and leaves the receiver untouched, so several
//! branches can derive from the same parent without observing each other.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::iter;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use scopekit_protocols::{ApiError, ApiInstances, ApiItem, ApiRef};
use tracing::debug;

use crate::abort::{AbortSignal, AbortTrigger};
use crate::key::{ContextKey, ContextValue};
use crate::resolver;

/// Scoped context carrying cancellation, deadline, APIs and values.
#[derive(Clone)]
pub struct Context {
    node: Arc<Node>,
}

struct Node {
    parent: Option<Context>,
    /// Effective signal: own token for abort/timeout layers, the parent's otherwise.
    signal: AbortSignal,
    /// Effective deadline, never later than the parent's.
    deadline: Option<DateTime<Utc>>,
    layer: Layer,
}

impl Drop for Node {
    // Unlink ancestors one at a time so long chains don't drop recursively.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(ctx) = parent {
            parent = match Arc::try_unwrap(ctx.node) {
                Ok(mut node) => node.parent.take(),
                Err(_) => None,
            };
        }
    }
}

enum Layer {
    Root,
    Abort,
    Timeout,
    Apis(Arc<ApiInstances>),
    Value { key: ContextKey, value: ContextValue },
}

impl Layer {
    fn kind(&self) -> &'static str {
        match self {
            Layer::Root => "root",
            Layer::Abort => "abort",
            Layer::Timeout => "timeout",
            Layer::Apis(_) => "apis",
            Layer::Value { .. } => "value",
        }
    }
}

impl Context {
    /// Create a root context. Its signal never fires and it holds no deadline,
    /// APIs or values.
    pub fn root() -> Self {
        Self {
            node: Arc::new(Node {
                parent: None,
                signal: AbortSignal::never(),
                deadline: None,
                layer: Layer::Root,
            }),
        }
    }

    fn derive(&self, signal: AbortSignal, deadline: Option<DateTime<Utc>>, layer: Layer) -> Self {
        Self {
            node: Arc::new(Node {
                parent: Some(self.clone()),
                signal,
                deadline,
                layer,
            }),
        }
    }

    fn derive_layer(&self, layer: Layer) -> Self {
        self.derive(self.node.signal.clone(), self.node.deadline, layer)
    }

    /// This context followed by all of its ancestors, nearest first.
    fn ancestors(&self) -> impl Iterator<Item = &Context> {
        iter::successors(Some(self), |&ctx| ctx.node.parent.as_ref())
    }

    /// Signal that fires when this context or any of its parents abort.
    pub fn abort_signal(&self) -> &AbortSignal {
        &self.node.signal
    }

    /// Future that resolves when this context or any of its parents abort.
    pub fn aborted(&self) -> impl Future<Output = ()> + Send + use<> {
        self.node.signal.aborted()
    }

    pub fn is_aborted(&self) -> bool {
        self.node.signal.is_aborted()
    }

    /// The point in time when this context times out, if any.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.node.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.node
            .deadline
            .map(|deadline| (deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Number of ancestors above this context.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Derive a context that aborts when this one does or when the returned
    /// trigger is invoked.
    pub fn with_abort(&self) -> (Context, AbortTrigger) {
        let (signal, trigger) = self.node.signal.child();
        let ctx = self.derive(signal, self.node.deadline, Layer::Abort);
        (ctx, trigger)
    }

    /// Derive a context that aborts when this one does or once `timeout` has elapsed.
    ///
    /// The derived deadline is never later than this context's.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, since the timer runs on a
    /// spawned task.
    pub fn with_timeout(&self, timeout: Duration) -> Context {
        let own = TimeDelta::from_std(timeout)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta));
        let deadline = match (own, self.node.deadline) {
            (Some(own), Some(inherited)) => Some(own.min(inherited)),
            (own, inherited) => own.or(inherited),
        };

        debug!(
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            deadline = ?deadline,
            "Deriving context with timeout"
        );
        let signal = self.node.signal.child_with_timeout(timeout);
        self.derive(signal, deadline, Layer::Timeout)
    }

    /// Derive a context that can resolve only the given APIs.
    ///
    /// References are transferred from this context's APIs and must be present
    /// there. Factories are instantiated, with dependencies taken from the other
    /// factories or from this context's APIs.
    pub fn with_apis<I>(&self, items: I) -> Result<Context, ApiError>
    where
        I: IntoIterator,
        I::Item: Into<ApiItem>,
    {
        let items: Vec<ApiItem> = items.into_iter().map(Into::into).collect();
        let apis = resolver::resolve(&items, self.apis())?;
        Ok(self.derive_layer(Layer::Apis(Arc::new(apis))))
    }

    /// The nearest API set in the chain.
    fn apis(&self) -> Option<&ApiInstances> {
        self.ancestors().find_map(|ctx| match &ctx.node.layer {
            Layer::Apis(apis) => Some(apis.as_ref()),
            _ => None,
        })
    }

    /// Resolve an API reference into the instance registered in this context.
    pub fn api<T: Any + Send + Sync>(&self, api: &ApiRef<T>) -> Option<Arc<T>> {
        self.apis()?.get(api)
    }

    /// Derive a context with `key` bound to `value`.
    pub fn with_value<T: Any + Send + Sync>(&self, key: impl Into<ContextKey>, value: T) -> Context {
        self.derive_layer(Layer::Value {
            key: key.into(),
            value: Arc::new(value),
        })
    }

    /// Derive a context with `key` bound to the result of `update`, which
    /// receives the value currently visible for `key`.
    pub fn with_value_fn<T, F>(&self, key: impl Into<ContextKey>, update: F) -> Context
    where
        T: Any + Send + Sync,
        F: FnOnce(Option<Arc<T>>) -> T,
    {
        let key = key.into();
        let previous = self.typed_value::<T>(&key);
        self.with_value(key, update(previous))
    }

    /// Get the value bound to `key`. The nearest binding wins; a binding of
    /// another type yields `None`.
    pub fn value<T: Any + Send + Sync>(&self, key: impl Into<ContextKey>) -> Option<Arc<T>> {
        self.typed_value(&key.into())
    }

    fn typed_value<T: Any + Send + Sync>(&self, key: &ContextKey) -> Option<Arc<T>> {
        self.raw_value(key)
            .and_then(|value| value.clone().downcast::<T>().ok())
    }

    /// Get the untyped value bound to `key`.
    pub fn raw_value(&self, key: &ContextKey) -> Option<&ContextValue> {
        self.ancestors().find_map(|ctx| match &ctx.node.layer {
            Layer::Value { key: bound, value } if bound == key => Some(value),
            _ => None,
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("layer", &self.node.layer.kind())
            .field("depth", &self.depth())
            .field("deadline", &self.node.deadline)
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
