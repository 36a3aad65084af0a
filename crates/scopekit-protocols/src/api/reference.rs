//! API references.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed reference to an API slot.
///
/// The type parameter only drives static typing of lookups; two references are
/// the same API if and only if their ids match.
pub struct ApiRef<T> {
    id: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ApiRef<T> {
    /// Create a reference with a static id, usable in `static` declarations.
    pub const fn new(id: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
            _marker: PhantomData,
        }
    }

    /// Create a reference with a runtime id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Drop the type tag.
    pub fn erase(&self) -> AnyApiRef {
        AnyApiRef {
            id: self.id.clone(),
        }
    }
}

impl<T> Clone for ApiRef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ApiRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRef").field("id", &self.id).finish()
    }
}

impl<T> PartialEq for ApiRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ApiRef<T> {}

impl<T> Hash for ApiRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Type-erased API reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnyApiRef {
    id: Cow<'static, str>,
}

impl AnyApiRef {
    pub const fn new(id: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for AnyApiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl<T> From<&ApiRef<T>> for AnyApiRef {
    fn from(api: &ApiRef<T>) -> Self {
        api.erase()
    }
}

impl<T> From<ApiRef<T>> for AnyApiRef {
    fn from(api: ApiRef<T>) -> Self {
        Self { id: api.id }
    }
}

impl From<&AnyApiRef> for AnyApiRef {
    fn from(api: &AnyApiRef) -> Self {
        api.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COUNTER: ApiRef<u32> = ApiRef::new("core.counter");

    #[test]
    fn test_static_ref() {
        assert_eq!(COUNTER.id(), "core.counter");
    }

    #[test]
    fn test_refs_equal_by_id() {
        let a: ApiRef<u32> = ApiRef::with_id("core.counter");
        assert_eq!(a, COUNTER);
        assert_ne!(a, ApiRef::new("core.other"));
    }

    #[test]
    fn test_erase_keeps_id() {
        let erased = COUNTER.erase();
        assert_eq!(erased.id(), "core.counter");
        assert_eq!(erased, AnyApiRef::new("core.counter"));
        assert_eq!(AnyApiRef::from(COUNTER.clone()), erased);
    }

    #[test]
    fn test_any_ref_display() {
        assert_eq!(AnyApiRef::with_id("a.b").to_string(), "a.b");
    }

    #[test]
    fn test_any_ref_serializes_as_string() {
        let json = serde_json::to_string(&AnyApiRef::new("logger")).unwrap();
        assert_eq!(json, "\"logger\"");

        let parsed: AnyApiRef = serde_json::from_str("\"db\"").unwrap();
        assert_eq!(parsed.id(), "db");
    }

    #[test]
    fn test_ref_debug() {
        let debug = format!("{:?}", COUNTER);
        assert!(debug.contains("core.counter"));
    }
}
