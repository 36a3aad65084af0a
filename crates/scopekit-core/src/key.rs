//! Keys and values stored in context overlays.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// A value stored in a context overlay.
pub type ContextValue = Arc<dyn Any + Send + Sync>;

/// Key identifying a context value.
///
/// Names compare by string. Symbols compare by identity: two symbols created
/// with the same description remain distinct keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    Name(Cow<'static, str>),
    Symbol {
        id: Uuid,
        description: Cow<'static, str>,
    },
}

impl ContextKey {
    /// Create a unique symbol key.
    pub fn symbol(description: impl Into<Cow<'static, str>>) -> Self {
        ContextKey::Symbol {
            id: Uuid::new_v4(),
            description: description.into(),
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, ContextKey::Symbol { .. })
    }
}

impl fmt::Debug for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Name(name) => write!(f, "{name:?}"),
            ContextKey::Symbol { description, .. } => write!(f, "Symbol({description})"),
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Name(name) => f.write_str(name),
            ContextKey::Symbol { description, .. } => write!(f, "Symbol({description})"),
        }
    }
}

impl From<&'static str> for ContextKey {
    fn from(name: &'static str) -> Self {
        ContextKey::Name(Cow::Borrowed(name))
    }
}

impl From<String> for ContextKey {
    fn from(name: String) -> Self {
        ContextKey::Name(Cow::Owned(name))
    }
}

impl From<&ContextKey> for ContextKey {
    fn from(key: &ContextKey) -> Self {
        key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_compare_by_string() {
        let a: ContextKey = "tenant".into();
        let b: ContextKey = "tenant".to_string().into();
        assert_eq!(a, b);
        assert!(!a.is_symbol());
    }

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = ContextKey::symbol("request");
        let b = ContextKey::symbol("request");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(a.is_symbol());
    }

    #[test]
    fn test_symbol_never_equals_name() {
        let symbol = ContextKey::symbol("tenant");
        assert_ne!(symbol, ContextKey::from("tenant"));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ContextKey::from("tenant").to_string(), "tenant");
        assert_eq!(ContextKey::symbol("auth").to_string(), "Symbol(auth)");
    }
}
