//! API resolution errors.

use thiserror::Error;

/// Errors raised while resolving or producing API instances.
///
/// Every variant is fatal to the resolution that raised it: no partial instance
/// set is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A bare reference named an API the parent set does not hold.
    #[error("The desired API {0} did not exist in the parent context")]
    MissingParentInstance(String),

    /// A factory transitively depends on itself.
    #[error("Circular API dependencies: {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    /// A dependency is neither declared by another factory nor present upstream.
    #[error("Could not resolve API dependency in chain, {}", .path.join(" -> "))]
    UnresolvedDependency { path: Vec<String> },

    #[error("API {api} asked for undeclared dependency {name}")]
    UndeclaredDependency { api: String, name: String },

    #[error("Dependency {name} of API {api} is not of type {expected}")]
    DependencyTypeMismatch {
        api: String,
        name: String,
        expected: &'static str,
    },

    #[error("Failed to produce API {api}: {message}")]
    FactoryFailed { api: String, message: String },
}

impl ApiError {
    /// Wrap an arbitrary failure raised while producing `api`.
    pub fn factory_failed(api: impl Into<String>, message: impl ToString) -> Self {
        ApiError::FactoryFailed {
            api: api.into(),
            message: message.to_string(),
        }
    }

    /// The dependency path attached to ordering errors.
    pub fn path(&self) -> Option<&[String]> {
        match self {
            ApiError::CircularDependency { path } | ApiError::UnresolvedDependency { path } => {
                Some(path)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_missing_parent_instance_error() {
        let err = ApiError::MissingParentInstance("logger".to_string());
        assert_eq!(
            err.to_string(),
            "The desired API logger did not exist in the parent context"
        );
    }

    #[test]
    fn test_circular_dependency_error() {
        let err = ApiError::CircularDependency {
            path: path(&["a", "b", "a"]),
        };
        assert_eq!(err.to_string(), "Circular API dependencies: a -> b -> a");
        assert_eq!(err.path().map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_unresolved_dependency_error() {
        let err = ApiError::UnresolvedDependency {
            path: path(&["c", "missing"]),
        };
        assert_eq!(
            err.to_string(),
            "Could not resolve API dependency in chain, c -> missing"
        );
    }

    #[test]
    fn test_undeclared_dependency_error() {
        let err = ApiError::UndeclaredDependency {
            api: "db".to_string(),
            name: "log".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("db"));
        assert!(display.contains("log"));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = ApiError::DependencyTypeMismatch {
            api: "db".to_string(),
            name: "log".to_string(),
            expected: "u32",
        };
        assert!(err.to_string().contains("u32"));
    }

    #[test]
    fn test_factory_failed_error() {
        let err = ApiError::factory_failed("db", "connection refused");
        assert_eq!(err.to_string(), "Failed to produce API db: connection refused");
    }

    #[test]
    fn test_error_debug() {
        let err = ApiError::MissingParentInstance("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("MissingParentInstance"));
    }
}
