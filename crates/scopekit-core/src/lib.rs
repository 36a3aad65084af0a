//! # scopekit Core
//!
//! Scoped context propagation and API resolution.
//!
//! ## Components
//!
//! - [`AbortSignal`] - One-shot cancellation broadcast with listener and future views
//! - [`resolve`] - Orders and runs API factories, transferring instances from a previous set
//! - [`Context`] - Immutable chain of context nodes carrying cancellation, deadline,
//!   APIs and values

pub mod abort;
pub mod context;
pub mod key;
pub mod resolver;

pub use abort::{AbortSignal, AbortTrigger};
pub use context::Context;
pub use key::{ContextKey, ContextValue};
pub use resolver::{plan, resolve, ResolutionPlan};

pub use scopekit_protocols::{
    AnyApiRef, ApiDeps, ApiError, ApiFactory, ApiInstance, ApiInstances, ApiItem, ApiRef,
};
