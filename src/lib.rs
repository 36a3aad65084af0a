//! # scopekit
//!
//! Scoped context propagation with cancellation, deadlines, typed values and
//! dependency-resolved API instances.
//!
//! This crate re-exports the member crates and adds the pieces an application
//! needs at startup: a root context built from configuration and tracing setup.

pub mod bootstrap;
pub mod graph;
pub mod logging;

pub use scopekit_config as config;
pub use scopekit_protocols as protocols;
pub use scopekit_core::{
    AbortSignal, AbortTrigger, AnyApiRef, ApiDeps, ApiError, ApiFactory, ApiInstance,
    ApiInstances, ApiItem, ApiRef, Context, ContextKey, ContextValue, ResolutionPlan, plan,
    resolve,
};
