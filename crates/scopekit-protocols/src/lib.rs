//! # scopekit Protocols
//!
//! Data definitions shared by the scopekit context chain and API resolver.
//! Contains only types and accessors - resolution and propagation live in
//! `scopekit-core`.
//!
//! ## Core Types
//!
//! - [`ApiRef`] - Typed reference naming an API slot
//! - [`ApiFactory`] - Declares how an API instance is produced from its dependencies
//! - [`ApiItem`] - Either a reference to transfer or a factory to run
//! - [`ApiInstances`] - A resolved set of API instances keyed by id

pub mod api;
pub mod error;

pub use api::{
    AnyApiRef, ApiDeps, ApiFactory, ApiFactoryBuilder, ApiInstance, ApiInstances, ApiItem, ApiRef,
};
pub use error::ApiError;
