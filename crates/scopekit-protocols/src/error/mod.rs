//! Error types for the scopekit protocol layer.

mod api;

pub use api::*;
