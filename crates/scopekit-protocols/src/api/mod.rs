//! API protocol definitions.
//!
//! An API is an opaque instance identified by a stable id. References name the
//! slot, factories describe how to fill it.

mod reference;
mod factory;
mod instances;

pub use reference::*;
pub use factory::*;
pub use instances::*;
