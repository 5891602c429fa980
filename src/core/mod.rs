//! Core journal-derivation engine: domain types, GL code registry,
//! line normalization, derived-entry policy, and reconciliation.
//!
//! Everything here is pure and synchronous; persistence and output
//! surfaces live behind the [`crate::pipeline`] ports.

mod derive;
mod error;
mod normalize;
mod policy;
mod reconcile;
mod registry;
mod types;

pub use derive::*;
pub use error::*;
pub use normalize::*;
pub use policy::*;
pub use reconcile::*;
pub use registry::*;
pub use types::*;
