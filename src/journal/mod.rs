//! Journal upload formatting: the canonical upload record shape,
//! account-level summary, and the flat upload CSV.

mod config;
mod format;
mod summary;
pub mod upload;

pub use config::*;
pub use format::*;
pub use summary::*;
