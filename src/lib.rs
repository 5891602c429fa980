//! # gljournal
//!
//! Converts a point-of-sale sales export into a general-ledger journal
//! upload: GL code resolution via a persistent registry (with
//! auto-registration of unmapped codes), policy-driven derived balancing
//! entries, per-date zero-sum reconciliation, and the flat upload format.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Spreadsheet and file-discovery concerns stay outside the crate; the
//! [`pipeline`] module talks to them through ports.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gljournal::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut registry = GlRegistry::new();
//! registry.insert_item("Coffee", Some("4000"), None);
//! registry.insert_site("Site A", Some("01"));
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let lines = vec![
//!     SaleLine::new("Coffee", "Site A", day, dec!(10.00)),
//!     SaleLine::new("Coffee", "Site A", day, dec!(-10.00)),
//! ];
//!
//! let resolved = resolve(&lines, &registry).unwrap();
//! assert!(check_dates(&resolved).is_empty()); // the day nets to zero
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Registry, normalizer, derived-entry policy, reconciliation |
//! | `journal` | Upload-record formatting, account summary, flat upload CSV |
//! | `pipeline` | Batch orchestration, ports, diagnostic artifacts |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "journal")]
pub mod journal;

#[cfg(feature = "pipeline")]
pub mod pipeline;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
