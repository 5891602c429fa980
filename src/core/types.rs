use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel code for registry keys registered without a real GL code yet.
///
/// Newly auto-registered items and sites carry this value until an
/// operator fills in the real code in the persisted registry.
pub const PLACEHOLDER_CODE: &str = "-";

/// A raw point-of-sale export row.
///
/// Immutable once read. A negative amount is a refund, positive a sale;
/// the external reader defaults a missing amount to zero, and zero-amount
/// lines are dropped before any further processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Item description exactly as it appears in the export.
    pub item_name: String,
    /// Site name exactly as it appears in the export.
    pub site: String,
    /// Accounting date of the sale.
    pub end_date: NaiveDate,
    /// Signed sale amount.
    pub amount: Decimal,
}

impl SaleLine {
    pub fn new(
        item_name: impl Into<String>,
        site: impl Into<String>,
        end_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            site: site.into(),
            end_date,
            amount,
        }
    }
}

/// Whether a line came from the sales export or was synthesized by a
/// derived-entry rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Read from the sales export.
    Original,
    /// Generated by a [`DerivedRule`](crate::core::DerivedRule).
    Derived,
}

/// A sale line with its GL account code and site id resolved.
///
/// After normalization `account` and `site_id` are always present, though
/// either may be the [`PLACEHOLDER_CODE`] for freshly registered keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLine {
    /// Item description (also the journal line description, truncated later).
    pub item_name: String,
    /// Raw site name from the export.
    pub site: String,
    /// Accounting date.
    pub end_date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// GL account code, possibly [`PLACEHOLDER_CODE`].
    pub account: String,
    /// Site id, possibly [`PLACEHOLDER_CODE`].
    pub site_id: String,
    /// PWC cost-recovery flag carried from the item registry entry.
    pub flag: Option<String>,
    /// Origin of the line.
    pub kind: LineKind,
}

/// Distinct unresolvable names found by a miss scan over a batch.
///
/// Ordered sets so registration and diagnostics are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Misses {
    /// Item names with no registry entry.
    pub items: BTreeSet<String>,
    /// Site names with no registry entry.
    pub sites: BTreeSet<String>,
}

impl Misses {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.sites.is_empty()
    }
}
