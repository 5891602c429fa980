//! Account-level summary: batch totals grouped by computed account
//! field, with one designated account broken out by item description.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::ResolvedLine;

use super::config::JournalConfig;
use super::format::account_field;

/// One summary sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Computed account string, or the item description for the
    /// designated by-description account.
    pub key: String,
    /// Signed batch total for the key.
    pub total: Decimal,
}

/// Sum amounts over the batch grouped by computed account.
///
/// Lines on the configured by-description account are keyed by their item
/// description instead, so sundry postings stay distinguishable in review.
pub fn summarize(lines: &[ResolvedLine], config: &JournalConfig) -> Vec<SummaryRow> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for line in lines {
        let key = if line.account == config.summary_by_description_account {
            line.item_name.clone()
        } else {
            account_field(&line.site_id, &line.account)
        };
        *totals.entry(key).or_default() += line.amount;
    }
    totals
        .into_iter()
        .map(|(key, total)| SummaryRow {
            key,
            total: total.round_dp(2),
        })
        .collect()
}
