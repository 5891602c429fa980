//! Reconciliation checks: per-date zero-sum verification and the
//! single-site batch precondition.
//!
//! Violations are reported, never fatal; callers surface them as
//! diagnostics and continue with the remaining dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::derive::group_by_date;
use super::types::ResolvedLine;

/// A date whose combined lines do not net to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCheck {
    pub date: NaiveDate,
    /// Signed residual after 2-decimal rounding; never zero.
    pub residual: Decimal,
}

/// Sum every date's lines (original + derived) and report the dates whose
/// total does not round to zero.
pub fn check_dates(lines: &[ResolvedLine]) -> Vec<DateCheck> {
    let mut mismatches = Vec::new();
    for (date, group) in group_by_date(lines) {
        let residual = group
            .iter()
            .map(|line| line.amount)
            .sum::<Decimal>()
            .round_dp(2);
        if !residual.is_zero() {
            mismatches.push(DateCheck { date, residual });
        }
    }
    mismatches
}

/// The distinct raw site names present in a batch.
pub fn distinct_sites(lines: &[ResolvedLine]) -> BTreeSet<String> {
    lines.iter().map(|line| line.site.clone()).collect()
}

/// A batch must belong to exactly one site. More than one distinct site
/// is reported with the full offending set; an empty batch passes.
pub fn check_single_site(lines: &[ResolvedLine]) -> Result<(), Vec<String>> {
    let sites = distinct_sites(lines);
    if sites.len() > 1 {
        Err(sites.into_iter().collect())
    } else {
        Ok(())
    }
}
