//! Derived entry generation: applies the [`DerivedPolicy`] to each date
//! group of resolved lines and synthesizes the balancing entries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::policy::{DerivedPolicy, DerivedRule};
use super::types::{LineKind, ResolvedLine};

/// Group lines by accounting date. Grouping is always keyed explicitly;
/// row position is never load-bearing.
pub fn group_by_date(lines: &[ResolvedLine]) -> BTreeMap<NaiveDate, Vec<&ResolvedLine>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&ResolvedLine>> = BTreeMap::new();
    for line in lines {
        groups.entry(line.end_date).or_default().push(line);
    }
    groups
}

/// Apply every policy rule to one date group, in policy order.
pub fn apply_policy(policy: &DerivedPolicy, group: &[&ResolvedLine]) -> Vec<ResolvedLine> {
    let mut derived = Vec::new();
    for rule in &policy.rules {
        derived.extend(apply_rule(rule, group));
    }
    derived
}

/// Generate all derived lines for a resolved batch, in date order.
///
/// Appending the result to the original vector keeps derived lines after
/// all original lines of their date once rows are regrouped per sheet.
pub fn derive_all(lines: &[ResolvedLine], policy: &DerivedPolicy) -> Vec<ResolvedLine> {
    let mut derived = Vec::new();
    for group in group_by_date(lines).values() {
        derived.extend(apply_policy(policy, group));
    }
    derived
}

fn apply_rule(rule: &DerivedRule, group: &[&ResolvedLine]) -> Vec<ResolvedLine> {
    let matched: Vec<&&ResolvedLine> = group
        .iter()
        .filter(|line| rule.trigger.matches(line))
        .collect();
    let Some(first) = matched.first() else {
        return Vec::new();
    };

    let sum = matched
        .iter()
        .map(|line| line.amount)
        .sum::<rust_decimal::Decimal>()
        .round_dp(2);
    if sum.is_zero() {
        return Vec::new();
    }

    // Derived lines carry the date and site of their source group.
    let template = |account: &str, description: &str, amount| ResolvedLine {
        item_name: description.to_string(),
        site: first.site.clone(),
        end_date: first.end_date,
        amount,
        account: account.to_string(),
        site_id: first.site_id.clone(),
        flag: None,
        kind: LineKind::Derived,
    };

    let mut lines = Vec::with_capacity(rule.legs.len() + 1);
    let mut booked = rust_decimal::Decimal::ZERO;
    for leg in &rule.legs {
        let amount = (sum * leg.factor).round_dp(2);
        booked += amount;
        lines.push(template(&leg.account, &leg.description, amount));
    }
    // Balancing leg absorbs rounding so the rule nets to exactly zero.
    lines.push(template(&rule.balancing.account, &rule.balancing.description, -booked));
    lines
}
