//! Sale line normalization: zero-amount filtering and GL code resolution.
//!
//! The intended call order is filter → [`scan_misses`] → register + persist
//! (if any misses) → [`resolve`]. After registration every lookup is
//! guaranteed to succeed; a miss in [`resolve`] is an internal
//! consistency error, not a recoverable condition.

use super::error::JournalError;
use super::registry::GlRegistry;
use super::types::{LineKind, Misses, ResolvedLine, SaleLine};

/// Drop every line whose amount is exactly zero.
///
/// The external reader already defaults missing amounts to zero, so this
/// single filter covers both "zero" and "absent".
pub fn drop_zero_amounts(lines: Vec<SaleLine>) -> Vec<SaleLine> {
    lines.into_iter().filter(|l| !l.amount.is_zero()).collect()
}

/// Collect the distinct item names and sites that have no registry entry.
pub fn scan_misses(lines: &[SaleLine], registry: &GlRegistry) -> Misses {
    let mut misses = Misses::default();
    for line in lines {
        if registry.lookup_account(&line.item_name).is_none() {
            misses.items.insert(line.item_name.clone());
        }
        if registry.lookup_site(&line.site).is_none() {
            misses.sites.insert(line.site.clone());
        }
    }
    misses
}

/// Resolve every line's account code and site id.
///
/// Callers must have registered all misses first; an unresolvable name
/// here means the registration contract was broken.
pub fn resolve(
    lines: &[SaleLine],
    registry: &GlRegistry,
) -> Result<Vec<ResolvedLine>, JournalError> {
    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        let entry = registry.lookup_account(&line.item_name).ok_or_else(|| {
            JournalError::InternalConsistency(format!(
                "item '{}' unresolved after registration",
                line.item_name
            ))
        })?;
        let site_id = registry.lookup_site(&line.site).ok_or_else(|| {
            JournalError::InternalConsistency(format!(
                "site '{}' unresolved after registration",
                line.site
            ))
        })?;
        resolved.push(ResolvedLine {
            item_name: line.item_name.clone(),
            site: line.site.clone(),
            end_date: line.end_date,
            amount: line.amount,
            account: entry.account.clone(),
            site_id: site_id.to_string(),
            flag: entry.flag.clone(),
            kind: LineKind::Original,
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::PLACEHOLDER_CODE;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> GlRegistry {
        let mut r = GlRegistry::new();
        r.insert_item("Coffee", Some("4000"), None);
        r.insert_site("Site A", Some("01"));
        r
    }

    #[test]
    fn zero_amounts_are_dropped() {
        let lines = vec![
            SaleLine::new("Coffee", "Site A", date(2024, 1, 1), dec!(10.00)),
            SaleLine::new("Coffee", "Site A", date(2024, 1, 1), dec!(0)),
            SaleLine::new("Coffee", "Site A", date(2024, 1, 1), dec!(0.00)),
        ];
        let kept = drop_zero_amounts(lines);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].amount, dec!(10.00));
    }

    #[test]
    fn scan_finds_distinct_misses() {
        let lines = vec![
            SaleLine::new("Gadget", "Site A", date(2024, 1, 1), dec!(5)),
            SaleLine::new("Gadget", "Site B", date(2024, 1, 1), dec!(5)),
            SaleLine::new("Coffee", "Site B", date(2024, 1, 1), dec!(5)),
        ];
        let misses = scan_misses(&lines, &registry());
        assert_eq!(misses.items.len(), 1);
        assert!(misses.items.contains("Gadget"));
        assert_eq!(misses.sites.len(), 1);
        assert!(misses.sites.contains("Site B"));
    }

    #[test]
    fn resolve_after_registration_uses_placeholder() {
        let lines = vec![SaleLine::new("Gadget", "Site A", date(2024, 1, 1), dec!(5))];
        let mut reg = registry();
        let misses = scan_misses(&lines, &reg);
        reg.register_missing_items(&misses.items);

        let resolved = resolve(&lines, &reg).unwrap();
        assert_eq!(resolved[0].account, PLACEHOLDER_CODE);
        assert_eq!(resolved[0].site_id, "01");
        assert_eq!(resolved[0].kind, LineKind::Original);
    }

    #[test]
    fn unregistered_miss_is_internal_error() {
        let lines = vec![SaleLine::new("Gadget", "Site A", date(2024, 1, 1), dec!(5))];
        let err = resolve(&lines, &registry()).unwrap_err();
        assert!(matches!(err, JournalError::InternalConsistency(_)));
    }
}
