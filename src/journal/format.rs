//! Mapping of resolved and derived lines into the canonical upload record
//! shape: one row per line, debit/credit split, fixed journal metadata.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{group_by_date, PLACEHOLDER_CODE, ResolvedLine};

use super::config::{JournalConfig, SignConvention};

/// One row of the journal upload.
///
/// The serde names are the exact upload column headers. For any nonzero
/// amount exactly one of `debit`/`credit` is nonzero and equals the
/// amount's absolute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Fixed record type, always "GLT".
    #[serde(rename = "RECORD")]
    pub record: String,
    /// `{site_id}-{account}.000`; placeholders render as empty segments.
    #[serde(rename = "ACCOUNT")]
    pub account: String,
    /// Accounting date as unpadded M/D/YY.
    #[serde(rename = "ACCNTG DATE")]
    pub accounting_date: String,
    #[serde(rename = "JOURNAL")]
    pub journal: u8,
    #[serde(rename = "REF 1")]
    pub ref1: String,
    #[serde(rename = "REF 2")]
    pub ref2: String,
    /// Item name truncated to the configured limit.
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
    #[serde(rename = "DEBIT")]
    pub debit: Decimal,
    #[serde(rename = "CREDIT")]
    pub credit: Decimal,
    #[serde(rename = "ACCRUAL OR CASH")]
    pub accrual_or_cash: u8,
}

/// Fixed RECORD column value.
pub const RECORD_TYPE: &str = "GLT";

/// Compute the upload ACCOUNT field from a site id and account code.
///
/// The registry placeholder renders as an empty segment, so a freshly
/// registered item under site "01" yields `01-.000` — visibly incomplete
/// in the upload, which is the point.
pub fn account_field(site_id: &str, account: &str) -> String {
    let site = if site_id == PLACEHOLDER_CODE { "" } else { site_id };
    let code = if account == PLACEHOLDER_CODE { "" } else { account };
    format!("{site}-{code}.000")
}

/// Render an accounting date as unpadded M/D/YY, e.g. `1/5/24`.
pub fn accounting_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// Map one resolved or derived line to an upload record.
pub fn to_record(line: &ResolvedLine, config: &JournalConfig) -> JournalRecord {
    let (debit, credit) = split_amount(line.amount, config.sign_convention);
    JournalRecord {
        record: RECORD_TYPE.to_string(),
        account: account_field(&line.site_id, &line.account),
        accounting_date: accounting_date(line.end_date),
        journal: config.journal_code,
        ref1: String::new(),
        ref2: String::new(),
        description: truncate_chars(&line.item_name, config.description_limit),
        debit,
        credit,
        accrual_or_cash: config.accrual_or_cash,
    }
}

/// Map a line batch to upload records, preserving input order.
pub fn to_records(lines: &[ResolvedLine], config: &JournalConfig) -> Vec<JournalRecord> {
    lines.iter().map(|line| to_record(line, config)).collect()
}

/// Group a line batch into per-date sheets of upload records.
///
/// Within a date the input order is preserved, so a batch built as
/// originals-then-derived keeps derived rows after the originals.
pub fn to_sheets(
    lines: &[ResolvedLine],
    config: &JournalConfig,
) -> Vec<(NaiveDate, Vec<JournalRecord>)> {
    group_by_date(lines)
        .into_iter()
        .map(|(date, group)| {
            let records = group
                .into_iter()
                .map(|line| to_record(line, config))
                .collect();
            (date, records)
        })
        .collect()
}

fn split_amount(amount: Decimal, convention: SignConvention) -> (Decimal, Decimal) {
    let positive_is_debit = matches!(convention, SignConvention::DebitPositive);
    if amount.is_sign_positive() == positive_is_debit {
        (amount.abs(), Decimal::ZERO)
    } else {
        (Decimal::ZERO, amount.abs())
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn account_field_joins_site_and_code() {
        assert_eq!(account_field("01", "4000"), "01-4000.000");
    }

    #[test]
    fn placeholder_renders_empty() {
        assert_eq!(account_field("01", "-"), "01-.000");
        assert_eq!(account_field("-", "4000"), "-4000.000");
    }

    #[test]
    fn accounting_date_is_unpadded() {
        assert_eq!(
            accounting_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            "1/5/24"
        );
        assert_eq!(
            accounting_date(NaiveDate::from_ymd_opt(2024, 11, 25).unwrap()),
            "11/25/24"
        );
    }

    #[test]
    fn debit_positive_splits() {
        assert_eq!(
            split_amount(dec!(10.00), SignConvention::DebitPositive),
            (dec!(10.00), dec!(0))
        );
        assert_eq!(
            split_amount(dec!(-10.00), SignConvention::DebitPositive),
            (dec!(0), dec!(10.00))
        );
    }

    #[test]
    fn credit_positive_flips() {
        assert_eq!(
            split_amount(dec!(10.00), SignConvention::CreditPositive),
            (dec!(0), dec!(10.00))
        );
        assert_eq!(
            split_amount(dec!(-10.00), SignConvention::CreditPositive),
            (dec!(10.00), dec!(0))
        );
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_chars("Café Crème Grande Deluxe Special Blend", 30).chars().count(), 30);
        assert_eq!(truncate_chars("short", 30), "short");
    }
}
