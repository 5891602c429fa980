//! Flat upload file generation.
//!
//! Concatenates all dated sheets (the summary sheet is never included)
//! into one comma-separated row set with a single header line, CRLF line
//! endings, and quoted text fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::format::JournalRecord;

/// The upload column headers, in order.
pub const UPLOAD_COLUMNS: [&str; 10] = [
    "RECORD",
    "ACCOUNT",
    "ACCNTG DATE",
    "JOURNAL",
    "REF 1",
    "REF 2",
    "DESCRIPTION",
    "DEBIT",
    "CREDIT",
    "ACCRUAL OR CASH",
];

/// Render the flat upload content from per-date sheets, in sheet order.
pub fn to_upload_csv(sheets: &[(NaiveDate, Vec<JournalRecord>)]) -> String {
    let mut out = String::new();

    for (i, column) in UPLOAD_COLUMNS.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(column);
    }
    out.push_str("\r\n");

    for (_date, records) in sheets {
        for record in records {
            write_row(&mut out, record);
        }
    }
    out
}

fn write_row(out: &mut String, record: &JournalRecord) {
    csv_field_str(out, &record.record);
    out.push(',');
    csv_field_str(out, &record.account);
    out.push(',');
    csv_field_str(out, &record.accounting_date);
    out.push(',');
    out.push_str(&record.journal.to_string());
    out.push(',');
    csv_field_str(out, &record.ref1);
    out.push(',');
    csv_field_str(out, &record.ref2);
    out.push(',');
    csv_field_str(out, &record.description);
    out.push(',');
    csv_field_amount(out, record.debit);
    out.push(',');
    csv_field_amount(out, record.credit);
    out.push(',');
    out.push_str(&record.accrual_or_cash.to_string());
    out.push_str("\r\n");
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn csv_field_amount(out: &mut String, amount: Decimal) {
    out.push_str(&format!("{:.2}", amount.round_dp(2)));
}
