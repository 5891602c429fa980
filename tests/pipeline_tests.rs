#![cfg(feature = "pipeline")]

use std::path::PathBuf;

use chrono::NaiveDate;
use gljournal::core::*;
use gljournal::journal::JournalConfig;
use gljournal::pipeline::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn registry() -> GlRegistry {
    let mut r = GlRegistry::new();
    r.insert_item("Coffee", Some("4000"), None);
    r.insert_item("Cash", Some("1000"), None);
    r.insert_item("B1G1 Promo", Some("2164"), None);
    r.insert_site("Site A", Some("01"));
    r
}

fn context() -> RunContext {
    RunContext::new(vec![PathBuf::from("1-5-24.xlsx")])
}

struct Harness {
    source: MemorySalesSource,
    store: MemoryRegistryStore,
    workbook: MemoryWorkbook,
    upload: MemoryUpload,
    diagnostics: MemoryDiagnostics,
}

impl Harness {
    fn new(lines: Vec<SaleLine>) -> Self {
        Self {
            source: MemorySalesSource::new(lines),
            store: MemoryRegistryStore::new(registry()),
            workbook: MemoryWorkbook::new(),
            upload: MemoryUpload::new(),
            diagnostics: MemoryDiagnostics::new(),
        }
    }

    fn run(&mut self) -> Result<RunOutcome, JournalError> {
        run_batch(
            &context(),
            &mut self.source,
            &mut self.store,
            &mut self.workbook,
            &mut self.upload,
            &mut self.diagnostics,
            &JournalConfig::default(),
            &DerivedPolicy::standard(),
        )
    }
}

#[test]
fn balanced_coffee_batch_runs_clean() {
    let mut h = Harness::new(vec![
        SaleLine::new("Coffee", "Site A", date(2024, 1, 1), dec!(10.00)),
        SaleLine::new("Coffee", "Site A", date(2024, 1, 1), dec!(-10.00)),
    ]);
    let outcome = h.run().unwrap();

    assert!(outcome.emitted);
    assert_eq!(outcome.record_count, 2);
    assert_eq!(outcome.dates, vec![date(2024, 1, 1)]);
    assert!(outcome.mismatches.is_empty());
    assert!(h.diagnostics.diagnostics.is_empty());
    assert!(h.store.persisted.is_empty());

    assert_eq!(h.workbook.sheets.len(), 1);
    let records = &h.workbook.sheets[0].1;
    assert_eq!(records[0].debit, dec!(10.00));
    assert_eq!(records[1].credit, dec!(10.00));
    assert!(h.upload.content.unwrap().contains("\"01-4000.000\""));
}

#[test]
fn unmapped_item_registers_and_persists_before_output() {
    let mut h = Harness::new(vec![
        SaleLine::new("Gadget", "Site A", date(2024, 1, 5), dec!(4.00)),
        SaleLine::new("Cash", "Site A", date(2024, 1, 5), dec!(-4.00)),
    ]);
    let outcome = h.run().unwrap();

    assert_eq!(outcome.registered_items, vec!["Gadget".to_string()]);
    assert!(outcome.registered_sites.is_empty());

    // Exactly one persist, carrying the placeholder row.
    assert_eq!(h.store.persisted.len(), 1);
    let (items, _sites) = &h.store.persisted[0];
    let gadget = items.iter().find(|r| r.item_name == "Gadget").unwrap();
    assert_eq!(gadget.account.as_deref(), Some("-"));

    // Diagnostic lists the new item; the record shows the incomplete account.
    assert_eq!(h.diagnostics.diagnostics.len(), 1);
    assert!(h.diagnostics.diagnostics[0].to_string().contains("Gadget"));
    let records = &h.workbook.sheets[0].1;
    let gadget_record = records.iter().find(|r| r.description == "Gadget").unwrap();
    assert_eq!(gadget_record.account, "01-.000");
}

#[test]
fn b1g1_subtotal_appends_pair_and_stays_reconciled() {
    let mut h = Harness::new(vec![
        SaleLine::new("B1G1 Promo", "Site A", date(2024, 1, 5), dec!(15.00)),
        SaleLine::new("Cash", "Site A", date(2024, 1, 5), dec!(-15.00)),
    ]);
    let outcome = h.run().unwrap();

    assert!(outcome.mismatches.is_empty());
    assert!(h.diagnostics.diagnostics.is_empty());

    let records = &h.workbook.sheets[0].1;
    assert_eq!(records.len(), 4);
    assert_eq!(records[2].description, "GSR B1G1 Sold");
    assert_eq!(records[2].account, "01-2164.000");
    assert_eq!(records[2].debit, dec!(15.00));
    assert_eq!(records[3].description, "GSR B1G1 Sold Dscnt");
    assert_eq!(records[3].credit, dec!(15.00));
}

#[test]
fn two_sites_suppress_emission_and_leave_artifact() {
    let mut h = Harness::new(vec![
        SaleLine::new("Coffee", "Site A", date(2024, 1, 5), dec!(5.00)),
        SaleLine::new("Coffee", "Site B", date(2024, 1, 5), dec!(-5.00)),
    ]);
    let outcome = h.run().unwrap();

    assert!(!outcome.emitted);
    assert_eq!(outcome.record_count, 0);
    assert!(h.workbook.sheets.is_empty());
    assert!(h.workbook.summary.is_none());
    assert!(h.upload.content.is_none());

    let names = h.diagnostics.artifact_names();
    assert!(names.iter().any(|n| n.contains("multiple sites")));
}

#[test]
fn mismatch_is_reported_but_run_completes() {
    let mut h = Harness::new(vec![
        SaleLine::new("Coffee", "Site A", date(2024, 1, 5), dec!(10.00)),
        SaleLine::new("Cash", "Site A", date(2024, 1, 5), dec!(-9.75)),
        SaleLine::new("Coffee", "Site A", date(2024, 1, 6), dec!(2.00)),
        SaleLine::new("Cash", "Site A", date(2024, 1, 6), dec!(-2.00)),
    ]);
    let outcome = h.run().unwrap();

    assert!(outcome.emitted);
    assert_eq!(outcome.mismatches.len(), 1);
    assert_eq!(outcome.mismatches[0].residual, dec!(0.25));
    assert_eq!(h.workbook.sheets.len(), 2);

    let names = h.diagnostics.artifact_names();
    assert_eq!(names.len(), 1);
    assert!(!names[0].contains('/'));
    assert!(names[0].contains("off by $0.25"));
}

#[test]
fn zero_candidates_abort_before_reading() {
    let mut h = Harness::new(vec![SaleLine::new(
        "Coffee",
        "Site A",
        date(2024, 1, 5),
        dec!(1),
    )]);
    let err = run_batch(
        &RunContext::new(Vec::new()),
        &mut h.source,
        &mut h.store,
        &mut h.workbook,
        &mut h.upload,
        &mut h.diagnostics,
        &JournalConfig::default(),
        &DerivedPolicy::standard(),
    )
    .unwrap_err();
    assert!(matches!(err, JournalError::AmbiguousInput { found: 0 }));
    assert!(h.workbook.sheets.is_empty());
}

#[test]
fn multiple_candidates_abort_before_reading() {
    let ctx = RunContext::new(vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]);
    assert!(matches!(
        ctx.require_single_input(),
        Err(JournalError::AmbiguousInput { found: 2 })
    ));
}

#[test]
fn fs_sink_writes_one_artifact_per_distinct_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FsDiagnosticSink::new(dir.path());

    let mismatch = Diagnostic::ReconciliationMismatch {
        date: date(2024, 1, 5),
        residual: dec!(0.25),
    };
    sink.report(&mismatch);
    sink.report(&mismatch);

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name();
    let name = name.to_string_lossy();
    assert!(!name.contains('/'));
    assert!(name.starts_with("1-5-24 is off by $0.25"));
}

#[test]
fn run_registers_missing_site_with_placeholder() {
    let mut h = Harness::new(vec![
        SaleLine::new("Coffee", "Site C", date(2024, 1, 5), dec!(3.00)),
        SaleLine::new("Cash", "Site C", date(2024, 1, 5), dec!(-3.00)),
    ]);
    let outcome = h.run().unwrap();

    assert_eq!(outcome.registered_sites, vec!["Site C".to_string()]);
    let records = &h.workbook.sheets[0].1;
    assert!(records.iter().all(|r| r.account.starts_with("-")));
}
