//! End-to-end batch run: normalize → register → derive → reconcile →
//! format → emit.
//!
//! All working state is explicit in [`RunContext`] and the port
//! arguments; nothing reads the process environment or current
//! directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::core::{
    DateCheck, DerivedPolicy, JournalError, check_dates, check_single_site, derive_all,
    drop_zero_amounts, resolve, scan_misses,
};
use crate::journal::{JournalConfig, summarize, to_sheets, upload::to_upload_csv};

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::ports::{RegistryStore, SalesSource, UploadSink, WorkbookSink};

/// Explicit run state: the candidate input set discovered by the caller
/// plus the locations the ports operate on (informational here).
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Candidate sales inputs for this batch. Must be exactly one.
    pub candidates: Vec<PathBuf>,
    /// Where the registry store reads/writes, when file-backed.
    pub registry_path: Option<PathBuf>,
    /// Where the workbook/upload/artifact writers emit, when file-backed.
    pub output_dir: Option<PathBuf>,
}

impl RunContext {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    /// The single candidate input, or the fatal ambiguity error.
    ///
    /// Checked before any state is touched; zero candidates and multiple
    /// candidates abort identically.
    pub fn require_single_input(&self) -> Result<&Path, JournalError> {
        match self.candidates.as_slice() {
            [one] => Ok(one.as_path()),
            other => Err(JournalError::AmbiguousInput { found: other.len() }),
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The input that was processed.
    pub input: PathBuf,
    /// Accounting dates present in the batch, ascending.
    pub dates: Vec<NaiveDate>,
    /// Upload records emitted (zero when emission was suppressed).
    pub record_count: usize,
    /// Item names auto-registered this run.
    pub registered_items: Vec<String>,
    /// Site names auto-registered this run.
    pub registered_sites: Vec<String>,
    /// Dates that failed reconciliation.
    pub mismatches: Vec<DateCheck>,
    /// False when the ambiguous-site check suppressed workbook/upload
    /// emission.
    pub emitted: bool,
}

/// Process one sales batch end to end.
///
/// Recoverable conditions go to `diagnostics` and the run continues; the
/// returned error cases are the fatal taxonomy of [`JournalError`].
#[allow(clippy::too_many_arguments)]
pub fn run_batch(
    ctx: &RunContext,
    source: &mut dyn SalesSource,
    store: &mut dyn RegistryStore,
    workbook: &mut dyn WorkbookSink,
    upload: &mut dyn UploadSink,
    diagnostics: &mut dyn DiagnosticSink,
    config: &JournalConfig,
    policy: &DerivedPolicy,
) -> Result<RunOutcome, JournalError> {
    let input = ctx.require_single_input()?.to_path_buf();

    let raw = source.read()?;
    let lines = drop_zero_amounts(raw);

    let mut registry = store.load()?;

    let misses = scan_misses(&lines, &registry);
    let mut registered_items = Vec::new();
    let mut registered_sites = Vec::new();
    if !misses.is_empty() {
        registered_items = registry.register_missing_items(&misses.items);
        registered_sites = registry.register_missing_sites(&misses.sites);
        // Registry must hit the store before normalization proceeds.
        store.persist(&registry)?;
        registry.mark_clean();
        tracing::info!(
            items = registered_items.len(),
            sites = registered_sites.len(),
            "registered placeholder GL codes"
        );
        diagnostics.report(&Diagnostic::MissingCodes {
            date: lines.iter().map(|l| l.end_date).min(),
            items: registered_items.clone(),
            sites: registered_sites.clone(),
        });
    }

    let resolved = resolve(&lines, &registry)?;

    let single_site = match check_single_site(&resolved) {
        Ok(()) => true,
        Err(sites) => {
            diagnostics.report(&Diagnostic::AmbiguousSiteSet { sites });
            false
        }
    };

    let mut combined = resolved;
    let derived = derive_all(&combined, policy);
    combined.extend(derived);

    let mismatches = check_dates(&combined);
    for mismatch in &mismatches {
        tracing::warn!(date = %mismatch.date, residual = %mismatch.residual, "reconciliation mismatch");
        diagnostics.report(&Diagnostic::ReconciliationMismatch {
            date: mismatch.date,
            residual: mismatch.residual,
        });
    }

    let sheets = to_sheets(&combined, config);
    let dates: Vec<NaiveDate> = sheets.iter().map(|(date, _)| *date).collect();

    let mut record_count = 0;
    if single_site {
        for (date, records) in &sheets {
            workbook.write_sheet(*date, records)?;
            record_count += records.len();
        }
        workbook.write_summary(&summarize(&combined, config))?;
        upload.write_upload(&to_upload_csv(&sheets))?;
    }

    Ok(RunOutcome {
        input,
        dates,
        record_count,
        registered_items,
        registered_sites,
        mismatches,
        emitted: single_site,
    })
}
