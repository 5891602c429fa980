//! In-memory port implementations, for tests and for embedding the run
//! behind custom I/O.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::core::{GlRegistry, ItemRow, JournalError, SaleLine, SiteRow};
use crate::journal::{JournalRecord, SummaryRow};

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::ports::{RegistryStore, SalesSource, UploadSink, WorkbookSink};

/// Sales source backed by a vector.
#[derive(Debug, Default)]
pub struct MemorySalesSource {
    lines: Vec<SaleLine>,
}

impl MemorySalesSource {
    pub fn new(lines: Vec<SaleLine>) -> Self {
        Self { lines }
    }
}

impl SalesSource for MemorySalesSource {
    fn read(&mut self) -> Result<Vec<SaleLine>, JournalError> {
        Ok(self.lines.clone())
    }
}

/// Registry store backed by an owned registry; remembers every persisted
/// snapshot so tests can assert on what would have hit disk.
#[derive(Debug, Default)]
pub struct MemoryRegistryStore {
    registry: GlRegistry,
    /// Row snapshots in persist order.
    pub persisted: Vec<(Vec<ItemRow>, Vec<SiteRow>)>,
}

impl MemoryRegistryStore {
    pub fn new(registry: GlRegistry) -> Self {
        Self {
            registry,
            persisted: Vec::new(),
        }
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load(&mut self) -> Result<GlRegistry, JournalError> {
        Ok(self.registry.clone())
    }

    fn persist(&mut self, registry: &GlRegistry) -> Result<(), JournalError> {
        self.registry = registry.clone();
        self.persisted
            .push((registry.item_rows(), registry.site_rows()));
        Ok(())
    }
}

/// Workbook sink collecting sheets and the summary.
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    pub sheets: Vec<(NaiveDate, Vec<JournalRecord>)>,
    pub summary: Option<Vec<SummaryRow>>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkbookSink for MemoryWorkbook {
    fn write_sheet(
        &mut self,
        date: NaiveDate,
        records: &[JournalRecord],
    ) -> Result<(), JournalError> {
        self.sheets.push((date, records.to_vec()));
        Ok(())
    }

    fn write_summary(&mut self, rows: &[SummaryRow]) -> Result<(), JournalError> {
        self.summary = Some(rows.to_vec());
        Ok(())
    }
}

/// Upload sink keeping the flat-file content.
#[derive(Debug, Default)]
pub struct MemoryUpload {
    pub content: Option<String>,
}

impl MemoryUpload {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UploadSink for MemoryUpload {
    fn write_upload(&mut self, content: &str) -> Result<(), JournalError> {
        self.content = Some(content.to_string());
        Ok(())
    }
}

/// Diagnostic sink collecting messages; deduplicates by artifact name
/// like the filesystem sink.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    pub diagnostics: Vec<Diagnostic>,
    seen: BTreeSet<String>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifact names in report order, distinct.
    pub fn artifact_names(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.artifact_name()).collect()
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn report(&mut self, diagnostic: &Diagnostic) {
        if self.seen.insert(diagnostic.artifact_name()) {
            self.diagnostics.push(diagnostic.clone());
        }
    }
}
