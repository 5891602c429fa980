//! Ports to the external collaborators.
//!
//! Spreadsheet parsing, workbook formatting, and file discovery live
//! outside the crate; the run only sees these seams.

use chrono::NaiveDate;

use crate::core::{GlRegistry, JournalError, SaleLine};
use crate::journal::{JournalRecord, SummaryRow};

/// Tabular reader producing the raw sale lines of one batch.
pub trait SalesSource {
    fn read(&mut self) -> Result<Vec<SaleLine>, JournalError>;
}

/// Load/persist seam for the GL code registry tables.
///
/// Persistence is a read-modify-write against shared on-disk state; the
/// design assumes single-writer, one-run-at-a-time execution.
pub trait RegistryStore {
    fn load(&mut self) -> Result<GlRegistry, JournalError>;
    fn persist(&mut self, registry: &GlRegistry) -> Result<(), JournalError>;
}

/// Workbook writer: one named sheet per accounting date plus one summary
/// sheet.
pub trait WorkbookSink {
    fn write_sheet(
        &mut self,
        date: NaiveDate,
        records: &[JournalRecord],
    ) -> Result<(), JournalError>;
    fn write_summary(&mut self, rows: &[SummaryRow]) -> Result<(), JournalError>;
}

/// Flat-file writer for the upload row set.
pub trait UploadSink {
    fn write_upload(&mut self, content: &str) -> Result<(), JournalError>;
}
