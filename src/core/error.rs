use thiserror::Error;

/// Fatal errors — conditions that abort the run.
///
/// Recoverable conditions (unresolved GL codes, reconciliation mismatches,
/// ambiguous site sets) are not errors; they surface as
/// [`Diagnostic`](crate::pipeline::Diagnostic) values and the run continues.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JournalError {
    /// Zero or more than one candidate sales file for a batch.
    /// Checked before any state is touched.
    #[error("expected exactly one candidate sales file, found {found}")]
    AmbiguousInput {
        /// Number of candidates discovered.
        found: usize,
    },

    /// Reading the sales export failed.
    #[error("sales source error: {0}")]
    Source(String),

    /// Loading or persisting the GL code registry failed.
    #[error("registry store error: {0}")]
    Registry(String),

    /// Writing the workbook or upload output failed.
    #[error("output sink error: {0}")]
    Sink(String),

    /// A lookup missed after registration guaranteed an entry.
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),
}
