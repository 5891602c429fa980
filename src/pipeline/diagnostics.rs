//! Recoverable-condition reporting.
//!
//! Diagnostics double as externally visible error artifacts: one artifact
//! per distinct message, named after the message text with `/` replaced
//! so the name stays file-safe. A human reviewing the output directory
//! discovers every issue after the fact without reading logs.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::journal::accounting_date;

/// A recoverable condition surfaced during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Items or sites were auto-registered with placeholder codes.
    MissingCodes {
        /// Earliest accounting date in the batch, when known.
        date: Option<NaiveDate>,
        items: Vec<String>,
        sites: Vec<String>,
    },
    /// A date's combined lines do not net to zero.
    ReconciliationMismatch { date: NaiveDate, residual: Decimal },
    /// The batch spans more than one site.
    AmbiguousSiteSet { sites: Vec<String> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCodes { date, items, sites } => {
                match date {
                    Some(d) => write!(f, "{} has missing GL codes", accounting_date(*d))?,
                    None => write!(f, "batch has missing GL codes")?,
                }
                if !items.is_empty() {
                    write!(f, " items [{}]", items.join(", "))?;
                }
                if !sites.is_empty() {
                    write!(f, " sites [{}]", sites.join(", "))?;
                }
                Ok(())
            }
            Self::ReconciliationMismatch { date, residual } => {
                write!(f, "{} is off by ${}", accounting_date(*date), residual)
            }
            Self::AmbiguousSiteSet { sites } => {
                write!(f, "batch spans multiple sites [{}]", sites.join(", "))
            }
        }
    }
}

impl Diagnostic {
    /// File-safe artifact name: the message with `/` replaced by `-`.
    pub fn artifact_name(&self) -> String {
        self.to_string().replace('/', "-")
    }
}

/// Sink for diagnostics. Reporting never fails from the caller's view;
/// implementations handle their own write errors.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Writes one artifact file per distinct diagnostic message into a
/// directory. Artifact write failures are logged and swallowed — the
/// artifact path must never take down a run that already has problems
/// worth reporting.
#[derive(Debug)]
pub struct FsDiagnosticSink {
    dir: PathBuf,
    written: BTreeSet<String>,
}

impl FsDiagnosticSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: BTreeSet::new(),
        }
    }
}

impl DiagnosticSink for FsDiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let name = diagnostic.artifact_name();
        if !self.written.insert(name.clone()) {
            return;
        }
        let path = self.dir.join(format!("{name}.txt"));
        if let Err(err) = std::fs::write(&path, diagnostic.to_string()) {
            tracing::warn!(artifact = %path.display(), %err, "failed to write diagnostic artifact");
        }
    }
}
