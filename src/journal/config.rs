use serde::{Deserialize, Serialize};

/// Which side of the ledger a positive amount books to.
///
/// Historical batches exist under both conventions for identical data, so
/// the convention is explicit per-batch configuration. The default is
/// [`DebitPositive`](SignConvention::DebitPositive): a positive amount is
/// a debit, a negative amount a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignConvention {
    /// Positive amount → debit column, negative → credit column.
    DebitPositive,
    /// Positive amount → credit column, negative → debit column.
    CreditPositive,
}

/// Configuration for journal upload formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Debit/credit convention in force for this batch.
    pub sign_convention: SignConvention,
    /// Fixed JOURNAL column value.
    pub journal_code: u8,
    /// Fixed ACCRUAL OR CASH column value.
    pub accrual_or_cash: u8,
    /// Maximum DESCRIPTION length in characters.
    pub description_limit: usize,
    /// Account whose summary rows are keyed by item description rather
    /// than by computed account string.
    pub summary_by_description_account: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            sign_convention: SignConvention::DebitPositive,
            journal_code: 10,
            accrual_or_cash: 1,
            description_limit: 30,
            summary_by_description_account: "1099".into(),
        }
    }
}

/// Builder for [`JournalConfig`].
///
/// # Example
///
/// ```
/// use gljournal::journal::{JournalConfigBuilder, SignConvention};
///
/// let config = JournalConfigBuilder::new()
///     .sign_convention(SignConvention::CreditPositive)
///     .journal_code(10)
///     .build();
/// ```
pub struct JournalConfigBuilder {
    config: JournalConfig,
}

impl JournalConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: JournalConfig::default(),
        }
    }

    /// Set the debit/credit convention.
    pub fn sign_convention(mut self, convention: SignConvention) -> Self {
        self.config.sign_convention = convention;
        self
    }

    /// Set the fixed JOURNAL column value.
    pub fn journal_code(mut self, code: u8) -> Self {
        self.config.journal_code = code;
        self
    }

    /// Set the fixed ACCRUAL OR CASH column value.
    pub fn accrual_or_cash(mut self, value: u8) -> Self {
        self.config.accrual_or_cash = value;
        self
    }

    /// Set the DESCRIPTION character limit.
    pub fn description_limit(mut self, limit: usize) -> Self {
        self.config.description_limit = limit;
        self
    }

    /// Set the account summarized by item description.
    pub fn summary_by_description_account(mut self, account: impl Into<String>) -> Self {
        self.config.summary_by_description_account = account.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> JournalConfig {
        self.config
    }
}

impl Default for JournalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
