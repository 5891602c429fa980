//! Derived-entry policy: configuration data describing the synthetic
//! balancing entries accounting policy requires per date group.
//!
//! The engine in [`crate::core::derive`] knows nothing about specific
//! account codes or flags; new policies are added here as data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::ResolvedLine;

/// How a rule selects its source lines within one date group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTrigger {
    /// Lines whose resolved account code equals this exact string.
    Account(String),
    /// Lines whose registry PWC flag equals this exact string.
    Flag(String),
}

impl RuleTrigger {
    pub fn matches(&self, line: &ResolvedLine) -> bool {
        match self {
            Self::Account(code) => line.account == *code,
            Self::Flag(value) => line.flag.as_deref() == Some(value.as_str()),
        }
    }
}

/// A proportional leg of a derived rule, booked as `round(S * factor, 2)`
/// where S is the matched group sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleLeg {
    /// GL account code the leg books to.
    pub account: String,
    /// Fraction of the matched sum.
    pub factor: Decimal,
    /// Fixed journal line description.
    pub description: String,
}

/// The balancing leg, booked as the negated sum of the proportional legs.
/// Absorbs per-leg rounding so every rule nets to exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancingLeg {
    pub account: String,
    pub description: String,
}

/// One derived-entry rule: trigger, proportional legs, balancing leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRule {
    /// Short rule name for diagnostics.
    pub name: String,
    pub trigger: RuleTrigger,
    pub legs: Vec<RuleLeg>,
    pub balancing: BalancingLeg,
}

/// Ordered rule set applied to every date group. Rule order is output
/// row order; it has no effect on reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedPolicy {
    pub rules: Vec<DerivedRule>,
}

impl DerivedPolicy {
    /// Policy with no rules; no derived lines are generated.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The two historical rules.
    ///
    /// B1G1: re-labels the account-2164 subtotal as a sold/discount
    /// reversal pair. Promotional cost recovery: splits the PWC-flagged
    /// subtotal 20/80 across receivable and discount, balanced on 2162.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                DerivedRule {
                    name: "b1g1".into(),
                    trigger: RuleTrigger::Account("2164".into()),
                    legs: vec![RuleLeg {
                        account: "2164".into(),
                        factor: dec!(1),
                        description: "GSR B1G1 Sold".into(),
                    }],
                    balancing: BalancingLeg {
                        account: "2165".into(),
                        description: "GSR B1G1 Sold Dscnt".into(),
                    },
                },
                DerivedRule {
                    name: "promo-cost-recovery".into(),
                    trigger: RuleTrigger::Flag("x".into()),
                    legs: vec![
                        RuleLeg {
                            account: "1201".into(),
                            factor: dec!(0.2),
                            description: "Accounts Receivable".into(),
                        },
                        RuleLeg {
                            account: "2163".into(),
                            factor: dec!(0.8),
                            description: "GSR PC - Discount".into(),
                        },
                    ],
                    balancing: BalancingLeg {
                        account: "2162".into(),
                        description: "GSR PC - Dscnt".into(),
                    },
                },
            ],
        }
    }
}
