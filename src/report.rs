use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payment::AmortizationCalculator;
use crate::terms::LoanTerms;

/// read-only payment report for a set of loan terms
///
/// Both figures come from one calculator pass; display rounds to two
/// decimal places while the stored values keep full precision. The
/// report never prints on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub originated_at: DateTime<Utc>,
    pub monthly_payment: Money,
    pub total_payment: Money,
}

impl LoanReport {
    /// compute the report for the terms under the default plan
    pub fn for_terms(terms: &LoanTerms) -> Result<Self> {
        let calculator = AmortizationCalculator::default();
        Ok(Self {
            originated_at: terms.originated_at(),
            monthly_payment: calculator.monthly_payment(terms)?,
            total_payment: calculator.total_payment(terms)?,
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for LoanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The loan was created on {}", self.originated_at)?;
        writeln!(
            f,
            "The monthly payment is {:.2}",
            self.monthly_payment.round_dp(2).as_decimal()
        )?;
        write!(
            f,
            "The total payment is {:.2}",
            self.total_payment.round_dp(2).as_decimal()
        )
    }
}
