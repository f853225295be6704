use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// unique identifier for recorded loan terms
pub type LoanId = Uuid;

/// terms of a fixed-rate loan, immutable once recorded
///
/// Fields are private and exposed through accessors only; the builder
/// validates once at construction and no mutation operation exists.
/// Derived figures (number of payments, monthly rate) are computed on
/// demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    id: LoanId,
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    originated_at: DateTime<Utc>,
}

impl LoanTerms {
    /// record new terms, stamping the origination instant from the
    /// time provider
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_years: u32,
        time: &SafeTimeProvider,
    ) -> Result<Self> {
        let terms = Self {
            id: Uuid::new_v4(),
            principal,
            annual_rate,
            term_years,
            originated_at: time.now(),
        };
        terms.validate()?;
        Ok(terms)
    }

    /// builder for loan terms
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// check the domain invariants
    ///
    /// Values deserialized from JSON bypass the builder, so calculators
    /// re-run this before computing.
    pub fn validate(&self) -> Result<()> {
        if self.term_years < 1 {
            return Err(LoanError::InvalidTermYears {
                years: self.term_years,
            });
        }
        if self.principal.is_negative() {
            return Err(LoanError::NegativePrincipal {
                principal: self.principal,
            });
        }
        if self.annual_rate.is_negative() {
            return Err(LoanError::NegativeRate {
                rate: self.annual_rate,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// the instant the terms were recorded; informational only, never
    /// used in the payment calculation
    pub fn originated_at(&self) -> DateTime<Utc> {
        self.originated_at
    }

    /// total number of monthly payments over the term
    pub fn number_of_payments(&self) -> u32 {
        self.term_years * 12
    }

    /// monthly fraction of the annual rate
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// convert to pretty-printed json string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// parse terms back from json; invariants are re-checked by
    /// consumers, not here
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// fluent builder ending in a validating `originate` step
///
/// Defaults to a 1,000 principal at 2.5% over one year.
#[derive(Debug, Clone)]
pub struct LoanTermsBuilder {
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self {
            principal: Money::from_major(1_000),
            annual_rate: Rate::from_percent(Decimal::new(25, 1)),
            term_years: 1,
        }
    }

    /// set the borrowed amount
    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    /// set the annual rate
    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = rate;
        self
    }

    /// set the annual rate from a percent, which may be fractional
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Rate::from_percent(percent);
        self
    }

    /// set the term in whole years
    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = years;
        self
    }

    /// validate and record the terms
    pub fn originate(self, time: &SafeTimeProvider) -> Result<LoanTerms> {
        LoanTerms::new(self.principal, self.annual_rate, self.term_years, time)
    }
}

impl Default for LoanTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
