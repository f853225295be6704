use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::terms::LoanTerms;

/// closed set of supported payment plans
///
/// All payment math dispatches through a single function with one branch
/// per variant, keeping the formulas auditable in one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPlan {
    /// equal payments covering interest and principal each month
    #[default]
    FixedRate,
    /// interest each month, principal due at maturity
    InterestOnly,
}

/// pure computation from loan terms to payment figures
///
/// No side effects: never logs, never prints, never mutates the terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationCalculator {
    plan: PaymentPlan,
}

impl AmortizationCalculator {
    pub fn new(plan: PaymentPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> PaymentPlan {
        self.plan
    }

    /// fixed monthly payment for the terms
    ///
    /// Rejects out-of-domain terms before computing; a zero rate takes
    /// the zero-interest branch instead of the general formula, and a
    /// zero principal yields exactly zero.
    pub fn monthly_payment(&self, terms: &LoanTerms) -> Result<Money> {
        terms.validate()?;
        Ok(plan_monthly_payment(self.plan, terms))
    }

    /// total repaid over the life of the loan
    ///
    /// Derived from the same monthly figure; there is no independent
    /// rounding or recomputation path.
    pub fn total_payment(&self, terms: &LoanTerms) -> Result<Money> {
        terms.validate()?;
        let monthly = plan_monthly_payment(self.plan, terms);
        let total = monthly * Decimal::from(terms.number_of_payments());

        Ok(match self.plan {
            PaymentPlan::FixedRate => total,
            // balloon principal at maturity
            PaymentPlan::InterestOnly => total + terms.principal(),
        })
    }
}

/// monthly payment under the default fixed-rate plan
pub fn monthly_payment(terms: &LoanTerms) -> Result<Money> {
    AmortizationCalculator::default().monthly_payment(terms)
}

/// total payment under the default fixed-rate plan
pub fn total_payment(terms: &LoanTerms) -> Result<Money> {
    AmortizationCalculator::default().total_payment(terms)
}

/// single dispatch point for all plan variants
fn plan_monthly_payment(plan: PaymentPlan, terms: &LoanTerms) -> Money {
    let principal = terms.principal();
    let monthly_rate = terms.monthly_rate().as_decimal();
    let months = terms.number_of_payments();

    match plan {
        PaymentPlan::FixedRate => fixed_rate_payment(principal, monthly_rate, months),
        PaymentPlan::InterestOnly => Money::from_decimal(principal.as_decimal() * monthly_rate),
    }
}

/// payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
fn fixed_rate_payment(principal: Money, monthly_rate: Decimal, months: u32) -> Money {
    if principal.is_zero() {
        return Money::ZERO;
    }

    // zero-interest limit; the general formula divides by zero here
    if monthly_rate.is_zero() {
        return principal / Decimal::from(months);
    }

    let r = monthly_rate;
    let n = months;

    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..n {
        compound *= base;
    }

    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Money::from_decimal(numerator / denominator)
}
