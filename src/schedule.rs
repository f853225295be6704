use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payment::{AmortizationCalculator, PaymentPlan};
use crate::terms::{LoanId, LoanTerms};

/// one scheduled payment in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: DateTime<Utc>,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// full payment-by-payment breakdown of a loan
///
/// Every row derives from the same monthly figure the calculator
/// returns; the final row absorbs sub-unit rounding residue so the
/// balance lands exactly at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub loan_id: LoanId,
    pub plan: PaymentPlan,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl PaymentBreakdown {
    /// generate the breakdown for the terms under the given plan
    pub fn generate(terms: &LoanTerms, plan: PaymentPlan) -> Result<Self> {
        let calculator = AmortizationCalculator::new(plan);
        let monthly = calculator.monthly_payment(terms)?;

        let payments = match plan {
            PaymentPlan::FixedRate => fixed_rate_rows(terms, monthly),
            PaymentPlan::InterestOnly => interest_only_rows(terms, monthly),
        };

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_paid = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            loan_id: terms.id(),
            plan,
            payments,
            total_interest,
            total_paid,
        })
    }

    /// get payment for a specific period, starting at 1
    pub fn payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        if payment_number == 0 {
            return None;
        }
        self.payments.get((payment_number - 1) as usize)
    }

    /// remaining balance after the given payment
    pub fn balance_after(&self, payment_number: u32) -> Money {
        self.payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or_else(|| {
                self.payments
                    .first()
                    .map(|p| p.beginning_balance)
                    .unwrap_or(Money::ZERO)
            })
    }

    /// convert to pretty-printed json string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// parse a breakdown back from json
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// equal monthly payments, declining interest share
fn fixed_rate_rows(terms: &LoanTerms, monthly: Money) -> Vec<ScheduledPayment> {
    let monthly_rate = terms.monthly_rate().as_decimal();
    let start = terms.originated_at();

    let mut payments = Vec::with_capacity(terms.number_of_payments() as usize);
    let mut balance = terms.principal();
    let mut cumulative_interest = Money::ZERO;
    let mut cumulative_principal = Money::ZERO;

    for i in 1..=terms.number_of_payments() {
        let interest_portion = Money::from_decimal(balance.as_decimal() * monthly_rate);
        let principal_portion = (monthly - interest_portion).min(balance);
        let payment_amount = interest_portion + principal_portion;

        cumulative_interest += interest_portion;
        cumulative_principal += principal_portion;

        let ending_balance = (balance - principal_portion).max(Money::ZERO);

        payments.push(ScheduledPayment {
            payment_number: i,
            payment_date: months_after(start, i),
            beginning_balance: balance,
            payment_amount,
            principal_portion,
            interest_portion,
            ending_balance,
            cumulative_interest,
            cumulative_principal,
        });

        balance = ending_balance;
    }

    // absorb sub-unit rounding residue into the last payment
    if let Some(last) = payments.last_mut() {
        if last.ending_balance > Money::ZERO && last.ending_balance < Money::from_major(1) {
            let residue = last.ending_balance;
            last.principal_portion += residue;
            last.payment_amount += residue;
            last.cumulative_principal += residue;
            last.ending_balance = Money::ZERO;
        }
    }

    payments
}

/// interest each month, balloon principal in the final row
fn interest_only_rows(terms: &LoanTerms, monthly: Money) -> Vec<ScheduledPayment> {
    let principal = terms.principal();
    let start = terms.originated_at();
    let months = terms.number_of_payments();

    let mut payments = Vec::with_capacity(months as usize);
    let mut cumulative_interest = Money::ZERO;

    for i in 1..=months {
        let is_last = i == months;
        cumulative_interest += monthly;

        let (payment_amount, principal_portion, ending_balance) = if is_last {
            (monthly + principal, principal, Money::ZERO)
        } else {
            (monthly, Money::ZERO, principal)
        };

        payments.push(ScheduledPayment {
            payment_number: i,
            payment_date: months_after(start, i),
            beginning_balance: principal,
            payment_amount,
            principal_portion,
            interest_portion: monthly,
            ending_balance,
            cumulative_interest,
            cumulative_principal: if is_last { principal } else { Money::ZERO },
        });
    }

    payments
}

/// step a date forward by whole months
fn months_after(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let mut result = date;
    for _ in 0..months {
        let days = days_in_month(result.year(), result.month());
        result += Duration::days(days as i64);
    }
    result
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::decimal::Rate;
    use crate::payment::total_payment;

    fn terms(principal: Decimal, rate_percent: Decimal, years: u32) -> LoanTerms {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        LoanTerms::builder()
            .principal(Money::from_decimal(principal))
            .rate(Rate::from_percent(rate_percent))
            .term_years(years)
            .originate(&time)
            .unwrap()
    }

    #[test]
    fn test_fixed_rate_breakdown() {
        let terms = terms(dec!(100000), dec!(12), 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        assert_eq!(breakdown.loan_id, terms.id());
        assert_eq!(breakdown.payments.len(), 12);

        let first = &breakdown.payments[0];
        assert_eq!(first.beginning_balance, terms.principal());
        // first month interest is exactly 1% of principal
        assert_eq!(first.interest_portion, Money::from_major(1_000));
        assert!(first.principal_portion.is_positive());

        // interest share declines every month
        for window in breakdown.payments.windows(2) {
            assert!(window[1].interest_portion < window[0].interest_portion);
            assert!(window[1].beginning_balance < window[0].beginning_balance);
        }

        // balance lands exactly at zero
        let last = breakdown.payments.last().unwrap();
        assert_eq!(last.ending_balance, Money::ZERO);
        assert_eq!(last.cumulative_principal, terms.principal());
    }

    #[test]
    fn test_breakdown_reconciles() {
        let terms = terms(dec!(120000.95), dec!(8.25), 5);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        let last = breakdown.payments.last().unwrap();
        assert_eq!(
            breakdown.total_paid,
            breakdown.total_interest + last.cumulative_principal
        );
        assert_eq!(breakdown.total_interest, last.cumulative_interest);

        // the rounding residue in the last row keeps the aggregate within
        // one currency unit of the calculator's total
        let total = total_payment(&terms).unwrap();
        assert!((breakdown.total_paid - total).abs() < Money::from_major(1));
    }

    #[test]
    fn test_zero_rate_breakdown_is_linear() {
        let terms = terms(dec!(1000), Decimal::ZERO, 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        assert_eq!(breakdown.total_interest, Money::ZERO);
        for payment in &breakdown.payments[..11] {
            assert_eq!(payment.interest_portion, Money::ZERO);
            assert_eq!(payment.payment_amount, Money::from_decimal(dec!(1000)) / dec!(12));
        }
        assert_eq!(breakdown.payments.last().unwrap().ending_balance, Money::ZERO);
    }

    #[test]
    fn test_zero_principal_breakdown() {
        let terms = terms(Decimal::ZERO, dec!(8.25), 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        assert_eq!(breakdown.total_paid, Money::ZERO);
        assert_eq!(breakdown.total_interest, Money::ZERO);
        for payment in &breakdown.payments {
            assert_eq!(payment.payment_amount, Money::ZERO);
            assert_eq!(payment.ending_balance, Money::ZERO);
        }
    }

    #[test]
    fn test_interest_only_breakdown() {
        let terms = terms(dec!(120000), dec!(6), 2);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::InterestOnly).unwrap();

        // all rows except the last are interest only
        for payment in &breakdown.payments[..23] {
            assert_eq!(payment.principal_portion, Money::ZERO);
            assert_eq!(payment.ending_balance, terms.principal());
            assert_eq!(payment.interest_portion, Money::from_major(600));
        }

        // balloon row settles the principal
        let last = breakdown.payments.last().unwrap();
        assert_eq!(last.principal_portion, terms.principal());
        assert_eq!(last.ending_balance, Money::ZERO);

        let calculator = AmortizationCalculator::new(PaymentPlan::InterestOnly);
        assert_eq!(breakdown.total_paid, calculator.total_payment(&terms).unwrap());
    }

    #[test]
    fn test_payment_dates_advance_monthly() {
        let terms = terms(dec!(10000), dec!(5), 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        let first = breakdown.payments[0].payment_date;
        assert_eq!(first, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let last = breakdown.payments[11].payment_date;
        assert_eq!(last, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        for window in breakdown.payments.windows(2) {
            assert!(window[1].payment_date > window[0].payment_date);
        }
    }

    #[test]
    fn test_balance_lookup() {
        let terms = terms(dec!(10000), dec!(5), 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        assert!(breakdown.payment(0).is_none());
        assert!(breakdown.payment(13).is_none());
        assert_eq!(breakdown.balance_after(0), terms.principal());
        assert_eq!(breakdown.balance_after(12), Money::ZERO);

        let mid = breakdown.balance_after(6);
        assert!(mid > Money::ZERO);
        assert!(mid < terms.principal());
    }

    #[test]
    fn test_json_round_trip() {
        let terms = terms(dec!(10000), dec!(5), 1);
        let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate).unwrap();

        let json = breakdown.to_json().unwrap();
        let restored = PaymentBreakdown::from_json(&json).unwrap();

        assert_eq!(restored.loan_id, breakdown.loan_id);
        assert_eq!(restored.payments, breakdown.payments);
        assert_eq!(restored.total_paid, breakdown.total_paid);
    }
}
