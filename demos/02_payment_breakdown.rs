/// payment breakdown - generate and print a full payment schedule
use amortizer_rs::{LoanTerms, Money, PaymentBreakdown, PaymentPlan, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let terms = LoanTerms::builder()
        .principal(Money::from_major(100_000))
        .rate_percent(dec!(12))
        .term_years(1)
        .originate(&time)?;

    let breakdown = PaymentBreakdown::generate(&terms, PaymentPlan::FixedRate)?;

    println!("#   payment      principal    interest     balance");
    for p in &breakdown.payments {
        println!(
            "{:<3} {:<12} {:<12} {:<12} {}",
            p.payment_number,
            p.payment_amount.round_dp(2),
            p.principal_portion.round_dp(2),
            p.interest_portion.round_dp(2),
            p.ending_balance.round_dp(2),
        );
    }

    println!();
    println!("total interest: {}", breakdown.total_interest.round_dp(2));
    println!("total paid:     {}", breakdown.total_paid.round_dp(2));

    Ok(())
}
