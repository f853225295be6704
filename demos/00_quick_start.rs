/// quick start - compute payments for a fixed-rate loan
use amortizer_rs::{monthly_payment, total_payment, LoanTerms, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // a $120,000.95 loan at 8.25% over 5 years
    let terms = LoanTerms::builder()
        .principal(Money::from_str_exact("120000.95")?)
        .rate_percent(dec!(8.25))
        .term_years(5)
        .originate(&time)?;

    println!("monthly payment: {}", monthly_payment(&terms)?.round_dp(2));
    println!("total payment:   {}", total_payment(&terms)?.round_dp(2));

    Ok(())
}
