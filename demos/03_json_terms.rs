/// json terms - serialize loan terms and read them back
use amortizer_rs::{LoanReport, LoanTerms, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let terms = LoanTerms::builder()
        .principal(Money::from_major(10_000))
        .rate_percent(dec!(6.5))
        .term_years(3)
        .originate(&time)?;

    let json = terms.to_json()?;
    println!("{}", json);

    // restored terms validate and compute the same figures
    let restored = LoanTerms::from_json(&json)?;
    restored.validate()?;

    let report = LoanReport::for_terms(&restored)?;
    println!();
    println!("{}", report);

    Ok(())
}
