use std::io::{BufRead, Write};
use std::str::FromStr;

use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::terms::LoanTerms;

/// parse a principal amount from text
///
/// Basic type parsing only; domain checks (non-negative, etc) happen
/// when the terms are originated.
pub fn parse_principal(text: &str) -> Result<Money> {
    let trimmed = text.trim();
    Money::from_str_exact(trimmed).map_err(|_| LoanError::InvalidInput {
        field: "loan amount",
        value: trimmed.to_string(),
    })
}

/// parse an annual rate given as a percent, for example 8.25
pub fn parse_rate_percent(text: &str) -> Result<Rate> {
    let trimmed = text.trim();
    let percent = Decimal::from_str(trimmed).map_err(|_| LoanError::InvalidInput {
        field: "annual interest rate",
        value: trimmed.to_string(),
    })?;
    Ok(Rate::from_percent(percent))
}

/// parse a term in whole years
pub fn parse_term_years(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    trimmed.parse::<u32>().map_err(|_| LoanError::InvalidInput {
        field: "number of years",
        value: trimmed.to_string(),
    })
}

/// prompt for rate, term, and amount in order and assemble validated
/// terms, stamping origination through the time provider
pub fn read_terms<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    time: &SafeTimeProvider,
) -> Result<LoanTerms> {
    let rate = parse_rate_percent(&prompt_line(
        input,
        output,
        "Enter annual interest rate, for example, 8.25: ",
        "annual interest rate",
    )?)?;

    let years = parse_term_years(&prompt_line(
        input,
        output,
        "Enter number of years as an integer, for example, 5: ",
        "number of years",
    )?)?;

    let principal = parse_principal(&prompt_line(
        input,
        output,
        "Enter loan amount, for example, 120000.95: ",
        "loan amount",
    )?)?;

    LoanTerms::builder()
        .rate(rate)
        .term_years(years)
        .principal(principal)
        .originate(time)
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> Result<String> {
    writeln!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(LoanError::MissingInput { field });
    }
    Ok(line)
}
