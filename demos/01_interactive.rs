/// interactive - read loan terms from standard input and print the report
use std::io;

use amortizer_rs::{read_terms, LoanReport, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let terms = read_terms(&mut input, &mut output, &time)?;
    let report = LoanReport::for_terms(&terms)?;

    println!("{}", report);

    Ok(())
}
