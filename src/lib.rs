pub mod decimal;
pub mod errors;
pub mod input;
pub mod payment;
pub mod report;
pub mod schedule;
pub mod terms;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use input::{parse_principal, parse_rate_percent, parse_term_years, read_terms};
pub use payment::{monthly_payment, total_payment, AmortizationCalculator, PaymentPlan};
pub use report::LoanReport;
pub use schedule::{PaymentBreakdown, ScheduledPayment};
pub use terms::{LoanId, LoanTerms, LoanTermsBuilder};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
