use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("term must be at least one year: got {years}")]
    InvalidTermYears {
        years: u32,
    },

    #[error("principal cannot be negative: {principal}")]
    NegativePrincipal {
        principal: Money,
    },

    #[error("interest rate cannot be negative: {rate}")]
    NegativeRate {
        rate: Rate,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidInput {
        field: &'static str,
        value: String,
    },

    #[error("input ended while reading {field}")]
    MissingInput {
        field: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
