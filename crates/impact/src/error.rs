//! Impact engine errors

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: {distinct} distinct volume(s), at least {required} required")]
    InsufficientData { distinct: usize, required: usize },

    #[error("Non-positive impact {impact} at volume {volume}: cannot take its logarithm")]
    NonPositiveImpact { volume: Decimal, impact: Decimal },
}

pub type Result<T> = std::result::Result<T, Error>;
