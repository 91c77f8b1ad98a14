use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// One resting price level of a depth ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub quantity: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }

    /// Price times quantity
    pub fn notional(&self) -> Price {
        self.price * self.quantity
    }
}

impl From<(Price, Quantity)> for BookLevel {
    fn from((price, quantity): (Price, Quantity)) -> Self {
        Self { price, quantity }
    }
}
