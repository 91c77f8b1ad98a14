use rust_decimal::Decimal;

/// Price value - uses Decimal so level walks are exact
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;
