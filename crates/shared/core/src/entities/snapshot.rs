use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BookLevel, Side};
use crate::values::{Price, Quantity};

/// Point-in-time view of a two-sided order book
///
/// Bids are stored best first (descending price), asks best first
/// (ascending price). The snapshot is immutable once built; ordering of the
/// ladders is taken as given and not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Source identifier used in reports (file stem, symbol, ...)
    label: Option<String>,
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
}

impl DepthSnapshot {
    pub fn new(bids: Vec<BookLevel>, asks: Vec<BookLevel>) -> Self {
        Self {
            label: None,
            bids,
            asks,
        }
    }

    /// Build from raw (price, quantity) pairs
    pub fn from_pairs(bids: &[(Price, Quantity)], asks: &[(Price, Quantity)]) -> Self {
        Self::new(
            bids.iter().copied().map(BookLevel::from).collect(),
            asks.iter().copied().map(BookLevel::from).collect(),
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn bids(&self) -> &[BookLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[BookLevel] {
        &self.asks
    }

    /// The ladder an order of `side` consumes: asks for a buy, bids for a sell
    pub fn levels(&self, side: Side) -> &[BookLevel] {
        match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }

    // === Price Queries ===

    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    /// Midpoint of best bid and best ask
    ///
    /// None when a side is empty or the sum exceeds `Decimal` range.
    pub fn mid_price(&self) -> Option<Price> {
        let (b, a) = (self.best_bid()?, self.best_ask()?);
        b.price.checked_add(a.price)?.checked_div(Decimal::TWO)
    }

    pub fn spread(&self) -> Option<Price> {
        let (b, a) = (self.best_bid()?, self.best_ask()?);
        a.price.checked_sub(b.price)
    }

    /// Best bid at or above best ask
    pub fn is_crossed(&self) -> bool {
        matches!(self.spread(), Some(s) if s <= Decimal::ZERO)
    }

    /// Total visible quantity on the ladder `side` consumes
    pub fn total_depth(&self, side: Side) -> Option<Quantity> {
        self.levels(side)
            .iter()
            .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_snapshot() -> DepthSnapshot {
        DepthSnapshot::from_pairs(
            &[(dec!(99.5), dec!(40)), (dec!(99.0), dec!(60))],
            &[
                (dec!(100.0), dec!(50)),
                (dec!(100.5), dec!(100)),
                (dec!(101.0), dec!(200)),
            ],
        )
    }

    #[test]
    fn test_mid_and_spread() {
        let snap = make_snapshot();
        assert_eq!(snap.mid_price(), Some(dec!(99.75)));
        assert_eq!(snap.spread(), Some(dec!(0.5)));
        assert!(!snap.is_crossed());
    }

    #[test]
    fn test_levels_by_side() {
        let snap = make_snapshot();
        assert_eq!(snap.levels(Side::Buy)[0].price, dec!(100.0));
        assert_eq!(snap.levels(Side::Sell)[0].price, dec!(99.5));
        assert_eq!(snap.total_depth(Side::Buy), Some(dec!(350)));
        assert_eq!(snap.total_depth(Side::Sell), Some(dec!(100)));
    }

    #[test]
    fn test_one_sided_book_has_no_mid() {
        let snap = DepthSnapshot::from_pairs(&[], &[(dec!(100), dec!(1))]);
        assert!(snap.mid_price().is_none());
        assert!(snap.spread().is_none());
        assert!(!snap.is_crossed());
    }

    #[test]
    fn test_crossed_book() {
        let snap = DepthSnapshot::from_pairs(&[(dec!(101), dec!(1))], &[(dec!(100), dec!(1))]);
        assert!(snap.is_crossed());
    }

    #[test]
    fn test_huge_prices_have_no_mid() {
        let huge = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        let snap = DepthSnapshot::from_pairs(&[(huge, dec!(1))], &[(huge, dec!(1))]);
        assert!(snap.mid_price().is_none());
        assert_eq!(snap.spread(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_total_depth_overflow() {
        let snap = DepthSnapshot::from_pairs(
            &[(dec!(1), dec!(1))],
            &[(dec!(1), Decimal::MAX), (dec!(2), Decimal::MAX)],
        );
        assert_eq!(snap.total_depth(Side::Buy), None);
        assert_eq!(snap.total_depth(Side::Sell), Some(dec!(1)));
    }

    #[test]
    fn test_label() {
        let snap = make_snapshot().with_label("xnas-20240102");
        assert_eq!(snap.label(), Some("xnas-20240102"));
    }
}
