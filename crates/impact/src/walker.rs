//! Book Walking Simulation
//!
//! Fills a hypothetical market order against one side of a depth snapshot,
//! consuming levels from best to worst price until the target volume is
//! exhausted.
//!
//! Volume beyond the visible ladder is priced at the last level's price.
//! This is an approximation of what deeper liquidity would cost, not an
//! error condition.

use impactfit_core::{BookLevel, DepthSnapshot, Price, Quantity, Side};
use log::debug;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::sample::{ImpactCurve, ImpactSample};

/// Simulate a market order of `target_volume` on `side` walking `levels`
///
/// `levels` must be the ladder the order consumes, best price first
/// (asks ascending for a buy, bids descending for a sell). The walk stops
/// as soon as the remaining volume reaches zero, so a level that exactly
/// satisfies the remainder is the last one touched.
pub fn compute_impact(
    side: Side,
    target_volume: Quantity,
    levels: &[BookLevel],
    mid_price: Price,
) -> Result<ImpactSample> {
    if target_volume <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "target volume must be positive, got {}",
            target_volume
        )));
    }
    if mid_price <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "mid price must be positive, got {}",
            mid_price
        )));
    }
    let Some(last) = levels.last() else {
        return Err(Error::InvalidInput(format!(
            "no liquidity to price a {} order against",
            side
        )));
    };

    let mut remaining = target_volume;
    let mut total_cost = Decimal::ZERO;
    let mut levels_consumed = 0;
    let mut worst_price = levels[0].price;

    for (i, level) in levels.iter().enumerate() {
        if level.quantity < Decimal::ZERO {
            return Err(Error::InvalidInput(format!(
                "level {} has negative size {}",
                i, level.quantity
            )));
        }

        let take = remaining.min(level.quantity);
        if take > Decimal::ZERO {
            total_cost = add_notional(total_cost, take, level.price)?;
            remaining -= take;
            levels_consumed += 1;
            worst_price = level.price;
        }

        if remaining.is_zero() {
            break;
        }
    }

    let unfilled_volume = remaining;
    if unfilled_volume > Decimal::ZERO {
        total_cost = add_notional(total_cost, unfilled_volume, last.price)?;
        worst_price = last.price;
        debug!(
            "{} {} exceeds visible depth, {} priced at last level {}",
            side, target_volume, unfilled_volume, last.price
        );
    }

    let average_price = total_cost.checked_div(target_volume).ok_or_else(|| {
        Error::InvalidInput(format!(
            "average price overflow: cost {} over volume {}",
            total_cost, target_volume
        ))
    })?;
    let impact = match side {
        Side::Buy => average_price.checked_sub(mid_price),
        Side::Sell => mid_price.checked_sub(average_price),
    }
    .ok_or_else(|| {
        Error::InvalidInput(format!(
            "impact overflow: average {} against mid {}",
            average_price, mid_price
        ))
    })?;

    debug!(
        "{} {}: avg={} mid={} impact={} levels={}",
        side, target_volume, average_price, mid_price, impact, levels_consumed
    );

    Ok(ImpactSample {
        side,
        target_volume,
        average_price,
        mid_price,
        impact,
        levels_consumed,
        worst_price,
        unfilled_volume,
    })
}

/// `total + quantity * price`, failing instead of overflowing
fn add_notional(total: Decimal, quantity: Quantity, price: Price) -> Result<Decimal> {
    quantity
        .checked_mul(price)
        .and_then(|notional| total.checked_add(notional))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "notional overflow: {} @ {} on top of {}",
                quantity, price, total
            ))
        })
}

/// Buy-side walk over the ask ladder
pub fn compute_buy_impact(
    target_volume: Quantity,
    ask_levels: &[BookLevel],
    mid_price: Price,
) -> Result<ImpactSample> {
    compute_impact(Side::Buy, target_volume, ask_levels, mid_price)
}

/// Walks the ladders of a single snapshot
///
/// Holds the snapshot's midpoint so every volume on a curve is measured
/// against the same reference.
#[derive(Debug, Clone, Copy)]
pub struct BookWalker<'a> {
    snapshot: &'a DepthSnapshot,
    mid_price: Price,
}

impl<'a> BookWalker<'a> {
    /// Fails when either side is empty or the midpoint is out of range
    pub fn new(snapshot: &'a DepthSnapshot) -> Result<Self> {
        let mid_price = snapshot.mid_price().ok_or_else(|| {
            Error::InvalidInput(format!(
                "snapshot {} has no midpoint (bids={}, asks={}, best bid {:?}, best ask {:?})",
                snapshot.label().unwrap_or("<unlabelled>"),
                snapshot.bids().len(),
                snapshot.asks().len(),
                snapshot.best_bid().map(|l| l.price),
                snapshot.best_ask().map(|l| l.price)
            ))
        })?;

        Ok(Self {
            snapshot,
            mid_price,
        })
    }

    pub fn mid_price(&self) -> Price {
        self.mid_price
    }

    /// Impact of a single market order
    pub fn impact(&self, side: Side, target_volume: Quantity) -> Result<ImpactSample> {
        compute_impact(
            side,
            target_volume,
            self.snapshot.levels(side),
            self.mid_price,
        )
    }

    /// One sample per volume, in the order given
    pub fn curve(&self, side: Side, volumes: &[Quantity]) -> Result<ImpactCurve> {
        volumes
            .iter()
            .map(|volume| self.impact(side, *volume))
            .collect()
    }
}
