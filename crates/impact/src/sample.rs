//! Impact observations

use impactfit_core::{Price, Quantity, Side};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One simulated fill of a target volume against a depth ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSample {
    pub side: Side,
    /// Quantity the hypothetical market order executes
    pub target_volume: Quantity,
    /// Volume-weighted average fill price
    pub average_price: Price,
    /// Pre-trade midpoint the impact is measured against
    pub mid_price: Price,
    /// Signed deviation from mid, positive when the order moves price against itself
    pub impact: Price,
    /// Visible levels that contributed quantity
    pub levels_consumed: usize,
    /// Last price filled at
    pub worst_price: Price,
    /// Volume beyond visible depth, priced at the last level
    pub unfilled_volume: Quantity,
}

impl ImpactSample {
    /// Impact relative to mid in basis points
    ///
    /// None for a non-positive mid or when the ratio leaves `Decimal` range.
    pub fn impact_bps(&self) -> Option<Decimal> {
        if self.mid_price <= Decimal::ZERO {
            return None;
        }
        self.impact
            .checked_div(self.mid_price)?
            .checked_mul(Decimal::from(10_000))
    }

    /// True when visible depth could not absorb the whole target volume
    pub fn exhausted_depth(&self) -> bool {
        self.unfilled_volume > Decimal::ZERO
    }
}

/// Impact samples for one snapshot, in configured volume order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImpactCurve {
    samples: Vec<ImpactSample>,
}

impl ImpactCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: ImpactSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[ImpactSample] {
        &self.samples
    }

    pub fn volumes(&self) -> Vec<Quantity> {
        self.samples.iter().map(|s| s.target_volume).collect()
    }

    pub fn impacts(&self) -> Vec<Price> {
        self.samples.iter().map(|s| s.impact).collect()
    }

    /// Smallest and largest volume as floats, for chart axes
    pub fn volume_range(&self) -> Option<(f64, f64)> {
        let mut volumes = self.samples.iter().filter_map(|s| s.target_volume.to_f64());
        let first = volumes.next()?;
        Some(volumes.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl Deref for ImpactCurve {
    type Target = [ImpactSample];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl From<Vec<ImpactSample>> for ImpactCurve {
    fn from(samples: Vec<ImpactSample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<ImpactSample> for ImpactCurve {
    fn from_iter<I: IntoIterator<Item = ImpactSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ImpactCurve {
    type Item = &'a ImpactSample;
    type IntoIter = std::slice::Iter<'a, ImpactSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(volume: Decimal, impact: Decimal) -> ImpactSample {
        ImpactSample {
            side: Side::Buy,
            target_volume: volume,
            average_price: dec!(100) + impact,
            mid_price: dec!(100),
            impact,
            levels_consumed: 1,
            worst_price: dec!(100) + impact,
            unfilled_volume: Decimal::ZERO,
        }
    }

    #[test]
    fn test_impact_bps() {
        let s = sample(dec!(10), dec!(0.05));
        assert_eq!(s.impact_bps(), Some(dec!(5)));
        assert!(!s.exhausted_depth());

        let mut unpriced = s.clone();
        unpriced.mid_price = Decimal::ZERO;
        assert_eq!(unpriced.impact_bps(), None);
    }

    #[test]
    fn test_curve_accessors() {
        let curve: ImpactCurve = vec![
            sample(dec!(500), dec!(0.2)),
            sample(dec!(100), dec!(0.1)),
            sample(dec!(2000), dec!(0.4)),
        ]
        .into_iter()
        .collect();

        assert_eq!(curve.len(), 3);
        assert_eq!(curve.volumes(), vec![dec!(500), dec!(100), dec!(2000)]);
        assert_eq!(curve.impacts()[2], dec!(0.4));
        assert_eq!(curve.volume_range(), Some((100.0, 2000.0)));
    }

    #[test]
    fn test_empty_curve_has_no_range() {
        assert!(ImpactCurve::new().volume_range().is_none());
    }
}
