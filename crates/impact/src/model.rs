//! Power-law impact model
//!
//! `g(X) = α·X^β`, where α is the scale and β the exponent. Values are
//! plain `f64` because the model lives in log space.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sample::ImpactSample;

/// Fitted power-law parameters for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawModel {
    /// α
    pub scale: f64,
    /// β, typically in (0, 1) for sublinear impact growth
    pub exponent: f64,
}

impl PowerLawModel {
    pub fn new(scale: f64, exponent: f64) -> Self {
        Self { scale, exponent }
    }

    /// Predicted impact for an order of `volume`
    pub fn predict(&self, volume: f64) -> f64 {
        self.scale * volume.powf(self.exponent)
    }

    /// `100 · (observed − predicted) / observed`
    ///
    /// None when the observed impact is zero or not representable.
    pub fn residual_pct(&self, sample: &ImpactSample) -> Option<f64> {
        self.residual(sample).map(|r| r.residual_pct)
    }

    /// Residual breakdown for a single sample
    pub fn residual(&self, sample: &ImpactSample) -> Option<Residual> {
        let volume = sample.target_volume.to_f64()?;
        let observed = sample.impact.to_f64()?;
        if observed == 0.0 {
            return None;
        }
        let predicted = self.predict(volume);
        Some(Residual {
            volume,
            observed,
            predicted,
            residual_pct: 100.0 * (observed - predicted) / observed,
        })
    }

    /// Residuals for every sample that has one
    pub fn residuals(&self, samples: &[ImpactSample]) -> Vec<Residual> {
        samples.iter().filter_map(|s| self.residual(s)).collect()
    }

    /// Points along the fitted curve, log-spaced between `min` and `max`
    ///
    /// Returns an empty vector unless `0 < min <= max`.
    pub fn fit_line(&self, min: f64, max: f64, points: usize) -> Vec<(f64, f64)> {
        if !(min > 0.0 && max >= min) || points == 0 {
            return Vec::new();
        }
        if points == 1 {
            return vec![(min, self.predict(min))];
        }

        let (lo, hi) = (min.log10(), max.log10());
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = 10f64.powf(lo + step * i as f64);
                (x, self.predict(x))
            })
            .collect()
    }
}

impl fmt::Display for PowerLawModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g(X) = {:.6} * X^{:.3}", self.scale, self.exponent)
    }
}

/// Observed vs fitted impact at one volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Residual {
    pub volume: f64,
    pub observed: f64,
    pub predicted: f64,
    pub residual_pct: f64,
}

/// Goodness of fit of the log-space regression
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionStats {
    /// R² of ln(impact) on ln(volume)
    pub r_squared: f64,
    /// Root mean squared residual in log space
    pub rmse_log: f64,
    pub n_samples: usize,
}
