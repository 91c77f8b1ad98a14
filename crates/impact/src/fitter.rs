//! Power-Law Fitting
//!
//! Fits `impact ≈ α·volume^β` by ordinary least squares on
//! `(ln volume, ln impact)`:
//!
//! ```text
//! ln(impact) = β·ln(volume) + ln(α)
//! ```
//!
//! Minimising squared residuals in log space is the maximum-likelihood fit
//! under multiplicative log-normal noise, not an additive fit in volume
//! space.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Error, Result};
use crate::model::{PowerLawModel, RegressionStats};
use crate::sample::ImpactSample;

/// Distinct volumes needed to define a slope
const MIN_DISTINCT_VOLUMES: usize = 2;

/// Log-log least squares fitter
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerLawFitter;

impl PowerLawFitter {
    pub fn new() -> Self {
        Self
    }

    /// Fit the power law to one snapshot's samples
    pub fn fit(&self, samples: &[ImpactSample]) -> Result<PowerLawModel> {
        self.fit_with_stats(samples).map(|(model, _)| model)
    }

    /// Fit and report goodness of fit in log space
    ///
    /// Fails with `InsufficientData` below two distinct volumes and with
    /// `NonPositiveImpact` on the first impact that is zero or negative.
    /// No sample is ever dropped or defaulted.
    pub fn fit_with_stats(
        &self,
        samples: &[ImpactSample],
    ) -> Result<(PowerLawModel, RegressionStats)> {
        let distinct = distinct_volumes(samples);
        if distinct < MIN_DISTINCT_VOLUMES {
            return Err(Error::InsufficientData {
                distinct,
                required: MIN_DISTINCT_VOLUMES,
            });
        }

        let points = samples
            .iter()
            .map(log_point)
            .collect::<Result<Vec<(f64, f64)>>>()?;

        let (slope, intercept, stats) = least_squares(&points)?;

        let scale = intercept.exp();
        if !scale.is_finite() || !slope.is_finite() {
            return Err(Error::InvalidInput(format!(
                "fit produced non-finite parameters (ln α={}, β={})",
                intercept, slope
            )));
        }

        let model = PowerLawModel::new(scale, slope);
        debug!(
            "fit {} samples: {} r2={:.4} rmse_log={:.4}",
            stats.n_samples, model, stats.r_squared, stats.rmse_log
        );
        Ok((model, stats))
    }
}

/// Fit with the default fitter
pub fn fit_power_law(samples: &[ImpactSample]) -> Result<PowerLawModel> {
    PowerLawFitter::new().fit(samples)
}

fn distinct_volumes(samples: &[ImpactSample]) -> usize {
    let mut volumes: Vec<Decimal> = samples.iter().map(|s| s.target_volume).collect();
    volumes.sort();
    volumes.dedup();
    volumes.len()
}

/// `(ln volume, ln impact)` for one sample
fn log_point(sample: &ImpactSample) -> Result<(f64, f64)> {
    if sample.impact <= Decimal::ZERO {
        return Err(Error::NonPositiveImpact {
            volume: sample.target_volume,
            impact: sample.impact,
        });
    }
    if sample.target_volume <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "volume must be positive, got {}",
            sample.target_volume
        )));
    }

    let volume = to_positive_f64(sample.target_volume, "volume")?;
    let impact = to_positive_f64(sample.impact, "impact")?;
    Ok((volume.ln(), impact.ln()))
}

fn to_positive_f64(value: Decimal, what: &str) -> Result<f64> {
    match value.to_f64() {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::InvalidInput(format!(
            "{} {} is not representable as a positive float",
            what, value
        ))),
    }
}

/// Ordinary least squares `y = slope·x + intercept`
fn least_squares(points: &[(f64, f64)]) -> Result<(f64, f64, RegressionStats)> {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }

    // Distinct decimals can still collapse to one float
    if sxx <= 0.0 {
        return Err(Error::InsufficientData {
            distinct: 1,
            required: MIN_DISTINCT_VOLUMES,
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (x, y) in points {
        let resid = y - (slope * x + intercept);
        ss_res += resid * resid;
        ss_tot += (y - mean_y) * (y - mean_y);
    }

    // A flat curve is fitted exactly by a zero slope
    let r_squared = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    Ok((
        slope,
        intercept,
        RegressionStats {
            r_squared,
            rmse_log: (ss_res / n).sqrt(),
            n_samples: points.len(),
        },
    ))
}
