//! impactfit Impact Engine
//!
//! Two pure, stateless stages run once per depth snapshot:
//!
//! - **Book walking** ([`walker`]): consume resting liquidity level by level
//!   to fill a target volume and report the average execution price and its
//!   deviation from the pre-trade midpoint.
//! - **Power-law fitting** ([`fitter`]): fit `g(X) = α·X^β` to the resulting
//!   (volume, impact) curve by least squares in log-log space.
//!
//! ```text
//! DepthSnapshot ──► BookWalker ──► ImpactCurve ──► PowerLawFitter ──► PowerLawModel
//!                   (per volume)                                      + RegressionStats
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use impactfit_impact::{BookWalker, PowerLawFitter};
//!
//! let walker = BookWalker::new(&snapshot)?;
//! let curve = walker.curve(Side::Buy, &[dec!(100), dec!(500), dec!(1000)])?;
//! let model = PowerLawFitter::new().fit(&curve)?;
//! println!("{}", model);
//! ```

pub mod error;
pub mod fitter;
pub mod model;
pub mod sample;
pub mod walker;

// Re-export main types
pub use error::{Error, Result};
pub use fitter::{PowerLawFitter, fit_power_law};
pub use model::{PowerLawModel, RegressionStats, Residual};
pub use sample::{ImpactCurve, ImpactSample};
pub use walker::{BookWalker, compute_buy_impact, compute_impact};
