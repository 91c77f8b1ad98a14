//! impactfit Snapshot Loader
//!
//! File-facing collaborators of the impact engine:
//!
//! - **MBP-10 loader** ([`mbp10`]): parses a market-by-price CSV row into a
//!   [`DepthSnapshot`](impactfit_core::DepthSnapshot)
//! - **Discovery** ([`discovery`]): finds snapshot files under a directory
//!   tree and labels them for reporting

pub mod discovery;
pub mod error;
pub mod mbp10;

pub use discovery::{SnapshotSource, discover_sources};
pub use error::{Error, Result};
pub use mbp10::{DEFAULT_DEPTH, load_snapshot, parse_snapshot};
