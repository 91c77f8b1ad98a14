//! impactfit Core Domain
//!
//! Pure domain types shared by the impact engine, the snapshot loader and
//! the study runner. This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{BookLevel, DepthSnapshot, Side};
pub use values::{Price, Quantity};
