//! rn-core: stable foundation for rivernet.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float checks)
//! - ids (stable compact IDs for reaches, outlets, cells and connections)
//! - point (3D locations with elevation)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod point;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::RnError;
pub use ids::*;
pub use numeric::*;
pub use point::Point;
pub use units::*;
