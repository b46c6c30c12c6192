//! rn-channel: channel geometry and flow laws for river reaches.
//!
//! Provides:
//! - Channel shapes (rectangular, triangular, mean of two channels)
//! - The `FlowLaw` capability shared by every flux law between two water stores
//! - Manning's equation with kinematic or diffusive wave routing
//!
//! # Example
//!
//! ```
//! use rn_channel::{Channel, FlowLaw, Manning, WaterLevel, Wave};
//! use rn_core::units::m;
//!
//! let channel = Channel::rectangular(m(100.0), m(2.0)).unwrap();
//! let law = Manning::new(channel, Wave::Kinematic);
//!
//! let upper = WaterLevel::new(m(10.0), m(0.5));
//! let lower = WaterLevel::new(m(9.0), m(0.5));
//! let q = law.q(upper, lower).unwrap();
//! assert!(q.value > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod manning;
pub mod shape;
pub mod traits;

// Re-exports
pub use error::{ChannelError, ChannelResult};
pub use manning::Manning;
pub use shape::{Channel, ChannelShape, MeanChannel, RectangularReach, TriangularReach};
pub use traits::{FlowLaw, WaterLevel, Wave, WaveRouted};
