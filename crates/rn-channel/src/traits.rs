//! Core traits for flow laws between water stores.

use crate::error::ChannelResult;
use rn_core::units::{Length, VolumeRate};
use std::fmt;

/// Routing variant of a Manning-type flow law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wave {
    /// Gradient from the bed slope only.
    Kinematic,
    /// Gradient from the water-surface slope.
    Diffusive,
}

impl Wave {
    pub fn from_diffusive(diffusive: bool) -> Self {
        if diffusive {
            Wave::Diffusive
        } else {
            Wave::Kinematic
        }
    }

    pub fn is_diffusive(self) -> bool {
        self == Wave::Diffusive
    }
}

/// Water state of one endpoint of a flow law, as seen by that law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterLevel {
    /// Elevation of the channel bed (or ground surface).
    pub bed_elevation: Length,
    /// Water depth above the bed.
    pub depth: Length,
}

impl WaterLevel {
    pub fn new(bed_elevation: Length, depth: Length) -> Self {
        Self {
            bed_elevation,
            depth,
        }
    }

    /// Elevation of the water surface.
    pub fn surface(&self) -> Length {
        self.bed_elevation + self.depth
    }
}

/// A flux law binding two water-holding endpoints.
///
/// Laws are deterministic functions of the endpoint states. Flow is positive
/// from `upper` to `lower`.
pub trait FlowLaw: fmt::Debug + Send + Sync {
    /// Law name for debugging and identification.
    fn name(&self) -> &str;

    /// Discharge from `upper` to `lower`.
    fn q(&self, upper: WaterLevel, lower: WaterLevel) -> ChannelResult<VolumeRate>;

    /// Routing variant, if this law is wave-routed.
    fn routing(&self) -> Option<Wave> {
        None
    }

    /// Capability query: mutable access to the routing switch of
    /// Manning-family laws. Other laws return `None`.
    fn as_wave_routed_mut(&mut self) -> Option<&mut dyn WaveRouted> {
        None
    }
}

/// Flow laws whose routing variant can be switched in place.
pub trait WaveRouted {
    fn wave(&self) -> Wave;

    fn set_wave(&mut self, wave: Wave);

    fn set_diffusive(&mut self, diffusive: bool) {
        self.set_wave(Wave::from_diffusive(diffusive));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::units::m;

    #[test]
    fn wave_from_flag() {
        assert_eq!(Wave::from_diffusive(true), Wave::Diffusive);
        assert_eq!(Wave::from_diffusive(false), Wave::Kinematic);
        assert!(Wave::Diffusive.is_diffusive());
        assert!(!Wave::Kinematic.is_diffusive());
    }

    #[test]
    fn surface_is_bed_plus_depth() {
        let level = WaterLevel::new(m(12.0), m(0.75));
        assert_eq!(level.surface().value, 12.75);
    }
}
