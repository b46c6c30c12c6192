//! Manning's equation flow law.

use crate::common::check_finite;
use crate::error::{ChannelError, ChannelResult};
use crate::shape::{Channel, ChannelShape};
use crate::traits::{FlowLaw, WaterLevel, Wave, WaveRouted};
use rn_core::units::{VolumeRate, m, m3ps};

/// Open-channel flow after Manning:
///
/// `Q = sign(S) * A * R^(2/3) * sqrt(|S|) / n`
///
/// `S` is the bed slope for kinematic routing and the water-surface slope for
/// diffusive routing, both taken over the channel length. Area and hydraulic
/// radius are evaluated at the depth of the donor endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Manning {
    channel: Channel,
    wave: Wave,
}

impl Manning {
    pub fn new(channel: Channel, wave: Wave) -> Self {
        Self { channel, wave }
    }

    pub fn kinematic(channel: Channel) -> Self {
        Self::new(channel, Wave::Kinematic)
    }

    pub fn diffusive(channel: Channel) -> Self {
        Self::new(channel, Wave::Diffusive)
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn is_diffusive(&self) -> bool {
        self.wave.is_diffusive()
    }

    /// Driving gradient between the two endpoints.
    pub fn slope(&self, upper: WaterLevel, lower: WaterLevel) -> ChannelResult<f64> {
        let length = self.channel.length().value;
        if length <= 0.0 {
            return Err(ChannelError::NonPhysical {
                what: "Manning channel length must be positive",
            });
        }
        let drop = match self.wave {
            Wave::Kinematic => upper.bed_elevation.value - lower.bed_elevation.value,
            Wave::Diffusive => upper.surface().value - lower.surface().value,
        };
        let slope = drop / length;
        check_finite(slope, "Manning slope")?;
        Ok(slope)
    }
}

impl FlowLaw for Manning {
    fn name(&self) -> &str {
        match self.wave {
            Wave::Kinematic => "Manning kinematic",
            Wave::Diffusive => "Manning diffusive",
        }
    }

    fn q(&self, upper: WaterLevel, lower: WaterLevel) -> ChannelResult<VolumeRate> {
        let slope = self.slope(upper, lower)?;
        let donor = if slope >= 0.0 { upper } else { lower };
        let depth = donor.depth.value.max(0.0);
        if depth <= 0.0 || slope == 0.0 {
            return Ok(m3ps(0.0));
        }

        let area = self.channel.cross_section_area(m(depth)).value;
        let radius = self.channel.hydraulic_radius(m(depth)).value;
        let q = slope.signum() * area * radius.powf(2.0 / 3.0) * slope.abs().sqrt()
            / self.channel.nmanning();

        check_finite(q, "Manning discharge")?;
        Ok(m3ps(q))
    }

    fn routing(&self) -> Option<Wave> {
        Some(self.wave)
    }

    fn as_wave_routed_mut(&mut self) -> Option<&mut dyn WaveRouted> {
        Some(self)
    }
}

impl WaveRouted for Manning {
    fn wave(&self) -> Wave {
        self.wave
    }

    fn set_wave(&mut self, wave: Wave) {
        self.wave = wave;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_channel() -> Channel {
        Channel::rectangular(m(100.0), m(1.0)).unwrap()
    }

    #[test]
    fn kinematic_uses_bed_slope() {
        let law = Manning::kinematic(unit_channel());
        let upper = WaterLevel::new(m(11.0), m(1.0));
        let lower = WaterLevel::new(m(10.0), m(3.0));

        assert!((law.slope(upper, lower).unwrap() - 0.01).abs() < 1e-12);

        let q = law.q(upper, lower).unwrap().value;
        let expected = 1.0 * (1.0_f64 / 3.0).powf(2.0 / 3.0) * 0.1 / 0.035;
        assert!((q - expected).abs() < 1e-9);
    }

    #[test]
    fn diffusive_follows_water_surface() {
        let law = Manning::diffusive(unit_channel());
        // Bed falls downstream, but the water surface rises: flow reverses.
        let upper = WaterLevel::new(m(11.0), m(1.0));
        let lower = WaterLevel::new(m(10.0), m(3.0));
        assert!(law.slope(upper, lower).unwrap() < 0.0);
        assert!(law.q(upper, lower).unwrap().value < 0.0);
    }

    #[test]
    fn dry_donor_gives_no_flow() {
        let law = Manning::kinematic(unit_channel());
        let upper = WaterLevel::new(m(11.0), m(0.0));
        let lower = WaterLevel::new(m(10.0), m(2.0));
        assert_eq!(law.q(upper, lower).unwrap().value, 0.0);
    }

    #[test]
    fn zero_length_channel_is_rejected() {
        let law = Manning::kinematic(Channel::rectangular(m(0.0), m(1.0)).unwrap());
        let level = WaterLevel::new(m(1.0), m(1.0));
        assert!(matches!(
            law.q(level, level),
            Err(ChannelError::NonPhysical { .. })
        ));
    }

    #[test]
    fn wave_switch_in_place() {
        let mut law = Manning::kinematic(unit_channel());
        assert_eq!(law.routing(), Some(Wave::Kinematic));
        law.as_wave_routed_mut().unwrap().set_diffusive(true);
        assert!(law.is_diffusive());
        assert_eq!(law.name(), "Manning diffusive");
    }
}
