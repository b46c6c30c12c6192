//! Channel cross-section shapes.
//!
//! Every shape has a length along the flow path and answers hydraulic
//! geometry queries for a given water depth. Depths below zero are treated
//! as an empty channel.

use crate::common::{DEFAULT_NMANNING, check_non_negative, check_positive};
use crate::error::ChannelResult;
use rn_core::units::{Area, Length, m, m2};

/// Hydraulic geometry of a channel segment.
pub trait ChannelShape {
    /// Length of the channel along the flow path.
    fn length(&self) -> Length;

    /// Width of the water surface at `depth`.
    fn top_width(&self, depth: Length) -> Length;

    /// Wetted perimeter of the cross section at `depth`.
    fn wetted_perimeter(&self, depth: Length) -> Length;

    /// Flowing cross-section area at `depth`.
    fn cross_section_area(&self, depth: Length) -> Area;

    /// Manning roughness coefficient.
    fn nmanning(&self) -> f64;

    /// Hydraulic radius `A / P`; zero for a dry channel.
    fn hydraulic_radius(&self, depth: Length) -> Length {
        let perimeter = self.wetted_perimeter(depth).value;
        if perimeter <= 0.0 {
            return m(0.0);
        }
        m(self.cross_section_area(depth).value / perimeter)
    }
}

/// Channel with vertical banks and a flat bed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangularReach {
    length: Length,
    width: Length,
    nmanning: f64,
}

impl RectangularReach {
    pub fn new(length: Length, width: Length) -> ChannelResult<Self> {
        check_non_negative(length.value, "channel length")?;
        check_positive(width.value, "channel width")?;
        Ok(Self {
            length,
            width,
            nmanning: DEFAULT_NMANNING,
        })
    }

    pub fn with_nmanning(mut self, nmanning: f64) -> ChannelResult<Self> {
        check_positive(nmanning, "Manning roughness")?;
        self.nmanning = nmanning;
        Ok(self)
    }

    pub fn width(&self) -> Length {
        self.width
    }
}

impl ChannelShape for RectangularReach {
    fn length(&self) -> Length {
        self.length
    }

    fn top_width(&self, _depth: Length) -> Length {
        self.width
    }

    fn wetted_perimeter(&self, depth: Length) -> Length {
        m(self.width.value + 2.0 * depth.value.max(0.0))
    }

    fn cross_section_area(&self, depth: Length) -> Area {
        m2(self.width.value * depth.value.max(0.0))
    }

    fn nmanning(&self) -> f64 {
        self.nmanning
    }
}

/// V-shaped channel. `bank_slope` is the horizontal run per meter of depth
/// on each bank.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularReach {
    length: Length,
    bank_slope: f64,
    nmanning: f64,
}

impl TriangularReach {
    pub fn new(length: Length, bank_slope: f64) -> ChannelResult<Self> {
        check_non_negative(length.value, "channel length")?;
        check_positive(bank_slope, "bank slope")?;
        Ok(Self {
            length,
            bank_slope,
            nmanning: DEFAULT_NMANNING,
        })
    }

    pub fn with_nmanning(mut self, nmanning: f64) -> ChannelResult<Self> {
        check_positive(nmanning, "Manning roughness")?;
        self.nmanning = nmanning;
        Ok(self)
    }

    pub fn bank_slope(&self) -> f64 {
        self.bank_slope
    }
}

impl ChannelShape for TriangularReach {
    fn length(&self) -> Length {
        self.length
    }

    fn top_width(&self, depth: Length) -> Length {
        m(2.0 * self.bank_slope * depth.value.max(0.0))
    }

    fn wetted_perimeter(&self, depth: Length) -> Length {
        let d = depth.value.max(0.0);
        m(2.0 * d * (1.0 + self.bank_slope * self.bank_slope).sqrt())
    }

    fn cross_section_area(&self, depth: Length) -> Area {
        let d = depth.value.max(0.0);
        m2(self.bank_slope * d * d)
    }

    fn nmanning(&self) -> f64 {
        self.nmanning
    }
}

/// Arithmetic mean of two channels, used for the connection between two
/// adjacent reaches. Every geometric property is the average of both parts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanChannel {
    first: Box<Channel>,
    second: Box<Channel>,
}

impl MeanChannel {
    pub fn new(first: Channel, second: Channel) -> Self {
        Self {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn parts(&self) -> (&Channel, &Channel) {
        (&self.first, &self.second)
    }
}

impl ChannelShape for MeanChannel {
    fn length(&self) -> Length {
        m(0.5 * (self.first.length().value + self.second.length().value))
    }

    fn top_width(&self, depth: Length) -> Length {
        m(0.5 * (self.first.top_width(depth).value + self.second.top_width(depth).value))
    }

    fn wetted_perimeter(&self, depth: Length) -> Length {
        m(0.5
            * (self.first.wetted_perimeter(depth).value
                + self.second.wetted_perimeter(depth).value))
    }

    fn cross_section_area(&self, depth: Length) -> Area {
        m2(0.5
            * (self.first.cross_section_area(depth).value
                + self.second.cross_section_area(depth).value))
    }

    fn nmanning(&self) -> f64 {
        0.5 * (self.first.nmanning() + self.second.nmanning())
    }
}

/// Any channel shape a reach or connection can carry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Rectangular(RectangularReach),
    Triangular(TriangularReach),
    Mean(MeanChannel),
}

impl Channel {
    /// Rectangular channel of the given length and width.
    pub fn rectangular(length: Length, width: Length) -> ChannelResult<Self> {
        Ok(Channel::Rectangular(RectangularReach::new(length, width)?))
    }

    /// Triangular channel of the given length and bank slope.
    pub fn triangular(length: Length, bank_slope: f64) -> ChannelResult<Self> {
        Ok(Channel::Triangular(TriangularReach::new(length, bank_slope)?))
    }

    /// Mean of two channels; both inputs are copied.
    pub fn mean(first: &Channel, second: &Channel) -> Self {
        Channel::Mean(MeanChannel::new(first.clone(), second.clone()))
    }

    fn shape(&self) -> &dyn ChannelShape {
        match self {
            Channel::Rectangular(c) => c,
            Channel::Triangular(c) => c,
            Channel::Mean(c) => c,
        }
    }
}

impl ChannelShape for Channel {
    fn length(&self) -> Length {
        self.shape().length()
    }

    fn top_width(&self, depth: Length) -> Length {
        self.shape().top_width(depth)
    }

    fn wetted_perimeter(&self, depth: Length) -> Length {
        self.shape().wetted_perimeter(depth)
    }

    fn cross_section_area(&self, depth: Length) -> Area {
        self.shape().cross_section_area(depth)
    }

    fn nmanning(&self) -> f64 {
        self.shape().nmanning()
    }
}

impl From<RectangularReach> for Channel {
    fn from(c: RectangularReach) -> Self {
        Channel::Rectangular(c)
    }
}

impl From<TriangularReach> for Channel {
    fn from(c: TriangularReach) -> Self {
        Channel::Triangular(c)
    }
}

impl From<MeanChannel> for Channel {
    fn from(c: MeanChannel) -> Self {
        Channel::Mean(c)
    }
}
