//! Land-surface cells feeding reaches laterally.

use std::f64::consts::PI;

use rn_core::{CellId, Point, Real, units::Area};

use crate::connection::Endpoint;

/// A land-surface cell, reduced to what lateral reach connections need:
/// a position, a planar area and a surface-water store.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) id: CellId,
    position: Point,
    area: Area,
}

impl Cell {
    pub(crate) fn new(id: CellId, position: Point, area: Area) -> Self {
        Self { id, position, area }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn area(&self) -> Area {
        self.area
    }

    /// The cell's surface-water store as a connection endpoint.
    pub fn surfacewater(&self) -> Endpoint {
        Endpoint::SurfaceWater(self.id)
    }

    /// Characteristic radius of the cell, `sqrt(area) / pi`.
    pub fn effective_radius(&self) -> Real {
        self.area.value.sqrt() / PI
    }

    /// Length of a lateral flow path from this cell to `target`: the planar
    /// distance, capped at half the effective radius.
    pub fn lateral_flow_length(&self, target: &Point) -> Real {
        self.position
            .distance_to_xy(target)
            .min(self.effective_radius() / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::{Id, units::m2};

    #[test]
    fn short_distance_is_kept() {
        let cell = Cell::new(Id::from_index(0), Point::new(0.0, 0.0, 5.0), m2(10_000.0));
        // radius = 100 / pi ~ 31.8, cap ~ 15.9
        let length = cell.lateral_flow_length(&Point::new(3.0, 4.0, 0.0));
        assert_eq!(length, 5.0);
    }

    #[test]
    fn long_distance_is_capped() {
        let cell = Cell::new(Id::from_index(0), Point::new(0.0, 0.0, 0.0), m2(10_000.0));
        let length = cell.lateral_flow_length(&Point::new(1000.0, 0.0, 0.0));
        assert!((length - 50.0 / PI).abs() < 1e-12);
        assert_eq!(cell.surfacewater(), Endpoint::SurfaceWater(Id::from_index(0)));
    }
}
