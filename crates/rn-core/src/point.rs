//! 3D locations.

use crate::numeric::Real;

/// A location in map coordinates with elevation `z`, all in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

impl Point {
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// Planar distance to `other`, ignoring elevation.
    pub fn distance_to_xy(&self, other: &Point) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_345() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to_xy(&b), 5.0);
        assert_eq!(a.distance_to_xy(&Point::new(3.0, 4.0, 100.0)), 5.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            ax in -1e3_f64..1e3, ay in -1e3_f64..1e3, az in -1e3_f64..1e3,
            bx in -1e3_f64..1e3, by in -1e3_f64..1e3, bz in -1e3_f64..1e3,
        ) {
            let a = Point::new(ax, ay, az);
            let b = Point::new(bx, by, bz);
            prop_assert_eq!(a.distance_to_xy(&b), b.distance_to_xy(&a));
            prop_assert!(a.distance_to_xy(&b) >= 0.0);
        }
    }
}
