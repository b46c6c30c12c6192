//! External outlet nodes.

use rn_core::{OutletId, Point};

use crate::connection::Endpoint;

/// A terminal node outside the reach network (a lake, the sea, a gauge
/// boundary) receiving the outflow of a reach.
#[derive(Debug, Clone, PartialEq)]
pub struct Outlet {
    pub(crate) id: OutletId,
    pub name: String,
    pub location: Point,
}

impl Outlet {
    pub fn id(&self) -> OutletId {
        self.id
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::Outlet(self.id)
    }
}
