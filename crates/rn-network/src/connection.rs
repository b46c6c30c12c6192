//! Flow connections between water-holding endpoints.

use std::collections::BTreeMap;
use std::fmt;

use rn_channel::FlowLaw;
use rn_core::{CellId, ConnId, OutletId, ReachId};

/// Anything a flow connection can bind: a reach, an outlet node, or the
/// surface-water store of a land-surface cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Reach(ReachId),
    Outlet(OutletId),
    SurfaceWater(CellId),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Reach(id) => write!(f, "reach {}", id),
            Endpoint::Outlet(id) => write!(f, "outlet {}", id),
            Endpoint::SurfaceWater(id) => write!(f, "surface water of cell {}", id),
        }
    }
}

/// A flow law bound to two endpoints. Positive flow runs `upper` -> `lower`.
#[derive(Debug)]
pub struct Connection {
    id: ConnId,
    upper: Endpoint,
    lower: Endpoint,
    law: Box<dyn FlowLaw>,
}

impl Connection {
    pub fn id(&self) -> ConnId {
        self.id
    }

    pub fn upper(&self) -> Endpoint {
        self.upper
    }

    pub fn lower(&self) -> Endpoint {
        self.lower
    }

    pub fn law(&self) -> &dyn FlowLaw {
        self.law.as_ref()
    }

    pub fn law_mut(&mut self) -> &mut dyn FlowLaw {
        self.law.as_mut()
    }

    /// True if `endpoint` is either end of this connection.
    pub fn touches(&self, endpoint: Endpoint) -> bool {
        self.upper == endpoint || self.lower == endpoint
    }

    /// True if this connection binds `a` and `b`, in either orientation.
    pub fn joins(&self, a: Endpoint, b: Endpoint) -> bool {
        (self.upper == a && self.lower == b) || (self.upper == b && self.lower == a)
    }

    /// The end opposite to `endpoint`, if `endpoint` is part of this connection.
    pub fn other(&self, endpoint: Endpoint) -> Option<Endpoint> {
        if self.upper == endpoint {
            Some(self.lower)
        } else if self.lower == endpoint {
            Some(self.upper)
        } else {
            None
        }
    }
}

/// Owner of every flow connection in a network.
///
/// At most one connection exists per unordered endpoint pair: connecting a
/// pair again replaces the previous law. Ids are never reused.
#[derive(Debug, Default)]
pub struct ConnectionSet {
    connections: BTreeMap<ConnId, Connection>,
    next_id: u32,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn get(&self, id: ConnId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    /// Iterate over all connections in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Bind `upper` and `lower` with `law`, replacing any existing connection
    /// between the two.
    pub fn connect(&mut self, upper: Endpoint, lower: Endpoint, law: Box<dyn FlowLaw>) -> ConnId {
        let replaced = self.disconnect(upper, lower);
        let id = ConnId::from_index(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            conn = %id,
            %upper,
            %lower,
            law = law.name(),
            replaced,
            "connection created"
        );
        self.connections.insert(
            id,
            Connection {
                id,
                upper,
                lower,
                law,
            },
        );
        id
    }

    /// Remove the connection(s) between `a` and `b`. Returns how many were removed.
    pub fn disconnect(&mut self, a: Endpoint, b: Endpoint) -> usize {
        let before = self.connections.len();
        self.connections.retain(|_, c| !c.joins(a, b));
        let removed = before - self.connections.len();
        if removed > 0 {
            tracing::trace!(%a, %b, removed, "connection removed");
        }
        removed
    }

    /// Remove every connection touching `endpoint`. Returns how many were removed.
    pub fn disconnect_all(&mut self, endpoint: Endpoint) -> usize {
        let before = self.connections.len();
        self.connections.retain(|_, c| !c.touches(endpoint));
        before - self.connections.len()
    }

    /// The connection between `a` and `b`, in either orientation.
    pub fn between(&self, a: Endpoint, b: Endpoint) -> Option<&Connection> {
        self.connections.values().find(|c| c.joins(a, b))
    }

    pub fn touching(&self, endpoint: Endpoint) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.touches(endpoint))
    }

    pub fn touching_mut(&mut self, endpoint: Endpoint) -> impl Iterator<Item = &mut Connection> {
        self.connections
            .values_mut()
            .filter(move |c| c.touches(endpoint))
    }
}
