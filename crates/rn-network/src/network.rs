//! The reach network: owner of reaches, outlets, cells and connections.

use rn_channel::{Channel, FlowLaw, Manning, Wave};
use rn_core::{
    CellId, ConnId, Id, OutletId, Point, ReachId,
    units::{Area, Length, m},
};

use crate::cell::Cell;
use crate::connection::{Connection, ConnectionSet, Endpoint};
use crate::error::{NetworkError, NetworkResult};
use crate::iter::ReachIterator;
use crate::outlet::Outlet;
use crate::reach::Reach;
use crate::validate;

/// Arena owning every reach of a drainage network together with the outlet
/// nodes, land-surface cells and flow connections they are wired to.
///
/// Reaches refer to each other by [`ReachId`] only. Slots of removed reaches
/// stay empty, so handles are never reused.
///
/// Every topology change re-derives the affected Manning connections:
/// - reach -> downstream reach: mean of both channels
/// - reach -> outlet: the reach's own channel
/// - reach -> cell surface water: rectangular lateral channel
#[derive(Debug, Default)]
pub struct ReachNetwork {
    reaches: Vec<Option<Reach>>,
    outlets: Vec<Outlet>,
    cells: Vec<Cell>,
    pub(crate) connections: ConnectionSet,
}

impl ReachNetwork {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reach and return its handle. The reach starts unconnected.
    pub fn create_reach(
        &mut self,
        name: impl Into<String>,
        location: Point,
        channel: Channel,
        diffusive: bool,
    ) -> ReachId {
        let id = Id::from_index(self.reaches.len() as u32);
        self.reaches
            .push(Some(Reach::new(id, name.into(), location, channel, diffusive)));
        id
    }

    /// Add an outlet node and return its handle.
    pub fn add_outlet(&mut self, name: impl Into<String>, location: Point) -> OutletId {
        let id = Id::from_index(self.outlets.len() as u32);
        self.outlets.push(Outlet {
            id,
            name: name.into(),
            location,
        });
        id
    }

    /// Add a land-surface cell and return its handle.
    pub fn add_cell(&mut self, position: Point, area: Area) -> NetworkResult<CellId> {
        rn_channel::common::check_positive(area.value, "cell area")?;
        let id = Id::from_index(self.cells.len() as u32);
        self.cells.push(Cell::new(id, position, area));
        Ok(id)
    }

    /// Get a reach by handle.
    pub fn reach(&self, id: ReachId) -> NetworkResult<&Reach> {
        self.slot(id)
            .ok_or(NetworkError::ReachNotFound { reach: id })
    }

    pub fn outlet(&self, id: OutletId) -> NetworkResult<&Outlet> {
        self.outlets
            .get(id.index() as usize)
            .ok_or(NetworkError::OutletNotFound { outlet: id })
    }

    pub fn cell(&self, id: CellId) -> NetworkResult<&Cell> {
        self.cells
            .get(id.index() as usize)
            .ok_or(NetworkError::CellNotFound { cell: id })
    }

    /// Iterate over all live reaches in creation order.
    pub fn reaches(&self) -> impl Iterator<Item = &Reach> {
        self.reaches.iter().flatten()
    }

    /// Number of live reaches.
    pub fn reach_count(&self) -> usize {
        self.reaches().count()
    }

    /// Reaches without a downstream reach.
    pub fn roots(&self) -> Vec<ReachId> {
        self.reaches()
            .filter(|r| r.downstream().is_none())
            .map(Reach::id)
            .collect()
    }

    /// Reaches without upstream reaches.
    pub fn headwaters(&self) -> Vec<ReachId> {
        self.reaches()
            .filter(|r| r.upstream_count() == 0)
            .map(Reach::id)
            .collect()
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    /// The connection between two endpoints, in either orientation.
    pub fn connection_between(&self, a: Endpoint, b: Endpoint) -> Option<&Connection> {
        self.connections.between(a, b)
    }

    pub fn connections_touching(&self, endpoint: Endpoint) -> impl Iterator<Item = &Connection> {
        self.connections.touching(endpoint)
    }

    /// Register an externally built flow law between two endpoints, replacing
    /// any connection already binding them.
    ///
    /// Reach-to-reach and reach-to-outlet connections are derived from the
    /// topology and cannot be set here; use
    /// [`set_downstream`](Self::set_downstream) and
    /// [`set_outlet`](Self::set_outlet).
    pub fn connect(
        &mut self,
        upper: Endpoint,
        lower: Endpoint,
        law: Box<dyn FlowLaw>,
    ) -> NetworkResult<ConnId> {
        if is_managed(upper, lower) {
            return Err(NetworkError::ManagedConnection { upper, lower });
        }
        self.check_endpoint(upper)?;
        self.check_endpoint(lower)?;
        Ok(self.connections.connect(upper, lower, law))
    }

    /// Downstream reach of `reach`, or `None` for a terminal reach.
    pub fn get_downstream(&self, reach: ReachId) -> NetworkResult<Option<ReachId>> {
        Ok(self.reach(reach)?.downstream())
    }

    /// Upstream reach of `reach` at `index`; negative indices count from the end.
    pub fn get_upstream(&self, reach: ReachId, index: isize) -> NetworkResult<ReachId> {
        self.reach(reach)?.get_upstream(index)
    }

    /// Rewire `reach` to drain into `new_downstream` (or into nothing).
    ///
    /// The old downstream reach loses `reach` from its upstream list and the
    /// connection between them is dropped. A new downstream reach gains
    /// `reach` as upstream and a Manning connection over the mean of both
    /// channels, kinematic or diffusive after `reach`'s routing flag. An
    /// existing outlet connection is dropped as well, since a reach drains
    /// either into a reach or into an outlet.
    ///
    /// Fails without changing anything if `new_downstream` is `reach` itself
    /// or lies upstream of it.
    pub fn set_downstream(
        &mut self,
        reach: ReachId,
        new_downstream: Option<ReachId>,
    ) -> NetworkResult<()> {
        let old_downstream = self.reach(reach)?.downstream;
        if let Some(target) = new_downstream {
            self.reach(target)?;
            self.ensure_acyclic(reach, target)?;
        }

        if let Some(old) = old_downstream {
            if let Some(old_reach) = self.slot_mut(old) {
                old_reach.remove_upstream(reach);
            }
            self.connections
                .disconnect(Endpoint::Reach(reach), Endpoint::Reach(old));
        }

        self.reach_mut(reach)?.downstream = new_downstream;

        let Some(target) = new_downstream else {
            tracing::debug!(%reach, old = ?old_downstream, "downstream detached");
            return Ok(());
        };

        self.detach_outlet(reach);
        self.reach_mut(target)?.add_upstream(reach);

        let (channel, wave) = {
            let this = self.reach(reach)?;
            let down = self.reach(target)?;
            (
                Channel::mean(this.channel(), down.channel()),
                Wave::from_diffusive(this.diffusive),
            )
        };
        let conn = self.connections.connect(
            Endpoint::Reach(reach),
            Endpoint::Reach(target),
            Box::new(Manning::new(channel, wave)),
        );
        tracing::debug!(
            %reach,
            downstream = %target,
            old = ?old_downstream,
            %conn,
            ?wave,
            "downstream set"
        );
        Ok(())
    }

    /// Follow downstream links from `reach` to the terminal reach.
    pub fn get_root(&self, reach: ReachId) -> NetworkResult<ReachId> {
        let mut current = reach;
        for _ in 0..=self.reaches.len() {
            match self.reach(current)?.downstream {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        Err(NetworkError::UnterminatedChain { reach })
    }

    /// Drain `reach` into `outlet`, or into nothing for `None`.
    ///
    /// Detaches any downstream reach and any previous outlet first. The new
    /// outlet connection uses the reach's own channel.
    pub fn set_outlet(
        &mut self,
        reach: ReachId,
        outlet: Option<OutletId>,
    ) -> NetworkResult<Option<ConnId>> {
        self.reach(reach)?;
        if let Some(outlet) = outlet {
            self.outlet(outlet)?;
        }

        self.set_downstream(reach, None)?;
        self.detach_outlet(reach);

        let Some(outlet) = outlet else {
            return Ok(None);
        };

        let this = self.reach_mut(reach)?;
        this.outlet = Some(outlet);
        let law = Manning::new(this.channel().clone(), Wave::from_diffusive(this.diffusive));
        let conn = self.connections.connect(
            Endpoint::Reach(reach),
            Endpoint::Outlet(outlet),
            Box::new(law),
        );
        tracing::debug!(%reach, %outlet, %conn, "outlet set");
        Ok(Some(conn))
    }

    /// Make `reach` a terminus without any outflow connection.
    pub fn set_dead_end(&mut self, reach: ReachId) -> NetworkResult<()> {
        self.set_downstream(reach, None)?;
        self.set_outlet(reach, None)?;
        Ok(())
    }

    /// Connect `reach` laterally to the surface water of `cell`.
    ///
    /// The lateral channel is rectangular with the given `width`; its length
    /// is the planar cell-to-reach distance, capped at half the cell's
    /// effective radius. The routing variant is chosen by `diffusive`,
    /// independent of the reach's own flag.
    pub fn connect_to_surfacewater(
        &mut self,
        reach: ReachId,
        cell: CellId,
        width: Length,
        diffusive: bool,
    ) -> NetworkResult<ConnId> {
        let (length, surfacewater) = {
            let this = self.reach(reach)?;
            let cell = self.cell(cell)?;
            (cell.lateral_flow_length(this.location()), cell.surfacewater())
        };
        let channel = Channel::rectangular(m(length), width)?;
        let law = Manning::new(channel, Wave::from_diffusive(diffusive));
        let conn = self
            .connections
            .connect(Endpoint::Reach(reach), surfacewater, Box::new(law));
        tracing::debug!(%reach, %cell, length, %conn, "lateral connection set");
        Ok(conn)
    }

    /// Switch the routing variant of `reach` and of every Manning-family
    /// connection touching it, in place. Returns how many connections were
    /// switched.
    pub fn set_diffusive(&mut self, reach: ReachId, diffusive: bool) -> NetworkResult<usize> {
        self.reach_mut(reach)?.diffusive = diffusive;

        let mut switched = 0;
        for conn in self.connections.touching_mut(Endpoint::Reach(reach)) {
            if let Some(routed) = conn.law_mut().as_wave_routed_mut() {
                routed.set_diffusive(diffusive);
                switched += 1;
            }
        }
        tracing::debug!(%reach, diffusive, switched, "routing mode set");
        Ok(switched)
    }

    /// Move `reach` to a new location. Existing connections keep their geometry.
    pub fn set_location(&mut self, reach: ReachId, location: Point) -> NetworkResult<()> {
        self.reach_mut(reach)?.location = location;
        Ok(())
    }

    /// Remove `reach` from the network and return it.
    ///
    /// The reach leaves its downstream's upstream list, its upstream reaches
    /// become terminal, and every connection touching it is dropped.
    pub fn remove_reach(&mut self, reach: ReachId) -> NetworkResult<Reach> {
        let (downstream, upstream) = {
            let this = self.reach(reach)?;
            (this.downstream, this.upstream().to_vec())
        };

        if let Some(down) = downstream.and_then(|d| self.slot_mut(d)) {
            down.remove_upstream(reach);
        }
        for up in upstream {
            if let Some(up_reach) = self.slot_mut(up) {
                up_reach.downstream = None;
            }
        }
        let dropped = self.connections.disconnect_all(Endpoint::Reach(reach));

        let removed = self.reaches[reach.index() as usize]
            .take()
            .ok_or(NetworkError::ReachNotFound { reach })?;
        tracing::debug!(%reach, dropped, "reach removed");
        Ok(removed)
    }

    /// Breadth-first walk upstream from `start`.
    pub fn iter_upstream(&self, start: ReachId) -> NetworkResult<ReachIterator<'_>> {
        ReachIterator::new(self, start)
    }

    /// Check adjacency and connection invariants, returning the first violation.
    pub fn validate(&self) -> NetworkResult<()> {
        validate::validate_network(self)
    }

    pub(crate) fn slot(&self, id: ReachId) -> Option<&Reach> {
        self.reaches.get(id.index() as usize).and_then(Option::as_ref)
    }

    pub(crate) fn slot_mut(&mut self, id: ReachId) -> Option<&mut Reach> {
        self.reaches
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
    }

    pub(crate) fn reach_mut(&mut self, id: ReachId) -> NetworkResult<&mut Reach> {
        self.slot_mut(id)
            .ok_or(NetworkError::ReachNotFound { reach: id })
    }

    pub(crate) fn slots(&self) -> &[Option<Reach>] {
        &self.reaches
    }

    pub(crate) fn check_endpoint(&self, endpoint: Endpoint) -> NetworkResult<()> {
        match endpoint {
            Endpoint::Reach(id) => self.reach(id).map(|_| ()),
            Endpoint::Outlet(id) => self.outlet(id).map(|_| ()),
            Endpoint::SurfaceWater(id) => self.cell(id).map(|_| ()),
        }
    }

    fn detach_outlet(&mut self, reach: ReachId) {
        let Some(outlet) = self.slot_mut(reach).and_then(|r| r.outlet.take()) else {
            return;
        };
        self.connections
            .disconnect(Endpoint::Reach(reach), Endpoint::Outlet(outlet));
        tracing::debug!(%reach, %outlet, "outlet detached");
    }

    /// Fail if `target` is `reach` or drains (transitively) into it.
    fn ensure_acyclic(&self, reach: ReachId, target: ReachId) -> NetworkResult<()> {
        let mut current = Some(target);
        for _ in 0..=self.reaches.len() {
            match current {
                Some(id) if id == reach => {
                    tracing::warn!(%reach, downstream = %target, "rejected downstream cycle");
                    return Err(NetworkError::Cycle {
                        reach,
                        downstream: target,
                    });
                }
                Some(id) => current = self.slot(id).and_then(Reach::downstream),
                None => return Ok(()),
            }
        }
        Err(NetworkError::UnterminatedChain { reach: target })
    }
}

/// Endpoint pairs whose connections follow the reach topology.
fn is_managed(a: Endpoint, b: Endpoint) -> bool {
    matches!(
        (a, b),
        (Endpoint::Reach(_), Endpoint::Reach(_))
            | (Endpoint::Reach(_), Endpoint::Outlet(_))
            | (Endpoint::Outlet(_), Endpoint::Reach(_))
    )
}
