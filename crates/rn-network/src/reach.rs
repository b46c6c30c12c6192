//! River reaches: the nodes of the drainage network.

use rn_channel::{Channel, ChannelShape};
use rn_core::{OutletId, Point, ReachId, Real, units::Length};

use crate::error::{NetworkError, NetworkResult};

/// One discrete segment of river channel.
///
/// A reach stores handles only: its own id (recorded by the owning
/// [`ReachNetwork`](crate::ReachNetwork) at creation), at most one downstream
/// reach or outlet, and the reaches draining into it. Adjacency is changed
/// through the network, which keeps both directions and the flow connections
/// in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Reach {
    id: ReachId,
    name: String,
    pub(crate) location: Point,
    channel: Channel,
    pub(crate) diffusive: bool,
    pub(crate) downstream: Option<ReachId>,
    pub(crate) outlet: Option<OutletId>,
    upstream: Vec<ReachId>,
}

impl Reach {
    pub(crate) fn new(
        id: ReachId,
        name: String,
        location: Point,
        channel: Channel,
        diffusive: bool,
    ) -> Self {
        Self {
            id,
            name,
            location,
            channel,
            diffusive,
            downstream: None,
            outlet: None,
            upstream: Vec::new(),
        }
    }

    pub fn id(&self) -> ReachId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Point {
        &self.location
    }

    /// Bed elevation of the reach.
    pub fn elevation(&self) -> Real {
        self.location.z
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Channel length of the reach.
    pub fn length(&self) -> Length {
        self.channel.length()
    }

    pub fn is_diffusive(&self) -> bool {
        self.diffusive
    }

    /// The downstream reach, or `None` for a terminal reach.
    pub fn downstream(&self) -> Option<ReachId> {
        self.downstream
    }

    /// The outlet this reach drains into, if any.
    pub fn outlet(&self) -> Option<OutletId> {
        self.outlet
    }

    pub fn upstream(&self) -> &[ReachId] {
        &self.upstream
    }

    pub fn upstream_count(&self) -> usize {
        self.upstream.len()
    }

    /// Register `r` as an upstream reach. Returns false if it already is one.
    pub fn add_upstream(&mut self, r: ReachId) -> bool {
        if self.upstream.contains(&r) {
            return false;
        }
        self.upstream.push(r);
        true
    }

    /// Remove `r` from the upstream reaches. Returns false if it was not listed.
    pub fn remove_upstream(&mut self, r: ReachId) -> bool {
        match self.upstream.iter().position(|&u| u == r) {
            Some(pos) => {
                self.upstream.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Upstream reach at `index`. Negative indices count from the end (`-1` is
    /// the last one).
    pub fn get_upstream(&self, index: isize) -> NetworkResult<ReachId> {
        let len = self.upstream.len();
        let normalized = if index < 0 {
            index + len as isize
        } else {
            index
        };
        usize::try_from(normalized)
            .ok()
            .and_then(|i| self.upstream.get(i).copied())
            .ok_or(NetworkError::UpstreamIndexOob {
                reach: self.id,
                index,
                len,
            })
    }
}
