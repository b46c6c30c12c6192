//! Breadth-first traversal upstream from a reach.

use std::collections::VecDeque;

use rn_core::{
    ReachId,
    units::{Length, m},
};

use crate::error::{NetworkError, NetworkResult};
use crate::network::ReachNetwork;

/// Walks every reach upstream of a start reach, start included, pairing
/// each with its cumulative channel distance from the start.
///
/// Reaches are visited in FIFO order: a reach's upstream neighbours are
/// queued when the reach itself is visited, at the reach's distance plus its
/// own channel length. The traversal is forward-only and cannot be restarted.
///
/// The iterator borrows the network, so the topology cannot change under it.
#[derive(Debug, Clone)]
pub struct ReachIterator<'a> {
    network: &'a ReachNetwork,
    queue: VecDeque<(ReachId, Length)>,
    current: (ReachId, Length),
}

impl<'a> ReachIterator<'a> {
    pub fn new(network: &'a ReachNetwork, first: ReachId) -> NetworkResult<Self> {
        network.reach(first)?;
        let start = (first, m(0.0));
        Ok(Self {
            network,
            queue: VecDeque::from([start]),
            current: start,
        })
    }

    /// True while unvisited reaches remain queued.
    pub fn valid(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Advance to the next queued reach and return it.
    pub fn next_reach(&mut self) -> NetworkResult<ReachId> {
        let (front, distance) = self
            .queue
            .pop_front()
            .ok_or(NetworkError::QueueEmpty)?;
        let reach = self.network.reach(front)?;
        let next_distance = distance + reach.length();
        self.queue
            .extend(reach.upstream().iter().map(|&up| (up, next_distance)));
        self.current = (front, distance);
        Ok(front)
    }

    /// The current reach (the start reach before the first advance).
    pub fn reach(&self) -> ReachId {
        self.current.0
    }

    /// Cumulative channel distance of the current reach from the start.
    pub fn position(&self) -> Length {
        self.current.1
    }
}

impl Iterator for ReachIterator<'_> {
    type Item = (ReachId, Length);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid() {
            return None;
        }
        let reach = self.next_reach().ok()?;
        Some((reach, self.current.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_channel::Channel;
    use rn_core::Point;

    fn add(net: &mut ReachNetwork, name: &str, length: f64) -> ReachId {
        net.create_reach(
            name,
            Point::default(),
            Channel::rectangular(m(length), m(1.0)).unwrap(),
            false,
        )
    }

    #[test]
    fn chain_accumulates_lengths() {
        let mut net = ReachNetwork::new();
        let r1 = add(&mut net, "R1", 10.0);
        let r2 = add(&mut net, "R2", 5.0);
        let r3 = add(&mut net, "R3", 2.0);
        net.set_downstream(r2, Some(r1)).unwrap();
        net.set_downstream(r3, Some(r2)).unwrap();

        let mut it = ReachIterator::new(&net, r1).unwrap();
        assert_eq!(it.reach(), r1);
        assert_eq!(it.position().value, 0.0);

        assert_eq!(it.next_reach().unwrap(), r1);
        assert_eq!(it.position().value, 0.0);
        assert_eq!(it.next_reach().unwrap(), r2);
        assert_eq!(it.position().value, 10.0);
        assert_eq!(it.next_reach().unwrap(), r3);
        assert_eq!(it.position().value, 15.0);

        assert!(!it.valid());
        assert_eq!(it.next_reach(), Err(NetworkError::QueueEmpty));
        // current survives exhaustion
        assert_eq!(it.reach(), r3);
    }

    #[test]
    fn branches_are_visited_breadth_first() {
        //        a(4)
        //       /    \
        //    b(1)    c(2)
        //     |
        //    d(8)
        let mut net = ReachNetwork::new();
        let a = add(&mut net, "a", 4.0);
        let b = add(&mut net, "b", 1.0);
        let c = add(&mut net, "c", 2.0);
        let d = add(&mut net, "d", 8.0);
        net.set_downstream(b, Some(a)).unwrap();
        net.set_downstream(c, Some(a)).unwrap();
        net.set_downstream(d, Some(b)).unwrap();

        let visited: Vec<(ReachId, f64)> = net
            .iter_upstream(a)
            .unwrap()
            .map(|(r, pos)| (r, pos.value))
            .collect();
        assert_eq!(visited, vec![(a, 0.0), (b, 4.0), (c, 4.0), (d, 5.0)]);
    }

    #[test]
    fn starts_from_inner_reach() {
        let mut net = ReachNetwork::new();
        let a = add(&mut net, "a", 4.0);
        let b = add(&mut net, "b", 1.0);
        net.set_downstream(b, Some(a)).unwrap();

        let visited: Vec<ReachId> = net.iter_upstream(b).unwrap().map(|(r, _)| r).collect();
        assert_eq!(visited, vec![b]);
    }

    #[test]
    fn collected_walk_matches_manual_stepping() {
        let mut net = ReachNetwork::new();
        let a = add(&mut net, "a", 3.0);
        let b = add(&mut net, "b", 6.0);
        let c = add(&mut net, "c", 1.0);
        net.set_downstream(b, Some(a)).unwrap();
        net.set_downstream(c, Some(b)).unwrap();

        let collected: Vec<(ReachId, Length)> = net.iter_upstream(a).unwrap().collect();

        let mut it = net.iter_upstream(a).unwrap();
        let mut stepped = Vec::new();
        while it.valid() {
            let r = it.next_reach().unwrap();
            stepped.push((r, it.position()));
        }
        assert_eq!(collected, stepped);
        assert_eq!(collected[2], (c, m(9.0)));
    }

    #[test]
    fn unknown_start_is_rejected() {
        let net = ReachNetwork::new();
        assert!(ReachIterator::new(&net, rn_core::Id::from_index(0)).is_err());
    }
}
