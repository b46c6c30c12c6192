//! Elevation gap correction.

use rn_core::{ReachId, Real};

use crate::error::NetworkResult;
use crate::network::ReachNetwork;

/// Lower every reach upstream of (and including) `reach` to the minimum
/// elevation of its upstream reaches, children first.
///
/// After the pass a reach is never higher than any of its direct upstream
/// reaches, so elevations do not increase on the way from a headwater to
/// `reach`. Returns the corrected elevation of `reach`.
///
/// Uses an explicit work stack, so deep networks do not exhaust the call stack.
pub fn make_river_gap(network: &mut ReachNetwork, reach: ReachId) -> NetworkResult<Real> {
    network.reach(reach)?;

    let mut stack = vec![(reach, false)];
    let mut lowered = 0_usize;
    while let Some((id, children_done)) = stack.pop() {
        if !children_done {
            stack.push((id, true));
            let this = network.reach(id)?;
            stack.extend(this.upstream().iter().rev().map(|&up| (up, false)));
            continue;
        }

        let this = network.reach(id)?;
        let upstream_min = this
            .upstream()
            .iter()
            .filter_map(|&up| network.slot(up))
            .map(|up| up.elevation())
            .fold(Real::INFINITY, Real::min);
        let z = this.elevation();
        if upstream_min < z {
            network.reach_mut(id)?.location.z = upstream_min;
            lowered += 1;
            tracing::trace!(reach = %id, from = z, to = upstream_min, "reach lowered");
        }
    }

    let z = network.reach(reach)?.elevation();
    tracing::debug!(%reach, lowered, z, "river gaps corrected");
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_channel::Channel;
    use rn_core::{Point, units::m};

    fn add(net: &mut ReachNetwork, z: Real) -> ReachId {
        net.create_reach(
            format!("z{z}"),
            Point::new(0.0, 0.0, z),
            Channel::rectangular(m(10.0), m(1.0)).unwrap(),
            false,
        )
    }

    fn z(net: &ReachNetwork, r: ReachId) -> Real {
        net.reach(r).unwrap().elevation()
    }

    #[test]
    fn chain_takes_upstream_minimum() {
        let mut net = ReachNetwork::new();
        let r1 = add(&mut net, 5.0);
        let r2 = add(&mut net, 3.0);
        let r3 = add(&mut net, 8.0);
        net.set_downstream(r2, Some(r1)).unwrap();
        net.set_downstream(r3, Some(r2)).unwrap();

        assert_eq!(make_river_gap(&mut net, r1).unwrap(), 3.0);
        assert_eq!(z(&net, r1), 3.0);
        assert_eq!(z(&net, r2), 3.0);
        // headwaters have nothing upstream to compare with
        assert_eq!(z(&net, r3), 8.0);
    }

    #[test]
    fn low_headwater_propagates_down() {
        let mut net = ReachNetwork::new();
        let outlet_reach = add(&mut net, 10.0);
        let middle = add(&mut net, 12.0);
        let left = add(&mut net, 2.0);
        let right = add(&mut net, 20.0);
        net.set_downstream(middle, Some(outlet_reach)).unwrap();
        net.set_downstream(left, Some(middle)).unwrap();
        net.set_downstream(right, Some(middle)).unwrap();

        assert_eq!(make_river_gap(&mut net, outlet_reach).unwrap(), 2.0);
        assert_eq!(z(&net, middle), 2.0);
        assert_eq!(z(&net, right), 20.0);
    }

    #[test]
    fn already_monotone_network_is_unchanged() {
        let mut net = ReachNetwork::new();
        let a = add(&mut net, 1.0);
        let b = add(&mut net, 2.0);
        let c = add(&mut net, 3.0);
        net.set_downstream(b, Some(a)).unwrap();
        net.set_downstream(c, Some(b)).unwrap();

        assert_eq!(make_river_gap(&mut net, a).unwrap(), 1.0);
        assert_eq!((z(&net, a), z(&net, b), z(&net, c)), (1.0, 2.0, 3.0));
    }

    #[test]
    fn only_the_given_subtree_is_touched() {
        let mut net = ReachNetwork::new();
        let a = add(&mut net, 9.0);
        let b = add(&mut net, 5.0);
        let c = add(&mut net, 1.0);
        net.set_downstream(b, Some(a)).unwrap();
        net.set_downstream(c, Some(b)).unwrap();

        assert_eq!(make_river_gap(&mut net, b).unwrap(), 1.0);
        assert_eq!(z(&net, a), 9.0);
    }
}
