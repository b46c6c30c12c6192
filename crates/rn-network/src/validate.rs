//! Network validation logic.

use std::collections::HashSet;

use rn_core::ReachId;

use crate::connection::Endpoint;
use crate::error::{NetworkError, NetworkResult};
use crate::network::ReachNetwork;
use crate::reach::Reach;

/// Validate adjacency and connections: both link directions agree, upstream
/// lists hold no duplicates, and every outflow has exactly one connection.
pub(crate) fn validate_network(network: &ReachNetwork) -> NetworkResult<()> {
    for (i, slot) in network.slots().iter().enumerate() {
        let Some(reach) = slot else { continue };
        let id = reach.id();

        // Handle recorded at creation must match the slot
        if id.index() as usize != i {
            return Err(inconsistent(id, "reach handle does not match its slot"));
        }

        validate_upstream(network, reach)?;
        validate_outflow(network, reach)?;
    }

    validate_connections(network)
}

fn validate_upstream(network: &ReachNetwork, reach: &Reach) -> NetworkResult<()> {
    let id = reach.id();
    let mut seen: HashSet<ReachId> = HashSet::new();
    for &up in reach.upstream() {
        if !seen.insert(up) {
            return Err(inconsistent(id, "duplicate upstream reach"));
        }
        let up_reach = network
            .slot(up)
            .ok_or_else(|| inconsistent(id, "upstream reach does not exist"))?;
        if up_reach.downstream() != Some(id) {
            return Err(inconsistent(
                id,
                "upstream reach drains somewhere else",
            ));
        }
    }
    Ok(())
}

fn validate_outflow(network: &ReachNetwork, reach: &Reach) -> NetworkResult<()> {
    let id = reach.id();
    let this = Endpoint::Reach(id);

    match (reach.downstream(), reach.outlet()) {
        (Some(_), Some(_)) => {
            return Err(inconsistent(id, "reach has both a downstream reach and an outlet"));
        }
        (Some(down), None) => {
            let down_reach = network
                .slot(down)
                .ok_or_else(|| inconsistent(id, "downstream reach does not exist"))?;
            if !down_reach.upstream().contains(&id) {
                return Err(inconsistent(
                    id,
                    "downstream reach does not list this reach upstream",
                ));
            }
            expect_one_connection(network, id, this, Endpoint::Reach(down))?;
        }
        (None, Some(outlet)) => {
            network.outlet(outlet)?;
            expect_one_connection(network, id, this, Endpoint::Outlet(outlet))?;
        }
        (None, None) => {}
    }
    Ok(())
}

fn validate_connections(network: &ReachNetwork) -> NetworkResult<()> {
    let mut pairs: HashSet<(Endpoint, Endpoint)> = HashSet::new();
    for conn in network.connections().iter() {
        let (upper, lower) = (conn.upper(), conn.lower());
        network.check_endpoint(upper)?;
        network.check_endpoint(lower)?;

        let key = if upper <= lower {
            (upper, lower)
        } else {
            (lower, upper)
        };
        if !pairs.insert(key) {
            return Err(inconsistent(
                reach_of(upper, lower),
                "endpoints bound by more than one connection",
            ));
        }

        // Reach-to-reach and outlet connections must mirror the topology
        match (upper, lower) {
            (Endpoint::Reach(a), Endpoint::Reach(b)) => {
                if network.slot(a).and_then(Reach::downstream) != Some(b) {
                    return Err(inconsistent(a, "stale connection to former downstream"));
                }
            }
            (Endpoint::Reach(a), Endpoint::Outlet(o))
            | (Endpoint::Outlet(o), Endpoint::Reach(a)) => {
                if network.slot(a).and_then(Reach::outlet) != Some(o) {
                    return Err(inconsistent(a, "stale connection to former outlet"));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn expect_one_connection(
    network: &ReachNetwork,
    reach: ReachId,
    a: Endpoint,
    b: Endpoint,
) -> NetworkResult<()> {
    let count = network
        .connections()
        .iter()
        .filter(|c| c.joins(a, b))
        .count();
    if count != 1 {
        return Err(inconsistent(reach, "outflow must have exactly one connection"));
    }
    Ok(())
}

fn reach_of(upper: Endpoint, lower: Endpoint) -> ReachId {
    match (upper, lower) {
        (Endpoint::Reach(id), _) | (_, Endpoint::Reach(id)) => id,
        (Endpoint::Outlet(id), _) | (Endpoint::SurfaceWater(id), _) => id,
    }
}

fn inconsistent(reach: ReachId, what: &'static str) -> NetworkError {
    NetworkError::Inconsistent { reach, what }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_channel::Channel;
    use rn_core::{Point, units::m};

    fn chain() -> (ReachNetwork, ReachId, ReachId) {
        let mut net = ReachNetwork::new();
        let channel = Channel::rectangular(m(10.0), m(1.0)).unwrap();
        let a = net.create_reach("a", Point::default(), channel.clone(), false);
        let b = net.create_reach("b", Point::default(), channel, false);
        net.set_downstream(b, Some(a)).unwrap();
        (net, a, b)
    }

    #[test]
    fn validate_empty_network() {
        assert!(validate_network(&ReachNetwork::new()).is_ok());
    }

    #[test]
    fn validate_consistent_chain() {
        let (net, _, _) = chain();
        assert!(validate_network(&net).is_ok());
    }

    #[test]
    fn detects_missing_back_edge() {
        let (mut net, a, b) = chain();
        net.reach_mut(a).unwrap().remove_upstream(b);
        let err = validate_network(&net).unwrap_err();
        assert_eq!(
            err,
            NetworkError::Inconsistent {
                reach: b,
                what: "downstream reach does not list this reach upstream"
            }
        );
    }

    #[test]
    fn detects_foreign_upstream_entry() {
        let (mut net, a, _) = chain();
        let c = net.create_reach(
            "c",
            Point::default(),
            Channel::rectangular(m(1.0), m(1.0)).unwrap(),
            false,
        );
        net.reach_mut(a).unwrap().add_upstream(c);
        assert!(matches!(
            validate_network(&net),
            Err(NetworkError::Inconsistent { reach, .. }) if reach == a
        ));
    }

    #[test]
    fn detects_missing_connection() {
        let (mut net, a, b) = chain();
        net.connections
            .disconnect(Endpoint::Reach(b), Endpoint::Reach(a));
        assert!(validate_network(&net).is_err());
    }

    #[test]
    fn detects_reversed_outlet_connection() {
        let (mut net, _, b) = chain();
        let sea = net.add_outlet("sea", Point::default());
        let law = rn_channel::Manning::kinematic(Channel::rectangular(m(1.0), m(1.0)).unwrap());
        net.connections
            .connect(Endpoint::Outlet(sea), Endpoint::Reach(b), Box::new(law));
        assert_eq!(
            validate_network(&net),
            Err(NetworkError::Inconsistent {
                reach: b,
                what: "stale connection to former outlet"
            })
        );
    }

    #[test]
    fn detects_stale_connection() {
        let (mut net, a, b) = chain();
        net.reach_mut(b).unwrap().downstream = None;
        net.reach_mut(a).unwrap().remove_upstream(b);
        assert_eq!(
            validate_network(&net),
            Err(NetworkError::Inconsistent {
                reach: b,
                what: "stale connection to former downstream"
            })
        );
    }
}
