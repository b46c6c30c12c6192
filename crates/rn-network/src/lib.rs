//! rn-network: reach network topology for rivernet.
//!
//! Provides:
//! - `ReachNetwork`, the arena owning reaches, outlets, cells and flow connections
//! - Topology management: downstream/upstream wiring with automatic Manning connections
//! - `ReachIterator`, a breadth-first upstream walk with cumulative channel distance
//! - Elevation gap correction over an upstream subtree
//! - Structural validation of the adjacency and connection invariants
//!
//! # Example
//!
//! ```
//! use rn_channel::Channel;
//! use rn_core::{Point, units::m};
//! use rn_network::ReachNetwork;
//!
//! let mut net = ReachNetwork::new();
//! let channel = Channel::rectangular(m(100.0), m(2.0)).unwrap();
//! let lower = net.create_reach("lower", Point::new(0.0, 0.0, 10.0), channel.clone(), false);
//! let upper = net.create_reach("upper", Point::new(0.0, 100.0, 12.0), channel, false);
//! net.set_downstream(upper, Some(lower)).unwrap();
//!
//! assert_eq!(net.get_root(upper).unwrap(), lower);
//! assert_eq!(net.reach(lower).unwrap().upstream_count(), 1);
//! net.validate().unwrap();
//! ```

pub mod cell;
pub mod connection;
pub mod error;
pub mod gap;
pub mod iter;
pub mod network;
pub mod outlet;
pub mod reach;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use cell::Cell;
pub use connection::{Connection, ConnectionSet, Endpoint};
pub use error::{NetworkError, NetworkResult};
pub use gap::make_river_gap;
pub use iter::ReachIterator;
pub use network::ReachNetwork;
pub use outlet::Outlet;
pub use reach::Reach;
