//! Network-specific error types.

use rn_channel::ChannelError;
use rn_core::{CellId, OutletId, ReachId, RnError};
use thiserror::Error;

use crate::connection::Endpoint;

/// Topology and traversal errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Reach {reach} does not exist")]
    ReachNotFound { reach: ReachId },

    #[error("Outlet {outlet} does not exist")]
    OutletNotFound { outlet: OutletId },

    #[error("Cell {cell} does not exist")]
    CellNotFound { cell: CellId },

    #[error("Upstream index {index} out of range for reach {reach} ({len} upstream reaches)")]
    UpstreamIndexOob {
        reach: ReachId,
        index: isize,
        len: usize,
    },

    #[error("No reaches in queue")]
    QueueEmpty,

    #[error("Setting reach {downstream} downstream of reach {reach} would close a cycle")]
    Cycle {
        reach: ReachId,
        downstream: ReachId,
    },

    #[error("Downstream chain starting at reach {reach} does not terminate")]
    UnterminatedChain { reach: ReachId },

    #[error("Connections between {upper} and {lower} follow the reach topology")]
    ManagedConnection { upper: Endpoint, lower: Endpoint },

    #[error("Inconsistent network at reach {reach}: {what}")]
    Inconsistent { reach: ReachId, what: &'static str },

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<NetworkError> for RnError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::UpstreamIndexOob { index, len, .. } => RnError::IndexOob {
                what: "upstream reach",
                index,
                len,
            },
            NetworkError::Channel(e) => e.into(),
            other => RnError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
