// RedTree: Structurally Diverse Multicast Trees and Redundant Paths
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing all error types

use crate::topology::{NodeId, TopologyError};
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the topology
    #[error("Topology Error: {0}")]
    TopologyError(#[from] TopologyError),
    /// The two nodes are not connected
    #[error("No path exists between {0:?} and {1:?}")]
    NoPath(NodeId, NodeId),
    /// Fewer than the required number of paths could be found
    #[error("Only {found} of {required} paths found between {from:?} and {to:?}")]
    InsufficientConnectivity {
        /// Source node
        from: NodeId,
        /// Destination node
        to: NodeId,
        /// Requested number of paths
        required: usize,
        /// Number of paths that could be found
        found: usize,
    },
    /// Two non-empty paths cannot be merged, because they do not share an endpoint.
    #[error("The paths do not share any endpoint at which they could be joined")]
    NoJoinPoint,
    /// The requested multicast tree algorithm is not known
    #[error("Unsupported multicast tree algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// A required external routine is not available
    #[error("Required routine is not available: {0}")]
    MissingDependency(&'static str),
    /// The algorithm returned a different number of trees than requested
    #[error("Expected {required} multicast trees, but {found} were computed")]
    InsufficientTrees {
        /// Requested number of trees
        required: usize,
        /// Number of trees that were computed
        found: usize,
    },
    /// The redundancy factor must be at least 1
    #[error("The redundancy factor k must be at least 1")]
    InvalidRedundancy,
    /// A multicast tree could not be repaired, because the terminal is not connected to the root.
    #[error("Cannot repair the multicast tree: terminal {0:?} is not connected to the root")]
    RepairFailed(NodeId),
}
