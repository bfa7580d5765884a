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

#![deny(missing_docs)]

//! # RedTree: Structurally Diverse Multicast Trees and Redundant Paths
//! This is a library for computing sets of routes and multicast trees over a weighted network
//! topology, which share as few links and nodes as possible. Given a source, a set of destinations
//! and a redundancy factor `k`, it computes `k` paths or `k` multicast trees.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Topology`](topology)**: Undirected weighted graph on which all algorithms operate. See the
//!   main structure [`Topology`](topology::Topology). Topologies can be read from node-link JSON
//!   files, and the [`TopologyAdapter`](topology::TopologyAdapter) classifies the nodes.
//!
//! - **[`Paths`](paths)**: Shortest paths, `k` redundant paths with minimal link and node sharing
//!   (computed as a minimum cost flow), and helper functions to merge paths.
//!
//! - **[`Multicast`](multicast)**: Computes `k` diverse multicast trees, using one of the
//!   algorithms in [`TreeAlgorithm`](multicast::TreeAlgorithm). All computed trees are validated
//!   and repaired if necessary (see [`validate`](multicast::validate)).
//!
//! - **[`Example Topologies`](example_topologies)**: Prepared topologies with a multicast source
//!   and destinations.
//!
//! ## Usage
//!
//! ```rust
//! use redtree::example_topologies::{CliqueNet, ExampleTopology};
//! use redtree::paths::k_redundant_paths;
//! use redtree::topology::DEFAULT_METRIC;
//! use redtree::{build_redundant_trees, TreeAlgorithm};
//!
//! # fn main() -> Result<(), redtree::Error> {
//! let topo = CliqueNet.topology();
//! let s = topo.get_node_id("s")?;
//! let d1 = topo.get_node_id("d1")?;
//! let d2 = topo.get_node_id("d2")?;
//!
//! // two paths from 0 to d1, which share no link
//! let n0 = topo.get_node_id("0")?;
//! let paths = k_redundant_paths(&topo, n0, d1, 2, DEFAULT_METRIC)?;
//! assert_eq!(paths.len(), 2);
//!
//! // two multicast trees from s to d1 and d2
//! let alg = TreeAlgorithm::from_name("steiner", &["double"])?;
//! let trees = build_redundant_trees(&topo, s, &[d1, d2], 2, &alg, DEFAULT_METRIC)?;
//! assert_eq!(trees.len(), 2);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod example_topologies;
pub mod multicast;
pub mod paths;
pub mod topology;

pub use error::Error;
pub use multicast::{build_redundant_trees, MulticastTree, MulticastTreeBuilder, TreeAlgorithm};

#[cfg(test)]
mod test;
