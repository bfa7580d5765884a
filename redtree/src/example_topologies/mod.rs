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

//! # Example Topologies
//!
//! Prepared topologies together with a multicast source and a set of destinations. They are used
//! by the tests and by the command line tool.
//!
//! In all example topologies, the source is the first node that is added, and has therefore the
//! index `0`.

use crate::topology::{NodeId, Topology};

mod cliquenet;
pub use cliquenet::CliqueNet;

mod regular;
pub use regular::{GridNet, RingNet};

mod randomnet;
pub use randomnet::RandomNet;

/// Prepared topology with a multicast scenario
pub trait ExampleTopology {
    /// Build the topology
    fn topology(&self) -> Topology;
    /// Multicast source
    fn source(&self, topo: &Topology) -> NodeId;
    /// Multicast destinations
    fn destinations(&self, topo: &Topology) -> Vec<NodeId>;
}

/// Returns the example topology with the given name, using its default parameters. Names are
/// `clique`, `ring`, `grid` and `random`.
pub fn by_name(name: &str) -> Option<Box<dyn ExampleTopology>> {
    match name {
        "clique" => Some(Box::new(CliqueNet)),
        "ring" => Some(Box::new(RingNet::default())),
        "grid" => Some(Box::new(GridNet::default())),
        "random" => Some(Box::new(RandomNet::default())),
        _ => None,
    }
}

/// Lookup all names, skipping names that do not exist.
fn lookup(topo: &Topology, names: &[&str]) -> Vec<NodeId> {
    names.iter().filter_map(|n| topo.get_node_id(n).ok()).collect()
}
