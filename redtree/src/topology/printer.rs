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

//! # Helper (printer) functions for the Topology
//! Module containing helper functions to get formatted strings of paths and trees, with the names
//! of the nodes inserted.

use super::{NodeId, Topology, TopologyError};
use crate::multicast::MulticastTree;

use itertools::Itertools;

/// Returns the formatted string of a path, like `s -> 0 -> 3 -> d1`.
pub fn path(topo: &Topology, path: &[NodeId]) -> Result<String, TopologyError> {
    Ok(path.iter().map(|n| topo.get_node_name(*n)).collect::<Result<Vec<_>, _>>()?.join(" -> "))
}

/// Returns the formatted strings of a list of paths, one line per path.
pub fn paths(topo: &Topology, paths: &[Vec<NodeId>]) -> Result<String, TopologyError> {
    Ok(paths.iter().map(|p| path(topo, p)).collect::<Result<Vec<_>, _>>()?.join("\n"))
}

/// Returns the formatted string of an edge list, like `{s -- 0, 0 -- 3}`.
pub fn edges(topo: &Topology, edges: &[(NodeId, NodeId)]) -> Result<String, TopologyError> {
    let mut parts = Vec::with_capacity(edges.len());
    for (a, b) in edges {
        parts.push(format!("{} -- {}", topo.get_node_name(*a)?, topo.get_node_name(*b)?));
    }
    Ok(format!("{{{}}}", parts.join(", ")))
}

/// Returns the formatted string of a multicast tree, containing the root and all edges, sorted by
/// the node names.
pub fn tree(topo: &Topology, tree: &MulticastTree) -> Result<String, TopologyError> {
    let mut named_edges = Vec::with_capacity(tree.edge_count());
    for (a, b) in tree.edges() {
        let (a, b) = (topo.get_node_name(a)?, topo.get_node_name(b)?);
        named_edges.push(if a <= b { (a, b) } else { (b, a) });
    }
    named_edges.sort_unstable();
    Ok(format!(
        "root: {}, edges: {{{}}}",
        topo.get_node_name(tree.root())?,
        named_edges.iter().map(|(a, b)| format!("{} -- {}", a, b)).join(", ")
    ))
}

/// Print all trees, one line per tree.
pub fn print_trees(topo: &Topology, trees: &[MulticastTree]) -> Result<(), TopologyError> {
    for (i, t) in trees.iter().enumerate() {
        println!("tree {}: {}", i, tree(topo, t)?);
    }
    Ok(())
}
