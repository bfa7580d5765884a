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

//! # Tree validation and repair
//!
//! Checks whether a computed subgraph is a valid multicast tree, and repairs subgraphs that are
//! almost trees (for instance the union of overlapping paths) by computing a minimum spanning
//! subgraph and trimming all leaves that are no terminals.

use super::MulticastTree;
use crate::topology::{LinkWeight, NodeId};
use crate::Error;

use log::*;
use petgraph::unionfind::UnionFind;
use std::collections::{HashMap, HashSet};

/// Returns true if the tree is acyclic, connected, and contains all nodes in `must_contain`.
pub fn is_valid_tree(tree: &MulticastTree, must_contain: &[NodeId]) -> bool {
    tree.is_tree() && must_contain.iter().all(|n| tree.contains_node(*n))
}

/// Repair a subgraph such that it becomes a tree. First, a minimum spanning subgraph is computed
/// (using the given metric). Then, all leaves that are neither the root nor a terminal are removed
/// repeatedly, until no such leaf remains.
///
/// The spanning subgraph keeps the connected components of the input. Hence, the repair only
/// fails (with [`Error::RepairFailed`]) if a terminal was not connected to the root in the input.
pub fn repair(
    tree: &MulticastTree,
    root: NodeId,
    terminals: &[NodeId],
    metric: &str,
) -> Result<MulticastTree, Error> {
    let mut repaired = minimum_spanning_subgraph(tree, metric);
    trim_leaves(&mut repaired, root, terminals);

    let reachable = repaired.reachable_from_root();
    if let Some(t) = terminals.iter().find(|t| !reachable.contains(*t)) {
        return Err(Error::RepairFailed(*t));
    }
    if !repaired.is_tree() {
        // Components without any terminal are trimmed entirely, so this cannot happen for a
        // connected input.
        let n = repaired.nodes().into_iter().find(|n| !reachable.contains(n)).unwrap_or(root);
        return Err(Error::RepairFailed(n));
    }
    Ok(repaired)
}

/// Compute a minimum spanning subgraph (a spanning forest if the input is disconnected). All nodes
/// of the input are kept.
pub fn minimum_spanning_subgraph(tree: &MulticastTree, metric: &str) -> MulticastTree {
    let edges: Vec<_> =
        tree.links().map(|(a, b, l)| (a, b, l.metric(metric), (a, b, l.clone()))).collect();
    let mut graph = tree.graph().clone();
    for (a, b) in tree.edges().collect::<Vec<_>>() {
        graph.remove_edge(a, b);
    }
    for (a, b, link) in minimum_spanning_edges(edges) {
        graph.add_edge(a, b, link);
    }
    MulticastTree::from_graph(tree.root(), graph)
}

/// Repeatedly remove all leaves (and isolated nodes) that are neither the root nor a terminal.
/// Returns the number of removed nodes.
pub fn trim_leaves(tree: &mut MulticastTree, root: NodeId, terminals: &[NodeId]) -> usize {
    let keep: HashSet<NodeId> = terminals.iter().copied().chain(std::iter::once(root)).collect();
    let mut removed = 0;
    loop {
        let leaves: Vec<NodeId> = tree
            .nodes()
            .into_iter()
            .filter(|n| !keep.contains(n) && tree.degree(*n) <= 1)
            .collect();
        if leaves.is_empty() {
            break;
        }
        debug!("trimming tree leaves: {:?}", leaves);
        removed += leaves.len();
        for n in leaves {
            tree.remove_node(n);
        }
    }
    removed
}

/// Kruskal's algorithm on an explicit edge list `(a, b, weight, data)`. Returns the data of all
/// edges in the minimum spanning forest, in order of increasing weight. Edges with equal weight
/// are considered in input order.
pub(crate) fn minimum_spanning_edges<T>(
    edges: impl IntoIterator<Item = (NodeId, NodeId, LinkWeight, T)>,
) -> Vec<T> {
    let mut edges: Vec<_> = edges.into_iter().collect();
    edges.sort_by(|x, y| x.2.partial_cmp(&y.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut index: HashMap<NodeId, usize> = HashMap::new();
    for (a, b, _, _) in edges.iter() {
        let next = index.len();
        index.entry(*a).or_insert(next);
        let next = index.len();
        index.entry(*b).or_insert(next);
    }

    let mut components: UnionFind<usize> = UnionFind::new(index.len());
    edges
        .into_iter()
        .filter(|(a, b, _, _)| components.union(index[a], index[b]))
        .map(|(_, _, _, data)| data)
        .collect()
}

/// Check a tree, and log a warning for every problem. Returns true if the tree is valid.
pub(crate) fn check_tree(tree: &MulticastTree, terminals: &[NodeId], algorithm: &str) -> bool {
    let mut valid = true;
    if !tree.is_connected() {
        warn!("disconnected multicast tree generated by {} algorithm!", algorithm);
        debug!("Edges are: {:?}", tree.edges().collect::<Vec<_>>());
        debug!("Nodes are: {:?}", tree.nodes());
        valid = false;
    } else if !tree.is_tree() {
        warn!("Non-tree multicast tree generated by {} algorithm!", algorithm);
        debug!("Edges are: {:?}", tree.edges().collect::<Vec<_>>());
        valid = false;
    }
    for t in terminals.iter().filter(|t| !tree.contains_node(**t)) {
        warn!(
            "Terminal {:?} is missing in the multicast tree generated by {} algorithm!",
            t, algorithm
        );
        valid = false;
    }
    valid
}
