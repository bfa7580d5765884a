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

//! # Steiner trees
//!
//! 2-approximation of the minimum Steiner tree using the metric closure (Kou, Markowsky and
//! Berman):
//!
//! 1. Compute the shortest paths between all pairs of terminals (the metric closure).
//! 2. Compute a minimum spanning tree of the closure.
//! 3. Replace every edge of that tree by the corresponding shortest path in the topology.
//! 4. Compute a minimum spanning tree of the resulting subgraph, and trim all non-terminal leaves.
//!
//! Redundant trees are generated by repeatedly computing a Steiner tree, and penalizing all links
//! of the tree before the next iteration. The penalized weights are kept in a map owned by the
//! call, the topology is never modified.

use super::validate::{minimum_spanning_edges, trim_leaves};
use super::{MulticastTree, PenaltyPolicy};
use crate::paths::shortest_paths_with;
use crate::topology::{LinkId, LinkWeight, NodeId, Topology, TopologyError};
use crate::Error;

use itertools::Itertools;
use log::*;
use std::collections::{BTreeSet, HashMap};

/// Compute an approximate Steiner tree connecting all `terminals`, rooted at `root`, where the
/// cost of each link is taken from `weights`. The root is always treated as a terminal.
pub fn steiner_tree(
    topo: &Topology,
    root: NodeId,
    terminals: &[NodeId],
    weights: &HashMap<LinkId, LinkWeight>,
) -> Result<MulticastTree, Error> {
    let terminals: BTreeSet<NodeId> =
        terminals.iter().copied().chain(std::iter::once(root)).collect();
    let terminals: Vec<NodeId> = terminals.into_iter().collect();
    if terminals.len() <= 1 {
        return Ok(MulticastTree::new(root));
    }

    // metric closure
    let searches: Vec<_> =
        terminals.iter().map(|t| shortest_paths_with(topo, *t, weights)).collect();
    let mut closure = Vec::new();
    for (i, j) in (0..terminals.len()).tuple_combinations() {
        let dist = searches[i]
            .distance(terminals[j])
            .ok_or(Error::NoPath(terminals[i], terminals[j]))?;
        closure.push((terminals[i], terminals[j], dist, (i, j)));
    }

    // expand the spanning tree of the closure into the topology
    let mut expanded: BTreeSet<LinkId> = BTreeSet::new();
    for (i, j) in minimum_spanning_edges(closure) {
        let links = searches[i]
            .links_to(terminals[j])
            .ok_or(Error::NoPath(terminals[i], terminals[j]))?;
        expanded.extend(links);
    }

    // spanning tree of the expanded subgraph
    let mut candidates = Vec::with_capacity(expanded.len());
    for e in expanded {
        let (a, b) = topo.link_endpoints(e).ok_or(TopologyError::LinkNotFound(e))?;
        let w = weights.get(&e).copied().unwrap_or_else(|| topo.link(e).weight);
        candidates.push((a, b, w, e));
    }
    let mut tree = MulticastTree::from_links(topo, root, minimum_spanning_edges(candidates))?;
    trim_leaves(&mut tree, root, &terminals);
    Ok(tree)
}

/// Compute `k` Steiner trees, spanning `source` and all `destinations`. For `k > 1`, the links of
/// every tree are penalized before computing the next tree, according to the `penalty` policy.
pub fn redundant_steiner_trees(
    topo: &Topology,
    source: NodeId,
    destinations: &[NodeId],
    k: usize,
    penalty: PenaltyPolicy,
    metric: &str,
) -> Result<Vec<MulticastTree>, Error> {
    let mut weights = topo.metric_map(metric);

    if k == 1 {
        return Ok(vec![steiner_tree(topo, source, destinations, &weights)?]);
    }

    let max_weight = weights.values().copied().fold(0.0, LinkWeight::max);

    let mut trees = Vec::with_capacity(k);
    for i in 0..k {
        let tree = steiner_tree(topo, source, destinations, &weights)?;
        for (a, b) in tree.edges() {
            if let Some((e, _)) = topo.link_between(a, b) {
                if let Some(w) = weights.get_mut(&e) {
                    match penalty {
                        PenaltyPolicy::Max => *w += max_weight,
                        PenaltyPolicy::Double => *w *= 2.0,
                    }
                }
            }
        }
        debug!("Steiner tree {} has {} edges", i, tree.edge_count());
        trees.push(tree);
    }
    Ok(trees)
}
