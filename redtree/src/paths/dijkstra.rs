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

//! Single-source shortest paths with predecessor tracking.
//!
//! The search is independent of the graph representation: The caller provides a closure returning
//! the successors of a node, together with the link that is used and its cost. This allows running
//! the same search on the topology with penalized weights and on directed sub-graphs.

use crate::topology::{LinkId, LinkWeight, NodeId, Path};

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Heap entry, ordered such that the `BinaryHeap` pops the smallest cost first. Ties are broken by
/// the node id, which makes the search deterministic.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: LinkWeight,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Result of a single-source shortest path search
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    sources: Vec<NodeId>,
    dist: HashMap<NodeId, LinkWeight>,
    pred: HashMap<NodeId, (NodeId, LinkId)>,
    order: Vec<NodeId>,
}

impl ShortestPaths {
    /// Sources of the search
    pub fn sources(&self) -> &[NodeId] {
        &self.sources
    }

    /// Distance to the node, or `None` if it is not reachable.
    pub fn distance(&self, node: NodeId) -> Option<LinkWeight> {
        self.dist.get(&node).copied()
    }

    /// Predecessor of the node on its shortest path, together with the link used.
    pub fn predecessor(&self, node: NodeId) -> Option<(NodeId, LinkId)> {
        self.pred.get(&node).copied()
    }

    /// All reachable nodes, in the order in which they were settled. The sources come first, and
    /// every node is settled after its predecessor.
    pub fn settle_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Returns true if the node is reachable from any source
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.dist.contains_key(&node)
    }

    /// Returns the shortest path from the closest source to `target`, or `None` if it is not
    /// reachable.
    pub fn path_to(&self, target: NodeId) -> Option<Path> {
        let mut path = vec![target];
        let mut current = target;
        if !self.is_reachable(target) {
            return None;
        }
        while let Some((prev, _)) = self.pred.get(&current) {
            current = *prev;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Returns the links of the shortest path from the closest source to `target`, starting at
    /// that source.
    pub fn links_to(&self, target: NodeId) -> Option<Vec<LinkId>> {
        let mut links = Vec::new();
        let mut current = target;
        if !self.is_reachable(target) {
            return None;
        }
        while let Some((prev, link)) = self.pred.get(&current) {
            links.push(*link);
            current = *prev;
        }
        links.reverse();
        Some(links)
    }
}

/// Run Dijkstra's algorithm starting at `source`. The closure `successors` returns all outgoing
/// links of a node as `(neighbor, link, cost)`. All costs must be non-negative.
pub fn dijkstra<F, I>(source: NodeId, successors: F) -> ShortestPaths
where
    F: FnMut(NodeId) -> I,
    I: IntoIterator<Item = (NodeId, LinkId, LinkWeight)>,
{
    multi_source_dijkstra(&[source], successors)
}

/// Run Dijkstra's algorithm starting at all `sources` simultaneously, each with distance zero. The
/// distance of a node is its distance to the closest source.
pub fn multi_source_dijkstra<F, I>(sources: &[NodeId], mut successors: F) -> ShortestPaths
where
    F: FnMut(NodeId) -> I,
    I: IntoIterator<Item = (NodeId, LinkId, LinkWeight)>,
{
    let mut dist: HashMap<NodeId, LinkWeight> = HashMap::new();
    let mut pred: HashMap<NodeId, (NodeId, LinkId)> = HashMap::new();
    let mut order: Vec<NodeId> = Vec::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    for source in sources {
        dist.insert(*source, 0.0);
        heap.push(HeapEntry { cost: 0.0, node: *source });
    }

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if !settled.insert(node) {
            continue;
        }
        order.push(node);
        for (next, link, link_cost) in successors(node) {
            if settled.contains(&next) {
                continue;
            }
            let next_cost = cost + link_cost;
            let better = match dist.get(&next) {
                Some(d) => next_cost < *d,
                None => true,
            };
            if better {
                dist.insert(next, next_cost);
                pred.insert(next, (node, link));
                heap.push(HeapEntry { cost: next_cost, node: next });
            }
        }
    }

    ShortestPaths { sources: sources.to_vec(), dist, pred, order }
}
