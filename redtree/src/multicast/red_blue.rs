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

//! # Red/Blue trees
//!
//! Recursive bipartition of the topology into rooted directed acyclic graphs. Each split produces
//! a *red* and a *blue* half that share as few links as possible, while both still reach every
//! node reachable from the root. Applying the split to every graph in the working set doubles the
//! number of graphs. After `ceil(log2(k))` rounds, the first `k` graphs are converted into
//! undirected multicast trees.
//!
//! The two phases use different types: The split operates on [`RootedDigraph`], and only the
//! conversion [`RootedDigraph::to_tree`] produces a [`MulticastTree`]. Hence, no directed graph
//! is ever returned to the caller.

use super::MulticastTree;
use crate::paths::{dijkstra, multi_source_dijkstra, ShortestPaths};
use crate::topology::{LinkId, LinkWeight, NodeId, Topology};
use crate::Error;

use log::*;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;

/// # Rooted directed graph
/// Directed subgraph of the topology, where every arc is labelled with the link of the topology
/// it belongs to.
#[derive(Debug, Clone)]
pub struct RootedDigraph {
    root: NodeId,
    graph: DiGraphMap<NodeId, LinkId>,
}

impl RootedDigraph {
    /// Create a graph containing only the root
    pub fn new(root: NodeId) -> Self {
        let mut graph = DiGraphMap::new();
        graph.add_node(root);
        Self { root, graph }
    }

    /// Create the directed version of the topology, where every link is replaced by two arcs.
    pub fn from_topology(topo: &Topology, root: NodeId) -> Self {
        let mut g = Self::new(root);
        for n in topo.node_ids() {
            g.graph.add_node(n);
        }
        for e in topo.link_ids() {
            if let Some((a, b)) = topo.link_endpoints(e) {
                g.graph.add_edge(a, b, e);
                g.graph.add_edge(b, a, e);
            }
        }
        g
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Underlying directed graph
    pub fn graph(&self) -> &DiGraphMap<NodeId, LinkId> {
        &self.graph
    }

    /// Add an arc from `a` to `b`, belonging to the link `e`.
    pub fn add_arc(&mut self, a: NodeId, b: NodeId, e: LinkId) {
        self.graph.add_edge(a, b, e);
    }

    /// Number of arcs
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the node is part of the graph
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }

    /// Returns the set of topology links used by any arc.
    pub fn links(&self) -> BTreeSet<LinkId> {
        self.graph.all_edges().map(|(_, _, e)| *e).collect()
    }

    /// Returns true if the graph contains no directed cycle.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Shortest paths from the root, following the arcs. The cost of every arc is the metric of
    /// its link plus `extra(link)`.
    pub fn shortest_paths<F>(&self, topo: &Topology, metric: &str, extra: F) -> ShortestPaths
    where
        F: Fn(LinkId) -> LinkWeight,
    {
        dijkstra(self.root, |n| self.weighted_arcs(topo, metric, n, &extra))
    }

    /// Extract a Steiner arborescence rooted at the root and spanning all `destinations`, and drop
    /// the direction. Starting with the root alone, the destination closest to the current
    /// arborescence (following the arcs) is attached along its shortest path, until all
    /// destinations are covered.
    pub fn to_tree(
        &self,
        topo: &Topology,
        destinations: &[NodeId],
        metric: &str,
    ) -> Result<MulticastTree, Error> {
        let mut tree_nodes: Vec<NodeId> = vec![self.root];
        let mut in_tree: HashSet<NodeId> = tree_nodes.iter().copied().collect();
        let mut links: BTreeSet<LinkId> = BTreeSet::new();
        let mut remaining: Vec<NodeId> =
            destinations.iter().filter(|d| **d != self.root).copied().collect();

        while !remaining.is_empty() {
            let search = multi_source_dijkstra(&tree_nodes, |n| {
                self.weighted_arcs(topo, metric, n, |_| 0.0)
            });
            let mut closest: Option<(usize, LinkWeight)> = None;
            for (i, d) in remaining.iter().enumerate() {
                let dist = search.distance(*d).ok_or(Error::NoPath(self.root, *d))?;
                if closest.map(|(_, c)| dist < c).unwrap_or(true) {
                    closest = Some((i, dist));
                }
            }
            let d = match closest {
                Some((i, _)) => remaining.remove(i),
                None => break,
            };
            let path = search.path_to(d).ok_or(Error::NoPath(self.root, d))?;
            links.extend(search.links_to(d).ok_or(Error::NoPath(self.root, d))?);
            for n in path {
                if in_tree.insert(n) {
                    tree_nodes.push(n);
                }
            }
            trace!("Attached destination {:?} to the arborescence", d);
        }

        MulticastTree::from_links(topo, self.root, links)
    }

    /// Outgoing arcs of `n` as `(neighbor, link, cost)`.
    fn weighted_arcs<F>(
        &self,
        topo: &Topology,
        metric: &str,
        n: NodeId,
        extra: F,
    ) -> Vec<(NodeId, LinkId, LinkWeight)>
    where
        F: Fn(LinkId) -> LinkWeight,
    {
        self.graph
            .edges(n)
            .map(|(_, m, e)| (m, *e, topo.link(*e).metric(metric) + extra(*e)))
            .collect()
    }

    /// Build the arborescence of a shortest path search, containing all reachable nodes.
    fn from_search(root: NodeId, search: &ShortestPaths) -> Self {
        let mut g = Self::new(root);
        for n in search.settle_order() {
            g.graph.add_node(*n);
            if let Some((p, e)) = search.predecessor(*n) {
                g.graph.add_edge(p, *n, e);
            }
        }
        g
    }
}

/// Procedure splitting a rooted directed graph into a red and a blue rooted DAG, which share as
/// few links as possible, and in which every node of the input reachable from the root is still
/// reachable.
pub trait RedBlueSplit: Debug {
    /// Split the graph into the red and the blue half.
    fn split(
        &self,
        topo: &Topology,
        graph: &RootedDigraph,
        metric: &str,
    ) -> Result<(RootedDigraph, RootedDigraph), Error>;
}

/// # Arborescence split
///
/// 1. The red half starts with the shortest path arborescence from the root.
/// 2. The blue half starts with the shortest path arborescence, where all links of the red
///    arborescence are penalized by more than the weight of all links together. Hence, the blue
///    arborescence only reuses red links if there is no other way to reach a node.
/// 3. All remaining links are handed out alternately to the red and the blue half, but only in the
///    direction that follows the order in which the nodes were settled in the respective search.
///    This keeps both halves acyclic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArborescenceSplit;

impl RedBlueSplit for ArborescenceSplit {
    fn split(
        &self,
        topo: &Topology,
        graph: &RootedDigraph,
        metric: &str,
    ) -> Result<(RootedDigraph, RootedDigraph), Error> {
        let root = graph.root();

        let red_search = graph.shortest_paths(topo, metric, |_| 0.0);
        let mut red = RootedDigraph::from_search(root, &red_search);
        let red_links = red.links();

        let penalty: LinkWeight =
            graph.links().iter().map(|e| topo.link(*e).metric(metric)).sum::<LinkWeight>() + 1.0;
        let blue_search = graph.shortest_paths(topo, metric, |e| {
            if red_links.contains(&e) {
                penalty
            } else {
                0.0
            }
        });
        let mut blue = RootedDigraph::from_search(root, &blue_search);
        let blue_links = blue.links();

        let red_rank = rank(&red_search);
        let blue_rank = rank(&blue_search);
        let follows = |ranks: &HashMap<NodeId, usize>, a: NodeId, b: NodeId| {
            match (ranks.get(&a), ranks.get(&b)) {
                (Some(x), Some(y)) => x < y,
                _ => false,
            }
        };

        let mut assigned: HashSet<LinkId> = red_links.union(&blue_links).copied().collect();
        let mut arcs: Vec<(NodeId, NodeId, LinkId)> =
            graph.graph().all_edges().map(|(a, b, e)| (a, b, *e)).collect();
        arcs.sort();
        let mut red_turn = true;
        for (a, b, e) in arcs {
            if assigned.contains(&e) {
                continue;
            }
            let fits_red = follows(&red_rank, a, b);
            let fits_blue = follows(&blue_rank, a, b);
            let to_red = match (fits_red, fits_blue) {
                (true, true) => red_turn,
                (true, false) => true,
                (false, true) => false,
                (false, false) => continue,
            };
            if to_red {
                red.add_arc(a, b, e);
            } else {
                blue.add_arc(a, b, e);
            }
            assigned.insert(e);
            red_turn = !to_red;
        }

        let shared = red_links.intersection(&blue_links).count();
        debug!(
            "Split graph with {} arcs into red ({} arcs) and blue ({} arcs), sharing {} links",
            graph.arc_count(),
            red.arc_count(),
            blue.arc_count(),
            shared
        );
        Ok((red, blue))
    }
}

fn rank(search: &ShortestPaths) -> HashMap<NodeId, usize> {
    search.settle_order().iter().enumerate().map(|(i, n)| (*n, i)).collect()
}

/// Compute `k` trees by recursively splitting the topology with the given procedure. If `k` is not
/// a power of two, more graphs are generated than needed, and only the first `k` are kept.
pub fn red_blue_trees(
    topo: &Topology,
    source: NodeId,
    destinations: &[NodeId],
    k: usize,
    splitter: &dyn RedBlueSplit,
    metric: &str,
) -> Result<Vec<MulticastTree>, Error> {
    if !k.is_power_of_two() {
        warn!(
            "Requested {} redundant red-blue trees, but only powers of 2 are fully supported! \
             Slicing off tail end of results...",
            k
        );
    }
    let rounds = k.next_power_of_two().trailing_zeros();

    let mut graphs = vec![RootedDigraph::from_topology(topo, source)];
    for _ in 0..rounds {
        let mut this_round = Vec::with_capacity(graphs.len() * 2);
        for g in graphs.iter() {
            let (red, blue) = splitter.split(topo, g, metric)?;
            this_round.push(red);
            this_round.push(blue);
        }
        graphs = this_round;
    }
    graphs.truncate(k);

    graphs.iter().map(|g| g.to_tree(topo, destinations, metric)).collect()
}
