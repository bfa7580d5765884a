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

//! # Multicast Tree
//!
//! Undirected subgraph of the topology, rooted at the multicast source. Every tree owns copies of
//! the link data it contains, so no two trees share any mutable state with each other or with the
//! topology.

use crate::topology::node_link::export_link;
use crate::topology::{
    Link, LinkId, LinkWeight, NodeId, NodeLinkData, NodeLinkNode, Topology, TopologyError,
};
use crate::Error;

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Undirected tree graph, where the nodes are the ids of the topology.
pub type TreeGraph = UnGraphMap<NodeId, Link>;

/// # Multicast Tree
/// Undirected subgraph of the topology, containing at least the root. Use
/// [`MulticastTree::is_tree`] to check that it is actually a tree.
#[derive(Debug, Clone)]
pub struct MulticastTree {
    root: NodeId,
    graph: TreeGraph,
}

impl MulticastTree {
    /// Create a tree containing only the root.
    pub fn new(root: NodeId) -> Self {
        let mut graph = TreeGraph::new();
        graph.add_node(root);
        Self { root, graph }
    }

    /// Create the subgraph of the topology, spanned by the given links. The link data is copied.
    pub fn from_links(
        topo: &Topology,
        root: NodeId,
        links: impl IntoIterator<Item = LinkId>,
    ) -> Result<Self, Error> {
        let mut tree = Self::new(root);
        for e in links {
            let (a, b) = topo.link_endpoints(e).ok_or(TopologyError::LinkNotFound(e))?;
            tree.graph.add_edge(a, b, topo.link(e).clone());
        }
        Ok(tree)
    }

    /// Create the subgraph of the topology, spanned by the links between the given node pairs.
    /// Fails with [`Error::NoPath`] if two nodes of a pair are not linked.
    pub fn from_edges(
        topo: &Topology,
        root: NodeId,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self, Error> {
        let mut tree = Self::new(root);
        for (a, b) in edges {
            let (_, link) = topo.link_between(a, b).ok_or(Error::NoPath(a, b))?;
            tree.graph.add_edge(a, b, link.clone());
        }
        Ok(tree)
    }

    /// Create a tree from an existing graph, for instance from an external solver. The root is
    /// added if it is missing.
    pub fn from_graph(root: NodeId, mut graph: TreeGraph) -> Self {
        graph.add_node(root);
        Self { root, graph }
    }

    /// Root of the tree (multicast source)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Underlying undirected graph
    pub fn graph(&self) -> &TreeGraph {
        &self.graph
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns all nodes of the tree, in increasing order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.graph.nodes().collect();
        nodes.sort();
        nodes
    }

    /// Returns all edges of the tree. Every edge is reported once, with the smaller node first.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph.all_edges().map(|(a, b, _)| normalize(a, b))
    }

    /// Returns all edges together with the link data.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId, &Link)> + '_ {
        self.graph.all_edges()
    }

    /// Returns true if the node is part of the tree
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }

    /// Returns true if the tree contains an edge between `a` and `b`
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Number of edges incident to the node
    pub fn degree(&self, node: NodeId) -> usize {
        if self.graph.contains_node(node) {
            self.graph.neighbors(node).count()
        } else {
            0
        }
    }

    /// Sum of the metric over all edges
    pub fn cost(&self, metric: &str) -> LinkWeight {
        self.graph.all_edges().map(|(_, _, l)| l.metric(metric)).sum()
    }

    /// Number of edges present in both trees
    pub fn shared_edges(&self, other: &MulticastTree) -> usize {
        self.edges().filter(|(a, b)| other.contains_edge(*a, *b)).count()
    }

    /// Number of nodes present in both trees
    pub fn shared_nodes(&self, other: &MulticastTree) -> usize {
        self.graph.nodes().filter(|n| other.contains_node(*n)).count()
    }

    /// Returns true if all nodes can be reached from the root.
    pub fn is_connected(&self) -> bool {
        self.reachable_from_root().len() == self.graph.node_count()
    }

    /// Returns true if the graph is connected and has exactly `|nodes| - 1` edges.
    pub fn is_tree(&self) -> bool {
        self.graph.edge_count() + 1 == self.graph.node_count() && self.is_connected()
    }

    /// Returns the set of nodes reachable from the root
    pub fn reachable_from_root(&self) -> HashSet<NodeId> {
        let mut reachable = HashSet::new();
        if !self.graph.contains_node(self.root) {
            return reachable;
        }
        let mut bfs = Bfs::new(&self.graph, self.root);
        while let Some(n) = bfs.next(&self.graph) {
            reachable.insert(n);
        }
        reachable
    }

    /// Remove a node together with all incident edges
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        self.graph.remove_node(node);
    }

    /// Export the tree as node-link data. Node attributes are copied from the topology.
    pub fn to_node_link(&self, topo: &Topology) -> Result<NodeLinkData, TopologyError> {
        let nodes = self
            .nodes()
            .into_iter()
            .map(|n| {
                let node = topo.node(n)?;
                Ok(NodeLinkNode {
                    id: Value::String(node.name.clone()),
                    attributes: node.attributes.clone(),
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;
        let links = self.graph.all_edges().map(|(a, b, l)| export_link(topo, a, b, l)).collect();
        let mut graph = Map::new();
        graph.insert("root".to_string(), Value::String(topo.get_node_name(self.root)?.to_string()));
        Ok(NodeLinkData { directed: false, multigraph: false, graph, nodes, links })
    }
}

/// Order a node pair such that the smaller node comes first.
pub(crate) fn normalize(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
