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

#![deny(missing_docs, missing_debug_implementations)]

//! # Topology
//!
//! In-memory undirected weighted graph, on which all path and tree computations operate. Every
//! node has a unique name, and every link has a weight (`1.0` by default) and an arbitrary set of
//! attributes.
//!
//! None of the algorithms in this crate modify the topology. Temporary state (penalized weights,
//! flow residuals) is always kept in separate maps, scoped to a single call.
//!
//! ```rust
//! use redtree::topology::Topology;
//!
//! let mut t = Topology::new();
//! let a = t.add_node("a");
//! let b = t.add_node("b");
//! let c = t.add_node("c");
//! t.add_link(a, b, 1.0);
//! t.add_link(b, c, 2.0);
//!
//! assert_eq!(t.node_count(), 3);
//! assert_eq!(t.get_node_id("b").unwrap(), b);
//! assert_eq!(t.link_between(b, c).unwrap().1.weight, 2.0);
//! ```

pub mod adapter;
pub mod node_link;
pub mod printer;
mod types;

pub use adapter::{NodeClass, NodeLinkFile, TopologyAdapter};
pub use node_link::{NodeLinkData, NodeLinkEdge, NodeLinkNode};
pub use types::{
    Link, LinkId, LinkWeight, Node, NodeId, Path, TopologyError, TopologyGraph, DEFAULT_METRIC,
    DEFAULT_WEIGHT,
};

use log::*;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// # Topology
/// Wrapper around the undirected graph, which keeps a lookup from the node names to their ids.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: TopologyGraph,
    names: HashMap<String, NodeId>,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self { graph: TopologyGraph::default(), names: HashMap::new() }
    }

    /// Add a new node to the topology, and return its id. If a node with the same name already
    /// exists, then the existing id is returned.
    pub fn add_node<S: Into<String>>(&mut self, name: S) -> NodeId {
        self.add_node_data(Node::new(name))
    }

    /// Add a node, including its attributes. If a node with the same name already exists, its
    /// attributes are replaced, and the existing id is returned.
    pub fn add_node_data(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.names.get(&node.name) {
            self.graph[*id] = node;
            return *id;
        }
        let name = node.name.clone();
        let id = self.graph.add_node(node);
        self.names.insert(name, id);
        id
    }

    /// Add an undirected link with the given weight. See [`Topology::add_link_data`].
    pub fn add_link(&mut self, a: NodeId, b: NodeId, weight: LinkWeight) -> Option<LinkId> {
        self.add_link_data(a, b, Link::new(weight))
    }

    /// Add an undirected link between `a` and `b`. The topology is a simple graph: If the two
    /// nodes are already connected, then the data of the existing link is replaced. Self-loops and
    /// links to unknown nodes are ignored, in which case `None` is returned.
    pub fn add_link_data(&mut self, a: NodeId, b: NodeId, link: Link) -> Option<LinkId> {
        if a == b {
            warn!("Ignoring self-loop on node {:?}", a);
            return None;
        }
        if !self.contains_node(a) || !self.contains_node(b) {
            warn!("Ignoring link between unknown nodes {:?} and {:?}", a, b);
            return None;
        }
        match self.graph.find_edge(a, b) {
            Some(e) => {
                self.graph[e] = link;
                Some(e)
            }
            None => Some(self.graph.add_edge(a, b, link)),
        }
    }

    /// Returns a reference to the underlying graph
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Returns the number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of links
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the node exists in the topology
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }

    /// Returns an iterator over all node ids, in increasing order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// Returns an iterator over all link ids, in increasing order.
    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.graph.edge_indices()
    }

    /// Returns the node data
    pub fn node(&self, node: NodeId) -> Result<&Node, TopologyError> {
        self.graph.node_weight(node).ok_or(TopologyError::NodeNotFound(node))
    }

    /// Returns the id of the node with the given name
    pub fn get_node_id(&self, name: impl AsRef<str>) -> Result<NodeId, TopologyError> {
        self.names
            .get(name.as_ref())
            .copied()
            .ok_or_else(|| TopologyError::NodeNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the name of the node
    pub fn get_node_name(&self, node: NodeId) -> Result<&str, TopologyError> {
        Ok(self.node(node)?.name.as_str())
    }

    /// Returns the link data. Panics if the link does not exist.
    pub fn link(&self, link: LinkId) -> &Link {
        &self.graph[link]
    }

    /// Returns the two endpoints of a link
    pub fn link_endpoints(&self, link: LinkId) -> Option<(NodeId, NodeId)> {
        self.graph.edge_endpoints(link)
    }

    /// Returns the link connecting `a` and `b`, if there is one.
    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<(LinkId, &Link)> {
        self.graph.find_edge(a, b).map(|e| (e, &self.graph[e]))
    }

    /// Returns all neighbors of `node`, together with the link connecting them.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, LinkId, &Link)> + '_ {
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other, e.id(), e.weight())
        })
    }

    /// Returns the value of the metric for every link in the topology. The map is owned by the
    /// caller and can be modified freely.
    pub fn metric_map(&self, metric: &str) -> HashMap<LinkId, LinkWeight> {
        self.graph.edge_indices().map(|e| (e, self.graph[e].metric(metric))).collect()
    }
}
