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

//! Module containing all type definitions of the graph model

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use serde_json::{Map, Value};
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// Link Identification (and index into the graph)
pub type LinkId = EdgeIndex<IndexType>;
/// Link Weight (or any other numeric link metric)
pub type LinkWeight = f64;
/// Ordered sequence of nodes. A path with a single node contains no links.
pub type Path = Vec<NodeId>;
/// Undirected graph holding the topology
pub type TopologyGraph = StableGraph<Node, Link, Undirected, IndexType>;

/// Name of the metric that refers to the `weight` field of a [`Link`].
pub const DEFAULT_METRIC: &str = "weight";
/// Weight of links that do not specify any weight, or any metric that is not present.
pub const DEFAULT_WEIGHT: LinkWeight = 1.0;

/// # Node of the topology
/// Every node is identified by a unique name. Any other field of the input document is kept in
/// `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique name of the node
    pub name: String,
    /// Auxiliary attributes
    pub attributes: Map<String, Value>,
}

impl Node {
    /// Create a new node without any attributes
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), attributes: Map::new() }
    }
}

/// # Undirected link of the topology
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Weight of the link, `1.0` if not specified.
    pub weight: LinkWeight,
    /// Auxiliary attributes
    pub attributes: Map<String, Value>,
}

impl Default for Link {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT)
    }
}

impl Link {
    /// Create a new link with the given weight and no attributes
    pub fn new(weight: LinkWeight) -> Self {
        Self { weight, attributes: Map::new() }
    }

    /// Returns the value of the given metric. The metric `"weight"` refers to the `weight` field.
    /// Any other metric is looked up in the attributes, and defaults to `1.0` if it is missing or
    /// not numeric.
    pub fn metric(&self, metric: &str) -> LinkWeight {
        if metric == DEFAULT_METRIC {
            self.weight
        } else {
            self.attributes.get(metric).and_then(Value::as_f64).unwrap_or(DEFAULT_WEIGHT)
        }
    }
}

/// Errors of the graph model
#[derive(Error, Debug)]
pub enum TopologyError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// The document is no valid node-link JSON
    #[error("Cannot parse the node-link document: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A link references a node which is not part of the document
    #[error("Link references an unknown node: {0}")]
    UnknownLinkEndpoint(String),
    /// The same node id appears twice in the document
    #[error("Node id is not unique: {0}")]
    DuplicateNode(String),
    /// Node is not present in the topology
    #[error("Node was not found in topology: {0:?}")]
    NodeNotFound(NodeId),
    /// Link is not present in the topology
    #[error("Link was not found in topology: {0:?}")]
    LinkNotFound(LinkId),
    /// Node name is not present in the topology
    #[error("Node name was not found in topology: {0}")]
    NodeNameNotFound(String),
}
