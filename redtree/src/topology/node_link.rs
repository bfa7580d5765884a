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

//! Reads and writes topologies in the node-link JSON format:
//!
//! ```json
//! {"nodes": [{"id": "a"}, {"id": "b"}], "links": [{"source": "a", "target": "b", "weight": 2}]}
//! ```
//!
//! Links can either reference nodes by their id, or (as older exporters do) by the position of the
//! node in the `nodes` array. Any additional field of nodes and links is kept as an attribute.

use super::{Link, Node, NodeId, Topology, TopologyError, DEFAULT_WEIGHT};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::read_to_string;

/// Node-link document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData {
    /// Whether the graph is directed. Directed documents are read as undirected.
    #[serde(default)]
    pub directed: bool,
    /// Whether the graph is a multigraph. Parallel links are merged when reading.
    #[serde(default)]
    pub multigraph: bool,
    /// Graph attributes
    #[serde(default)]
    pub graph: Map<String, Value>,
    /// All nodes
    pub nodes: Vec<NodeLinkNode>,
    /// All links
    #[serde(alias = "edges")]
    pub links: Vec<NodeLinkEdge>,
}

/// Node entry of the node-link document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    /// Node id, either a string or a number
    pub id: Value,
    /// all other fields
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Link entry of the node-link document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    /// Id (or position) of the first node
    pub source: Value,
    /// Id (or position) of the second node
    pub target: Value,
    /// Link weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// all other fields
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Transform a node id into the name used in the topology. Strings are used as is, and any other
/// value is replaced by its JSON representation (such that the number `3` becomes `"3"`).
pub fn node_name(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        v => v.to_string(),
    }
}

impl Topology {
    /// Read the topology from a node-link JSON file.
    pub fn load_from_file(filename: impl AsRef<std::path::Path>) -> Result<Self, TopologyError> {
        let json = read_to_string(filename)?;
        Self::from_json_str(&json)
    }

    /// Read the topology from a node-link JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        let data: NodeLinkData = serde_json::from_str(json)?;
        Self::from_node_link(data)
    }

    /// Build the topology from node-link data.
    pub fn from_node_link(data: NodeLinkData) -> Result<Self, TopologyError> {
        let mut topo = Topology::new();
        let mut positions: Vec<NodeId> = Vec::with_capacity(data.nodes.len());

        for node in data.nodes {
            let name = node_name(&node.id);
            if topo.get_node_id(&name).is_ok() {
                return Err(TopologyError::DuplicateNode(name));
            }
            positions.push(topo.add_node_data(Node { name, attributes: node.attributes }));
        }

        for link in data.links {
            let source = resolve_endpoint(&topo, &positions, &link.source)?;
            let target = resolve_endpoint(&topo, &positions, &link.target)?;
            topo.add_link_data(
                source,
                target,
                Link { weight: link.weight.unwrap_or(DEFAULT_WEIGHT), attributes: link.attributes },
            );
        }

        Ok(topo)
    }

    /// Export the topology as node-link data.
    pub fn to_node_link(&self) -> NodeLinkData {
        let nodes = self
            .node_ids()
            .map(|n| {
                let node = &self.graph()[n];
                let id = Value::String(node.name.clone());
                NodeLinkNode { id, attributes: node.attributes.clone() }
            })
            .collect();
        let links = self
            .link_ids()
            .filter_map(|e| {
                let (a, b) = self.link_endpoints(e)?;
                Some(export_link(self, a, b, self.link(e)))
            })
            .collect();
        NodeLinkData { directed: false, multigraph: false, graph: Map::new(), nodes, links }
    }
}

/// Generate the link entry for an exported document.
pub(crate) fn export_link(topo: &Topology, a: NodeId, b: NodeId, link: &Link) -> NodeLinkEdge {
    let name = |n: NodeId| Value::String(topo.get_node_name(n).unwrap_or_default().to_string());
    NodeLinkEdge {
        source: name(a),
        target: name(b),
        weight: Some(link.weight),
        attributes: link.attributes.clone(),
    }
}

fn resolve_endpoint(
    topo: &Topology,
    positions: &[NodeId],
    id: &Value,
) -> Result<NodeId, TopologyError> {
    let name = node_name(id);
    if let Ok(node) = topo.get_node_id(&name) {
        return Ok(node);
    }
    id.as_u64()
        .and_then(|pos| positions.get(pos as usize))
        .copied()
        .ok_or(TopologyError::UnknownLinkEndpoint(name))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_with_campus_json() {
        let filename = format!("{}/test_files/campus.json", env!("CARGO_MANIFEST_DIR"));
        let t = Topology::load_from_file(filename).unwrap();

        assert_eq!(t.node_count(), 10);
        assert_eq!(t.link_count(), 12);

        let s0 = t.get_node_id("s0").unwrap();
        let c0 = t.get_node_id("c0").unwrap();
        let b1 = t.get_node_id("b1").unwrap();
        assert_approx_eq!(t.link_between(s0, c0).unwrap().1.weight, 1.0);
        assert_approx_eq!(t.link_between(c0, b1).unwrap().1.weight, 2.0);

        // extra fields are kept
        assert_eq!(t.node(s0).unwrap().attributes.get("kind"), Some(&Value::from("server")));
        let latency = t.link_between(c0, b1).unwrap().1.attributes.get("latency").cloned();
        assert_eq!(latency, Some(Value::from(5)));
    }

    #[test]
    fn numeric_ids_and_positions() {
        let json = r#"{
            "nodes": [{"id": 0}, {"id": 1}, {"id": "x"}],
            "links": [{"source": 0, "target": 1, "weight": 3.5}, {"source": 1, "target": 2}]
        }"#;
        let t = Topology::from_json_str(json).unwrap();
        let n0 = t.get_node_id("0").unwrap();
        let n1 = t.get_node_id("1").unwrap();
        let x = t.get_node_id("x").unwrap();
        assert_approx_eq!(t.link_between(n0, n1).unwrap().1.weight, 3.5);
        // "2" is no node id, so it is used as position into the nodes array
        assert_approx_eq!(t.link_between(n1, x).unwrap().1.weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn invalid_documents() {
        let json = r#"{"nodes": [{"id": "a"}, {"id": "a"}], "links": []}"#;
        match Topology::from_json_str(json) {
            Err(TopologyError::DuplicateNode(n)) => assert_eq!(n, "a"),
            r => panic!("unexpected result: {:?}", r),
        }

        let json = r#"{"nodes": [{"id": "a"}], "links": [{"source": "a", "target": "b"}]}"#;
        match Topology::from_json_str(json) {
            Err(TopologyError::UnknownLinkEndpoint(n)) => assert_eq!(n, "b"),
            r => panic!("unexpected result: {:?}", r),
        }

        assert!(matches!(Topology::from_json_str("{]"), Err(TopologyError::JsonError(_))));
    }

    #[test]
    fn export_and_read_back() {
        let json = r#"{
            "nodes": [{"id": "a", "color": "red"}, {"id": "b"}],
            "links": [{"source": "a", "target": "b", "weight": 2.0, "capacity": 10}]
        }"#;
        let t = Topology::from_json_str(json).unwrap();
        let t2 = Topology::from_node_link(t.to_node_link()).unwrap();
        let a = t2.get_node_id("a").unwrap();
        let b = t2.get_node_id("b").unwrap();
        assert_eq!(t2.node(a).unwrap().attributes.get("color"), Some(&Value::from("red")));
        let (_, link) = t2.link_between(a, b).unwrap();
        assert_approx_eq!(link.weight, 2.0);
        assert_approx_eq!(link.metric("capacity"), 10.0);
    }
}
