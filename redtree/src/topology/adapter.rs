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

//! # Backend adapters
//!
//! A backend adapter knows how to acquire a topology (from a file, a controller, ...) and how to
//! classify its nodes. The path and tree algorithms never depend on an adapter, only on the
//! [`Topology`] it produces.

use super::{LinkId, NodeId, Topology, TopologyError};

/// Role of a node in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// End host
    Host,
    /// Server
    Server,
    /// Core switch (outside of buildings)
    Switch,
    /// Switch inside a building (other than the building router)
    BuildingSwitch,
    /// Cloud
    Cloud,
    /// Gateway to a cloud, which is also a switch
    CloudGateway,
    /// Node which cannot be classified
    Unknown,
}

/// Interface to a topology backend
pub trait TopologyAdapter {
    /// Acquire the topology from the backend.
    fn build_topology(&self) -> Result<Topology, TopologyError>;

    /// Classify a node by its name
    fn classify(&self, name: &str) -> NodeClass;

    /// Returns true if the node is a host
    fn is_host(&self, name: &str) -> bool {
        self.classify(name) == NodeClass::Host
    }

    /// Returns true if the node is a server
    fn is_server(&self, name: &str) -> bool {
        self.classify(name) == NodeClass::Server
    }

    /// Returns true if the node is a switch. Building switches are only considered if
    /// `include_building_switches` is set.
    fn is_switch(&self, name: &str, include_building_switches: bool) -> bool {
        match self.classify(name) {
            NodeClass::Switch | NodeClass::CloudGateway => true,
            NodeClass::BuildingSwitch => include_building_switches,
            _ => false,
        }
    }

    /// Returns true if the node is a cloud
    fn is_cloud(&self, name: &str) -> bool {
        self.classify(name) == NodeClass::Cloud
    }

    /// Returns true if the node is a gateway to a cloud
    fn is_cloud_gateway(&self, name: &str) -> bool {
        self.classify(name) == NodeClass::CloudGateway
    }

    /// Returns all nodes of the topology with the given class, in increasing order.
    fn nodes_of_class(&self, topo: &Topology, class: NodeClass) -> Vec<NodeId> {
        topo.node_ids()
            .filter(|n| {
                topo.get_node_name(*n).map(|name| self.classify(name) == class).unwrap_or(false)
            })
            .collect()
    }
}

/// # Node-link file adapter
///
/// Reads the topology from a node-link JSON file, and classifies nodes based on the first letter
/// of their name:
///
/// | prefix        | class                                 |
/// |---------------|---------------------------------------|
/// | `h`           | [`NodeClass::Host`]                   |
/// | `s`           | [`NodeClass::Server`]                 |
/// | `x`           | [`NodeClass::Cloud`]                  |
/// | `g`           | [`NodeClass::CloudGateway`]           |
/// | `c`, `d`, `b`, `m` | [`NodeClass::Switch`]            |
/// | `f`, `r`      | [`NodeClass::BuildingSwitch`]         |
#[derive(Debug, Clone)]
pub struct NodeLinkFile {
    filename: String,
}

impl NodeLinkFile {
    /// Create a new adapter reading from the given file
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into() }
    }

    /// Returns the filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns all switches, optionally excluding those within a building.
    pub fn switches(&self, topo: &Topology, include_building_switches: bool) -> Vec<NodeId> {
        topo.node_ids()
            .filter(|n| {
                topo.get_node_name(*n)
                    .map(|name| self.is_switch(name, include_building_switches))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Returns all links, optionally excluding those within a building. Unless
    /// `include_building_switches` is set, a link is only returned if one of its endpoints is a
    /// switch outside of a building. Link data is available with [`Topology::link`].
    pub fn links(&self, topo: &Topology, include_building_switches: bool) -> Vec<LinkId> {
        let is_core_switch = |n: NodeId| {
            topo.get_node_name(n).map(|name| self.is_switch(name, false)).unwrap_or(false)
        };
        topo.link_ids()
            .filter(|e| {
                include_building_switches
                    || topo
                        .link_endpoints(*e)
                        .map(|(a, b)| is_core_switch(a) || is_core_switch(b))
                        .unwrap_or(false)
            })
            .collect()
    }
}

impl TopologyAdapter for NodeLinkFile {
    fn build_topology(&self) -> Result<Topology, TopologyError> {
        Topology::load_from_file(&self.filename)
    }

    fn classify(&self, name: &str) -> NodeClass {
        match name.chars().next() {
            Some('h') => NodeClass::Host,
            Some('s') => NodeClass::Server,
            Some('x') => NodeClass::Cloud,
            Some('g') => NodeClass::CloudGateway,
            Some('c') | Some('d') | Some('b') | Some('m') => NodeClass::Switch,
            Some('f') | Some('r') => NodeClass::BuildingSwitch,
            _ => NodeClass::Unknown,
        }
    }
}
