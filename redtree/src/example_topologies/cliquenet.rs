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

//! CliqueNet

use super::{lookup, ExampleTopology};
use crate::topology::{NodeId, Topology};

/// # CliqueNet
///
/// Four core nodes `0`, `1`, `2` and `3`, connected as a clique. The source `s` is attached to
/// `0`, the destination `d1` is attached to both `2` and `3`, and the destination `d2` is attached
/// to `1`. All links have weight 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliqueNet;

impl ExampleTopology for CliqueNet {
    fn topology(&self) -> Topology {
        let mut t = Topology::new();
        let s = t.add_node("s");
        let n0 = t.add_node("0");
        let n1 = t.add_node("1");
        let n2 = t.add_node("2");
        let n3 = t.add_node("3");
        let d1 = t.add_node("d1");
        let d2 = t.add_node("d2");

        t.add_link(n0, n1, 1.0);
        t.add_link(n0, n2, 1.0);
        t.add_link(n0, n3, 1.0);
        t.add_link(n1, n2, 1.0);
        t.add_link(n1, n3, 1.0);
        t.add_link(n2, n3, 1.0);
        t.add_link(n0, s, 1.0);
        t.add_link(n3, d1, 1.0);
        t.add_link(n2, d1, 1.0);
        t.add_link(n1, d2, 1.0);
        t
    }

    fn source(&self, _topo: &Topology) -> NodeId {
        NodeId::new(0)
    }

    fn destinations(&self, topo: &Topology) -> Vec<NodeId> {
        lookup(topo, &["d1", "d2"])
    }
}
