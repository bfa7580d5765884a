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

//! Ring and grid topologies

use super::ExampleTopology;
use crate::topology::{NodeId, Topology};

/// # RingNet
///
/// Ring of `n` nodes `n0` to `n{n-1}`, where the weight of every link is 1. The source is `n0`,
/// and the destinations are the nodes at one third and two thirds of the ring.
#[derive(Debug, Clone, Copy)]
pub struct RingNet {
    /// Number of nodes in the ring
    pub n: usize,
}

impl Default for RingNet {
    fn default() -> Self {
        Self { n: 9 }
    }
}

impl ExampleTopology for RingNet {
    fn topology(&self) -> Topology {
        let mut t = Topology::new();
        let nodes: Vec<NodeId> = (0..self.n).map(|i| t.add_node(format!("n{}", i))).collect();
        for i in 0..self.n {
            t.add_link(nodes[i], nodes[(i + 1) % self.n], 1.0);
        }
        t
    }

    fn source(&self, _topo: &Topology) -> NodeId {
        NodeId::new(0)
    }

    fn destinations(&self, _topo: &Topology) -> Vec<NodeId> {
        let mut dests = vec![NodeId::new(self.n / 3), NodeId::new(2 * self.n / 3)];
        dests.retain(|d| d.index() != 0);
        dests.dedup();
        dests
    }
}

/// # GridNet
///
/// Grid with `width` columns and `height` rows, where node `r{row}c{col}` is connected to its
/// right and lower neighbor. Horizontal links have weight 1, vertical links have weight 2. The
/// source is the upper left corner `r0c0`, and the destinations are all nodes in the last row.
#[derive(Debug, Clone, Copy)]
pub struct GridNet {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Default for GridNet {
    fn default() -> Self {
        Self { width: 4, height: 4 }
    }
}

impl GridNet {
    fn id(&self, row: usize, col: usize) -> NodeId {
        NodeId::new(row * self.width + col)
    }
}

impl ExampleTopology for GridNet {
    fn topology(&self) -> Topology {
        let mut t = Topology::new();
        for row in 0..self.height {
            for col in 0..self.width {
                t.add_node(format!("r{}c{}", row, col));
            }
        }
        for row in 0..self.height {
            for col in 0..self.width {
                if col + 1 < self.width {
                    t.add_link(self.id(row, col), self.id(row, col + 1), 1.0);
                }
                if row + 1 < self.height {
                    t.add_link(self.id(row, col), self.id(row + 1, col), 2.0);
                }
            }
        }
        t
    }

    fn source(&self, _topo: &Topology) -> NodeId {
        self.id(0, 0)
    }

    fn destinations(&self, _topo: &Topology) -> Vec<NodeId> {
        if self.height < 2 {
            return (1..self.width).map(|col| self.id(0, col)).collect();
        }
        (0..self.width).map(|col| self.id(self.height - 1, col)).collect()
    }
}
