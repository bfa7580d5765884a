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

//! RandomNet

use super::ExampleTopology;
use crate::topology::{NodeId, Topology};

use rand::prelude::*;

/// # RandomNet
///
/// Random connected topology, generated from a fixed seed. The nodes `v0` to `v{n-1}` first form
/// a ring, and then `chords` additional links between random node pairs are added. Link weights
/// are integers between 1 and 9. The source is `v0`, and `destinations` distinct random nodes are
/// chosen as destinations.
#[derive(Debug, Clone, Copy)]
pub struct RandomNet {
    /// Number of nodes
    pub nodes: usize,
    /// Number of additional random links
    pub chords: usize,
    /// Number of destinations
    pub destinations: usize,
    /// Seed of the random number generator
    pub seed: u64,
}

impl Default for RandomNet {
    fn default() -> Self {
        Self { nodes: 20, chords: 15, destinations: 5, seed: 42 }
    }
}

impl RandomNet {
    /// Create a random topology with the given parameters
    pub fn new(nodes: usize, chords: usize, destinations: usize, seed: u64) -> Self {
        Self { nodes, chords, destinations, seed }
    }
}

impl ExampleTopology for RandomNet {
    fn topology(&self) -> Topology {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut t = Topology::new();
        let nodes: Vec<NodeId> = (0..self.nodes).map(|i| t.add_node(format!("v{}", i))).collect();
        if self.nodes < 2 {
            return t;
        }
        for i in 0..self.nodes {
            let w: u32 = rng.gen_range(1, 10);
            t.add_link(nodes[i], nodes[(i + 1) % self.nodes], w as f64);
        }
        for _ in 0..self.chords {
            let a: usize = rng.gen_range(0, self.nodes);
            let b: usize = rng.gen_range(0, self.nodes);
            let w: u32 = rng.gen_range(1, 10);
            if a != b {
                t.add_link(nodes[a], nodes[b], w as f64);
            }
        }
        t
    }

    fn source(&self, _topo: &Topology) -> NodeId {
        NodeId::new(0)
    }

    fn destinations(&self, topo: &Topology) -> Vec<NodeId> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let candidates: Vec<NodeId> = topo.node_ids().filter(|n| n.index() != 0).collect();
        candidates.choose_multiple(&mut rng, self.destinations).copied().collect()
    }
}
