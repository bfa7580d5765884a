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

//! # Diverse-paths trees
//!
//! Builds `k` trees by computing `k` redundant paths to every destination, and adding each path to
//! one of the trees. Destinations are handled in increasing distance from the source. Each path is
//! added to the tree (not yet chosen for this destination) whose edges overlap the most with the
//! path, which keeps the trees small. Ties are broken by the lowest tree index. Hence, every
//! destination contributes exactly one path to every tree.
//!
//! The union of paths may contain cycles. Such subgraphs are repaired by computing a minimum
//! spanning subgraph and trimming all non-terminal leaves.

use super::tree::normalize;
use super::validate::repair;
use super::MulticastTree;
use crate::paths::{edges_for_path, k_redundant_paths, shortest_paths_from};
use crate::topology::{LinkWeight, NodeId, Path, Topology};
use crate::Error;

use log::*;
use std::collections::BTreeSet;

/// Compute `k` trees from `source` to all `destinations` by combining redundant paths.
pub fn diverse_path_trees(
    topo: &Topology,
    source: NodeId,
    destinations: &[NodeId],
    k: usize,
    metric: &str,
) -> Result<Vec<MulticastTree>, Error> {
    let search = shortest_paths_from(topo, source, metric);
    let mut ordered: Vec<(LinkWeight, NodeId)> = destinations
        .iter()
        .map(|d| search.distance(*d).map(|l| (l, *d)).ok_or(Error::NoPath(source, *d)))
        .collect::<Result<_, _>>()?;
    // stable, such that destinations with the same distance keep the requested order
    ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut trees: Vec<BTreeSet<(NodeId, NodeId)>> = vec![BTreeSet::new(); k];

    for (_, d) in ordered {
        let paths = k_redundant_paths(topo, source, d, k, metric)?;
        assign_paths(&mut trees, &paths);
    }

    let mut results = Vec::with_capacity(k);
    for (i, edges) in trees.into_iter().enumerate() {
        let tree = MulticastTree::from_edges(topo, source, edges)?;
        if tree.is_tree() {
            results.push(tree);
        } else {
            info!("non-tree mcast tree generated! Repairing tree {}", i);
            results.push(repair(&tree, source, destinations, metric)?);
        }
    }
    Ok(results)
}

/// Add every path to a different tree, choosing the tree with the largest overlap. Ties go to the
/// lowest tree index. Returns the chosen tree for every path.
fn assign_paths(trees: &mut [BTreeSet<(NodeId, NodeId)>], paths: &[Path]) -> Vec<usize> {
    let mut trees_left: Vec<usize> = (0..trees.len()).collect();
    let mut chosen = Vec::with_capacity(paths.len());
    for path in paths {
        if trees_left.is_empty() {
            break;
        }
        let edges: Vec<(NodeId, NodeId)> =
            edges_for_path(path).into_iter().map(|(a, b)| normalize(a, b)).collect();
        let mut best_pos = 0;
        let mut best_overlap = 0;
        for (pos, j) in trees_left.iter().enumerate() {
            let overlap = edges.iter().filter(|e| trees[*j].contains(e)).count();
            if overlap > best_overlap {
                best_overlap = overlap;
                best_pos = pos;
            }
        }
        let best_tree = trees_left.remove(best_pos);
        trace!("adding path {:?} to tree {} (overlap {})", path, best_tree, best_overlap);
        trees[best_tree].extend(edges);
        chosen.push(best_tree);
    }
    chosen
}

#[cfg(test)]
mod test {
    use super::*;

    fn n(i: u32) -> NodeId {
        i.into()
    }

    #[test]
    fn paths_without_overlap_fill_trees_in_order() {
        let mut trees = vec![BTreeSet::new(); 3];
        let paths = vec![vec![n(0), n(1)], vec![n(0), n(2)], vec![n(0), n(3)]];
        assert_eq!(assign_paths(&mut trees, &paths), vec![0, 1, 2]);
        assert!(trees[1].contains(&normalize(n(0), n(2))));
    }

    #[test]
    fn equal_overlap_prefers_lowest_tree() {
        let mut trees = vec![BTreeSet::new(); 3];
        trees[1].insert(normalize(n(0), n(1)));
        trees[2].insert(normalize(n(0), n(1)));
        let paths = vec![vec![n(0), n(1), n(4)], vec![n(0), n(1), n(5)], vec![n(0), n(6)]];
        // both trees 1 and 2 overlap by one edge; tree 1 wins, then tree 2 is the only overlap
        assert_eq!(assign_paths(&mut trees, &paths), vec![1, 2, 0]);
    }

    #[test]
    fn larger_overlap_wins() {
        let mut trees = vec![BTreeSet::new(); 2];
        trees[0].insert(normalize(n(0), n(1)));
        trees[1].insert(normalize(n(0), n(1)));
        trees[1].insert(normalize(n(1), n(2)));
        let paths = vec![vec![n(0), n(1), n(2)], vec![n(0), n(3), n(2)]];
        assert_eq!(assign_paths(&mut trees, &paths), vec![1, 0]);
    }
}
