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

//! # Path Engine
//!
//! Shortest paths, redundant paths with minimal component sharing, and helper functions to merge
//! paths and to decompose them into links. A path is an ordered sequence of [`NodeId`]s. A path
//! with a single node is degenerate and contains no links.
//!
//! ```rust
//! use redtree::paths::{edges_for_path, merge_paths, shortest_path};
//! use redtree::topology::{Topology, DEFAULT_METRIC};
//!
//! # fn main() -> Result<(), redtree::Error> {
//! let mut t = Topology::new();
//! let a = t.add_node("a");
//! let b = t.add_node("b");
//! let c = t.add_node("c");
//! t.add_link(a, b, 1.0);
//! t.add_link(b, c, 1.0);
//!
//! let p1 = shortest_path(&t, a, b, DEFAULT_METRIC)?;
//! let p2 = shortest_path(&t, b, c, DEFAULT_METRIC)?;
//! let merged = merge_paths(&p1, &p2)?;
//! assert_eq!(merged, vec![a, b, c]);
//! assert_eq!(edges_for_path(&merged), vec![(a, b), (b, c)]);
//! # Ok(())
//! # }
//! ```

pub mod dijkstra;
mod redundant;

pub use dijkstra::{dijkstra, multi_source_dijkstra, ShortestPaths};
pub use redundant::{k_redundant_paths, multi_source_disjoint_paths};

use crate::topology::{LinkId, LinkWeight, NodeId, Path, Topology};
use crate::Error;

use std::collections::HashMap;

/// Run Dijkstra on the topology, starting at `source`, using the given metric.
pub fn shortest_paths_from(topo: &Topology, source: NodeId, metric: &str) -> ShortestPaths {
    dijkstra(source, |n| {
        topo.neighbors(n).map(|(m, e, link)| (m, e, link.metric(metric))).collect::<Vec<_>>()
    })
}

/// Run Dijkstra on the topology, starting at `source`, using the weights in the map instead of
/// the weights stored in the topology. Links that are missing in the map use the default weight.
pub fn shortest_paths_with(
    topo: &Topology,
    source: NodeId,
    weights: &HashMap<LinkId, LinkWeight>,
) -> ShortestPaths {
    dijkstra(source, |n| {
        topo.neighbors(n)
            .map(|(m, e, link)| (m, e, weights.get(&e).copied().unwrap_or(link.weight)))
            .collect::<Vec<_>>()
    })
}

/// Returns the shortest path between `source` and `destination`, using the link metric with the
/// given name (missing values count as `1.0`). Fails with [`Error::NoPath`] if the two nodes are
/// not connected.
pub fn shortest_path(
    topo: &Topology,
    source: NodeId,
    destination: NodeId,
    metric: &str,
) -> Result<Path, Error> {
    topo.node(source)?;
    topo.node(destination)?;
    shortest_paths_from(topo, source, metric)
        .path_to(destination)
        .ok_or(Error::NoPath(source, destination))
}

/// Returns the total cost of a path. Fails with [`Error::NoPath`] if two consecutive nodes are
/// not connected.
pub fn path_cost(topo: &Topology, path: &[NodeId], metric: &str) -> Result<LinkWeight, Error> {
    edges_for_path(path)
        .into_iter()
        .map(|(a, b)| {
            topo.link_between(a, b).map(|(_, l)| l.metric(metric)).ok_or(Error::NoPath(a, b))
        })
        .sum()
}

/// Returns the links of the path as pairs of consecutive nodes. The result has
/// `max(0, len - 1)` elements.
pub fn edges_for_path(path: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    path.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Merge two paths at a shared endpoint. If one of the two paths is empty, the other one is
/// returned unchanged.
///
/// The join point is the first of the following pairs where both nodes are equal:
/// (end of `path1`, start of `path2`), (end of `path1`, end of `path2`),
/// (start of `path1`, start of `path2`), (start of `path1`, end of `path2`). The second path is
/// reversed if necessary, such that the result is a walk. Fails with [`Error::NoJoinPoint`] if
/// the two paths do not share an endpoint.
pub fn merge_paths(path1: &[NodeId], path2: &[NodeId]) -> Result<Path, Error> {
    let (first1, last1) = match (path1.first(), path1.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Ok(path2.to_vec()),
    };
    let (first2, last2) = match (path2.first(), path2.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Ok(path1.to_vec()),
    };

    let reversed2: Path = path2.iter().rev().copied().collect();
    let merged: Path = if last1 == first2 {
        path1.iter().chain(path2.iter().skip(1)).copied().collect()
    } else if last1 == last2 {
        path1.iter().chain(reversed2.iter().skip(1)).copied().collect()
    } else if first1 == first2 {
        reversed2.iter().chain(path1.iter().skip(1)).copied().collect()
    } else if first1 == last2 {
        path2.iter().chain(path1.iter().skip(1)).copied().collect()
    } else {
        return Err(Error::NoJoinPoint);
    };
    Ok(merged)
}
