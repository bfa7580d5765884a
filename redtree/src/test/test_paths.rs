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

//! Tests of the path engine

use super::*;
use crate::example_topologies::{CliqueNet, ExampleTopology};
use crate::paths::*;
use crate::topology::DEFAULT_METRIC;
use crate::Error;

use assert_approx_eq::assert_approx_eq;
use maplit::hashset;
use std::collections::HashSet;

fn undirected(path: &[NodeId]) -> HashSet<(NodeId, NodeId)> {
    edges_for_path(path).into_iter().map(|(a, b)| if a < b { (a, b) } else { (b, a) }).collect()
}

#[test]
fn shortest_path_simple() {
    let t = get_test_topo();
    let p = shortest_path(&t, *A, *F, DEFAULT_METRIC).unwrap();
    assert_eq!(p, vec![*A, *B, *C, *F]);
    assert_approx_eq!(path_cost(&t, &p, DEFAULT_METRIC).unwrap(), 3.0);

    // b -- e and b -- a -- d -- e have the same cost, the first one found is kept.
    let p = shortest_path(&t, *B, *E, DEFAULT_METRIC).unwrap();
    assert_eq!(p, vec![*B, *E]);

    assert_eq!(shortest_path(&t, *A, *A, DEFAULT_METRIC).unwrap(), vec![*A]);
}

#[test]
fn shortest_path_disconnected() {
    let t = get_test_topo();
    match shortest_path(&t, *A, *Z, DEFAULT_METRIC) {
        Err(Error::NoPath(a, z)) => {
            assert_eq!(a, *A);
            assert_eq!(z, *Z);
        }
        r => panic!("unexpected result: {:?}", r),
    }
    assert!(shortest_path(&t, *A, 100.into(), DEFAULT_METRIC).is_err());
}

#[test]
fn shortest_path_other_metric() {
    let t = campus_topo();
    let s0 = t.get_node_id("s0").unwrap();
    let c0 = t.get_node_id("c0").unwrap();
    let c1 = t.get_node_id("c1").unwrap();
    let b1 = t.get_node_id("b1").unwrap();
    // c0 -- b1 has weight 2, and a latency of 5. All other links have latency 1.
    let p = shortest_path(&t, c0, b1, DEFAULT_METRIC).unwrap();
    assert_approx_eq!(path_cost(&t, &p, DEFAULT_METRIC).unwrap(), 2.0);
    assert_eq!(shortest_path(&t, c0, b1, "latency").unwrap(), vec![c0, c1, b1]);
    assert_eq!(shortest_path(&t, s0, b1, "latency").unwrap(), vec![s0, c1, b1]);
}

#[test]
fn shortest_paths_from_closest_source() {
    let t = get_test_topo();
    let search = multi_source_dijkstra(&[*A, *F], |n| {
        t.neighbors(n).map(|(m, e, l)| (m, e, l.weight)).collect::<Vec<_>>()
    });
    assert_eq!(search.sources(), &[*A, *F]);
    assert_eq!(&search.settle_order()[..2], &[*A, *F]);
    assert_eq!(search.path_to(*F), Some(vec![*F]));
    assert_eq!(search.path_to(*B), Some(vec![*A, *B]));
    assert_eq!(search.path_to(*C), Some(vec![*F, *C]));
    assert_eq!(search.path_to(*E), Some(vec![*F, *E]));
    assert_approx_eq!(search.distance(*E).unwrap(), 1.0);
    assert!(search.links_to(*A).unwrap().is_empty());
    assert!(!search.is_reachable(*Z));
}

#[test]
fn path_cost_of_non_adjacent_nodes() {
    let t = get_test_topo();
    assert_approx_eq!(path_cost(&t, &[*A], DEFAULT_METRIC).unwrap(), 0.0);
    assert_approx_eq!(path_cost(&t, &[], DEFAULT_METRIC).unwrap(), 0.0);
    match path_cost(&t, &[*A, *C], DEFAULT_METRIC) {
        Err(Error::NoPath(a, c)) => assert_eq!((a, c), (*A, *C)),
        r => panic!("unexpected result: {:?}", r),
    }
}

#[test]
fn edges_of_a_path() {
    assert!(edges_for_path(&[]).is_empty());
    assert!(edges_for_path(&[*A]).is_empty());
    assert_eq!(edges_for_path(&[*A, *B, *C]), vec![(*A, *B), (*B, *C)]);
}

#[test]
fn redundant_paths_disjoint() {
    let t = get_test_topo();
    let paths = k_redundant_paths(&t, *A, *F, 2, DEFAULT_METRIC).unwrap();
    assert_eq!(paths.len(), 2);
    for p in paths.iter() {
        assert_eq!(p.first(), Some(&*A));
        assert_eq!(p.last(), Some(&*F));
    }
    assert!(undirected(&paths[0]).is_disjoint(&undirected(&paths[1])));

    let inner_0: HashSet<NodeId> = paths[0][1..paths[0].len() - 1].iter().copied().collect();
    let inner_1: HashSet<NodeId> = paths[1][1..paths[1].len() - 1].iter().copied().collect();
    assert!(inner_0.is_disjoint(&inner_1));

    let nodes: HashSet<NodeId> = paths.iter().flatten().copied().collect();
    assert_eq!(nodes, hashset! {*A, *B, *C, *D, *E, *F});
}

#[test]
fn redundant_paths_sorted_by_cost() {
    let t = get_test_topo();
    for k in 1..=4 {
        let paths = k_redundant_paths(&t, *B, *F, k, DEFAULT_METRIC).unwrap();
        assert_eq!(paths.len(), k);
        let costs: Vec<f64> =
            paths.iter().map(|p| path_cost(&t, p, DEFAULT_METRIC).unwrap()).collect();
        for w in costs.windows(2) {
            assert!(w[0] <= w[1], "paths are not sorted: {:?}", costs);
        }
        assert_approx_eq!(costs[0], 2.0);
    }
}

#[test]
fn redundant_paths_single_equals_shortest() {
    let t = get_test_topo();
    for (s, d) in &[(*A, *F), (*B, *E), (*D, *C)] {
        let paths = k_redundant_paths(&t, *s, *d, 1, DEFAULT_METRIC).unwrap();
        assert_eq!(paths, vec![shortest_path(&t, *s, *d, DEFAULT_METRIC).unwrap()]);
    }
}

#[test]
fn redundant_paths_share_bridge() {
    let t = CliqueNet.topology();
    let s = t.get_node_id("s").unwrap();
    let n0 = t.get_node_id("0").unwrap();
    let d1 = t.get_node_id("d1").unwrap();

    // s is only connected to 0, so that link must be shared, but nothing else.
    let paths = k_redundant_paths(&t, s, d1, 2, DEFAULT_METRIC).unwrap();
    assert_eq!(paths.len(), 2);
    let shared: HashSet<_> =
        undirected(&paths[0]).intersection(&undirected(&paths[1])).copied().collect();
    assert_eq!(shared, hashset! {(s, n0)});

    // from 0, there are two disjoint paths
    let paths = k_redundant_paths(&t, n0, d1, 2, DEFAULT_METRIC).unwrap();
    assert!(undirected(&paths[0]).is_disjoint(&undirected(&paths[1])));
    for p in paths.iter() {
        assert_eq!(p.len(), 3);
    }
}

#[test]
fn redundant_paths_edge_cases() {
    let t = get_test_topo();
    assert_eq!(k_redundant_paths(&t, *C, *C, 3, DEFAULT_METRIC).unwrap(), vec![vec![*C]; 3]);
    match k_redundant_paths(&t, *A, *F, 0, DEFAULT_METRIC) {
        Err(Error::InvalidRedundancy) => {}
        r => panic!("unexpected result: {:?}", r),
    }
    for k in 1..=2 {
        match k_redundant_paths(&t, *A, *Z, k, DEFAULT_METRIC) {
            Err(Error::InsufficientConnectivity { from, to, required, found }) => {
                assert_eq!(from, *A);
                assert_eq!(to, *Z);
                assert_eq!(required, k);
                assert_eq!(found, 0);
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }
}

#[test]
fn multi_source_paths() {
    let t = get_test_topo();
    let paths = multi_source_disjoint_paths(&t, &[*C, *D], *A, DEFAULT_METRIC).unwrap();
    assert_eq!(paths, vec![vec![*C, *B, *A], vec![*D, *A]]);

    let paths = multi_source_disjoint_paths(&t, &[*C, *A, *C], *A, DEFAULT_METRIC).unwrap();
    assert_eq!(paths, vec![vec![*C, *B, *A], vec![*A], vec![*C, *B, *A]]);

    assert!(multi_source_disjoint_paths(&t, &[*C, *Z], *A, DEFAULT_METRIC).is_err());
}

#[test]
fn merge_at_shared_endpoint() {
    let p1 = vec![*A, *B, *C];
    let p2 = vec![*C, *F, *E];
    let merged = merge_paths(&p1, &p2).unwrap();
    assert_eq!(merged, vec![*A, *B, *C, *F, *E]);
    assert_eq!(merged.len(), p1.len() + p2.len() - 1);

    let expected: HashSet<_> = undirected(&p1).union(&undirected(&p2)).copied().collect();
    assert_eq!(undirected(&merged), expected);
}

#[test]
fn merge_reverses_second_path() {
    let p1 = vec![*A, *B, *C];
    // end1 == end2
    assert_eq!(merge_paths(&p1, &[*E, *F, *C]).unwrap(), vec![*A, *B, *C, *F, *E]);
    // start1 == start2
    assert_eq!(merge_paths(&p1, &[*A, *D, *E]).unwrap(), vec![*E, *D, *A, *B, *C]);
    // start1 == end2
    assert_eq!(merge_paths(&p1, &[*E, *D, *A]).unwrap(), vec![*E, *D, *A, *B, *C]);
}

#[test]
fn merge_with_topology_paths() {
    let t = get_test_topo();
    let p1 = shortest_path(&t, *D, *B, DEFAULT_METRIC).unwrap();
    let p2 = shortest_path(&t, *B, *F, DEFAULT_METRIC).unwrap();
    let merged = merge_paths(&p1, &p2).unwrap();
    assert!(merged.len() > 1);
    let edges = edges_for_path(&merged);
    assert_eq!(edges.len(), merged.len() - 1);
    let originals: HashSet<_> = undirected(&p1).union(&undirected(&p2)).copied().collect();
    for (a, b) in edges {
        assert!(t.link_between(a, b).is_some());
        assert!(originals.contains(&(a.min(b), a.max(b))));
    }
}

#[test]
fn merge_empty_and_disjoint() {
    let p = vec![*A, *B];
    assert_eq!(merge_paths(&[], &p).unwrap(), p);
    assert_eq!(merge_paths(&p, &[]).unwrap(), p);
    assert_eq!(merge_paths(&[], &[]).unwrap(), Vec::<NodeId>::new());
    match merge_paths(&[*A, *B, *C], &[*D, *E, *F]) {
        Err(Error::NoJoinPoint) => {}
        r => panic!("unexpected result: {:?}", r),
    }
    // shared inner node is no join point
    assert!(merge_paths(&[*A, *B, *C], &[*D, *B, *F]).is_err());
}
