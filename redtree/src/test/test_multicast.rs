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

//! Tests of the multicast tree builder

use super::*;
use crate::example_topologies::{CliqueNet, ExampleTopology};
use crate::multicast::validate::is_valid_tree;
use crate::multicast::*;
use crate::topology::{printer, DEFAULT_METRIC};
use crate::Error;

use assert_approx_eq::assert_approx_eq;
use maplit::hashset;
use std::collections::HashSet;

fn all_algorithms() -> Vec<TreeAlgorithm> {
    vec![
        TreeAlgorithm::Steiner { penalty: PenaltyPolicy::Max },
        TreeAlgorithm::Steiner { penalty: PenaltyPolicy::Double },
        TreeAlgorithm::DiversePaths,
        TreeAlgorithm::RedBlue,
    ]
}

fn assert_valid(trees: &[MulticastTree], k: usize, source: NodeId, destinations: &[NodeId]) {
    assert_eq!(trees.len(), k);
    let mut terminals = destinations.to_vec();
    terminals.push(source);
    for tree in trees {
        assert_eq!(tree.root(), source);
        assert_eq!(tree.edge_count() + 1, tree.node_count());
        assert!(tree.is_connected());
        assert!(is_valid_tree(tree, &terminals), "invalid tree: {:?}", tree);
    }
}

/// External solver, returning the entire topology as a tree.
#[derive(Debug)]
struct EverythingSolver;

impl IlpSolver for EverythingSolver {
    fn solve(
        &self,
        topo: &Topology,
        source: NodeId,
        _destinations: &[NodeId],
        k: usize,
    ) -> Result<Vec<MulticastTree>, Error> {
        let tree = MulticastTree::from_links(topo, source, topo.link_ids())?;
        Ok(vec![tree; k])
    }
}

/// External solver, returning a single tree regardless of `k`.
#[derive(Debug)]
struct SingleTreeSolver;

impl IlpSolver for SingleTreeSolver {
    fn solve(
        &self,
        topo: &Topology,
        source: NodeId,
        destinations: &[NodeId],
        _k: usize,
    ) -> Result<Vec<MulticastTree>, Error> {
        let mut links = Vec::new();
        for d in destinations {
            let path = crate::paths::shortest_path(topo, source, *d, DEFAULT_METRIC)?;
            for (a, b) in crate::paths::edges_for_path(&path) {
                links.extend(topo.link_between(a, b).map(|(e, _)| e));
            }
        }
        Ok(vec![MulticastTree::from_links(topo, source, links)?])
    }
}

#[test]
fn clique_scenario() {
    let t = CliqueNet.topology();
    let s = t.get_node_id("s").unwrap();
    let n0 = t.get_node_id("0").unwrap();
    let n2 = t.get_node_id("2").unwrap();
    let n3 = t.get_node_id("3").unwrap();
    let d1 = t.get_node_id("d1").unwrap();
    let d2 = t.get_node_id("d2").unwrap();
    assert_eq!(CliqueNet.source(&t), s);
    assert_eq!(CliqueNet.destinations(&t), vec![d1, d2]);

    let p = crate::paths::shortest_path(&t, s, d1, DEFAULT_METRIC).unwrap();
    assert_eq!(p.len(), 4);
    assert_eq!(&p[..2], &[s, n0]);
    assert!(p[2] == n2 || p[2] == n3);
    assert_eq!(p[3], d1);

    let alg = TreeAlgorithm::from_name("diverse-paths", &[]).unwrap();
    let trees = build_redundant_trees(&t, s, &[d1, d2], 2, &alg, DEFAULT_METRIC).unwrap();
    assert_valid(&trees, 2, s, &[d1, d2]);
}

#[test]
fn all_algorithms_on_clique() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let builder = MulticastTreeBuilder::new();
    for alg in all_algorithms() {
        for k in 1..=4 {
            let trees = builder.build(&t, s, &dests, k, &alg).unwrap();
            assert_valid(&trees, k, s, &dests);
        }
    }
}

#[test]
fn all_algorithms_on_campus() {
    let t = campus_topo();
    let s0 = t.get_node_id("s0").unwrap();
    let builder = MulticastTreeBuilder::new();
    for alg in all_algorithms() {
        let trees = builder.build_by_name(&t, "s0", &["h1-b1", "h2-b2"], 2, &alg).unwrap();
        let dests = vec![t.get_node_id("h1-b1").unwrap(), t.get_node_id("h2-b2").unwrap()];
        assert_valid(&trees, 2, s0, &dests);
        // the cloud is never required
        let x0 = t.get_node_id("x0").unwrap();
        assert!(trees.iter().all(|tree| !tree.contains_node(x0)));
    }
}

#[test]
fn steiner_single_tree() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let builder = MulticastTreeBuilder::new();
    let tree = builder.build_multicast_tree(&t, s, &dests, &TreeAlgorithm::default()).unwrap();
    assert!(tree.is_tree());
    assert_approx_eq!(tree.cost(DEFAULT_METRIC), 5.0);
}

#[test]
fn steiner_trees_differ() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let n0 = t.get_node_id("0").unwrap();
    for penalty in &[PenaltyPolicy::Max, PenaltyPolicy::Double] {
        let alg = TreeAlgorithm::Steiner { penalty: *penalty };
        let trees = build_redundant_trees(&t, s, &dests, 2, &alg, DEFAULT_METRIC).unwrap();
        assert!(trees[0].shared_edges(&trees[1]) < trees[0].edge_count());
        // the link to the source cannot be avoided
        assert!(trees.iter().all(|tree| tree.contains_edge(s, n0)));
    }
}

#[test]
fn steiner_does_not_modify_topology() {
    let t = CliqueNet.topology();
    let before = t.metric_map(DEFAULT_METRIC);
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let alg = TreeAlgorithm::Steiner { penalty: PenaltyPolicy::Double };
    build_redundant_trees(&t, s, &dests, 3, &alg, DEFAULT_METRIC).unwrap();
    assert_eq!(t.metric_map(DEFAULT_METRIC), before);
}

#[test]
fn diverse_paths_use_distinct_trees() {
    let t = get_test_topo();
    let trees =
        build_redundant_trees(&t, *A, &[*F], 2, &TreeAlgorithm::DiversePaths, DEFAULT_METRIC)
            .unwrap();
    assert_valid(&trees, 2, *A, &[*F]);
    assert_eq!(trees[0].shared_edges(&trees[1]), 0);
    let nodes: HashSet<NodeId> = trees.iter().flat_map(|tree| tree.nodes()).collect();
    assert_eq!(nodes, hashset! {*A, *B, *C, *D, *E, *F});
}

#[test]
fn red_blue_not_power_of_two() {
    init_logging();
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let trees =
        build_redundant_trees(&t, s, &dests, 3, &TreeAlgorithm::RedBlue, DEFAULT_METRIC).unwrap();
    assert_valid(&trees, 3, s, &dests);
}

#[test]
fn red_blue_split() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let g = RootedDigraph::from_topology(&t, s);
    assert_eq!(g.arc_count(), 2 * t.link_count());
    assert!(!g.is_acyclic());

    let (red, blue) = ArborescenceSplit.split(&t, &g, DEFAULT_METRIC).unwrap();
    for half in &[&red, &blue] {
        assert!(half.is_acyclic());
        assert_eq!(half.root(), s);
        assert!(t.node_ids().all(|n| half.contains_node(n)));
        let search = half.shortest_paths(&t, DEFAULT_METRIC, |_| 0.0);
        assert!(t.node_ids().all(|n| search.is_reachable(n)));
    }
    // blue reaches d1 without the red link 2 -- d1
    let n2 = t.get_node_id("2").unwrap();
    let d1 = t.get_node_id("d1").unwrap();
    let (red_link, _) = t.link_between(n2, d1).unwrap();
    assert!(red.links().contains(&red_link));
    assert!(!blue.links().contains(&red_link));
    assert!(red.links().intersection(&blue.links()).count() < red.links().len());
}

/// Star of three destinations around the source, with a slightly more expensive hub that connects
/// all destinations cheaply.
fn hub_topo() -> (Topology, NodeId, Vec<NodeId>) {
    let mut t = Topology::new();
    let s = t.add_node("s");
    let hub = t.add_node("hub");
    let dests: Vec<NodeId> = (0..3).map(|i| t.add_node(format!("d{}", i))).collect();
    t.add_link(s, hub, 1.01);
    for d in dests.iter() {
        t.add_link(s, *d, 1.0);
        t.add_link(hub, *d, 0.01);
    }
    (t, s, dests)
}

#[test]
fn red_blue_extracts_steiner_tree() {
    let (t, s, dests) = hub_topo();
    let steiner =
        build_redundant_trees(&t, s, &dests, 1, &TreeAlgorithm::default(), DEFAULT_METRIC).unwrap();
    let red_blue =
        build_redundant_trees(&t, s, &dests, 1, &TreeAlgorithm::RedBlue, DEFAULT_METRIC).unwrap();
    assert_valid(&red_blue, 1, s, &dests);
    assert_approx_eq!(steiner[0].cost(DEFAULT_METRIC), 1.03);
    assert_approx_eq!(red_blue[0].cost(DEFAULT_METRIC), 1.03);
    assert!(red_blue[0].cost(DEFAULT_METRIC) <= 2.0 * steiner[0].cost(DEFAULT_METRIC));
    let hub = t.get_node_id("hub").unwrap();
    assert_eq!(red_blue[0].degree(hub), 3);
}

#[test]
fn invalid_requests() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);
    let builder = MulticastTreeBuilder::new();

    match builder.build(&t, s, &dests, 0, &TreeAlgorithm::DiversePaths) {
        Err(Error::InvalidRedundancy) => {}
        r => panic!("unexpected result: {:?}", r),
    }
    match builder.build(&t, 100.into(), &dests, 1, &TreeAlgorithm::DiversePaths) {
        Err(Error::TopologyError(_)) => {}
        r => panic!("unexpected result: {:?}", r),
    }
    assert!(builder.build_by_name(&t, "nope", &["d1"], 1, &TreeAlgorithm::RedBlue).is_err());
    match builder.build(&t, s, &dests, 2, &TreeAlgorithm::Ilp) {
        Err(Error::MissingDependency(name)) => assert_eq!(name, "ilp"),
        r => panic!("unexpected result: {:?}", r),
    }
}

#[test]
fn unknown_destinations_are_dropped() {
    init_logging();
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let d1 = t.get_node_id("d1").unwrap();
    let builder = MulticastTreeBuilder::new();
    for alg in all_algorithms() {
        let trees = builder.build(&t, s, &[d1, 100.into(), d1], 2, &alg).unwrap();
        assert_valid(&trees, 2, s, &[d1]);

        let trees = builder.build_by_name(&t, "s", &["d1", "unknown"], 2, &alg).unwrap();
        assert_valid(&trees, 2, s, &[d1]);
    }
}

#[test]
fn unreachable_destination() {
    let t = get_test_topo();
    for alg in all_algorithms() {
        assert!(build_redundant_trees(&t, *A, &[*F, *Z], 2, &alg, DEFAULT_METRIC).is_err());
    }
}

#[test]
fn external_solver() {
    init_logging();
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let dests = CliqueNet.destinations(&t);

    let builder = MulticastTreeBuilder::new().ilp_solver(Box::new(EverythingSolver));
    let trees = builder.build(&t, s, &dests, 2, &TreeAlgorithm::Ilp).unwrap();
    assert_valid(&trees, 2, s, &dests);

    // without validation, the result is passed through
    let builder = builder.validate(false);
    let trees = builder.build(&t, s, &dests, 2, &TreeAlgorithm::Ilp).unwrap();
    assert_eq!(trees.len(), 2);
    assert!(trees.iter().all(|tree| !tree.is_tree()));
    assert_eq!(trees[0].edge_count(), t.link_count());
}

#[test]
fn external_solver_with_too_few_trees() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let d2 = t.get_node_id("d2").unwrap();

    for validate in &[true, false] {
        let builder =
            MulticastTreeBuilder::new().ilp_solver(Box::new(SingleTreeSolver)).validate(*validate);
        let trees = builder.build(&t, s, &[d2], 1, &TreeAlgorithm::Ilp).unwrap();
        assert_valid(&trees, 1, s, &[d2]);
        match builder.build(&t, s, &[d2], 3, &TreeAlgorithm::Ilp) {
            Err(Error::InsufficientTrees { required: 3, found: 1 }) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }
}

#[test]
fn trees_in_other_metric() {
    let t = campus_topo();
    let s0 = t.get_node_id("s0").unwrap();
    let h1 = t.get_node_id("h1-b1").unwrap();
    let builder = MulticastTreeBuilder::new().metric("latency");
    assert_eq!(builder.get_metric(), "latency");
    let tree = builder.build_multicast_tree(&t, s0, &[h1], &TreeAlgorithm::default()).unwrap();
    // s0 -- c1 -- b1 -- f1-b1 -- h1-b1
    assert_eq!(tree.edge_count(), 4);
    assert_approx_eq!(tree.cost("latency"), 4.0);
}

#[test]
fn print_and_export_trees() {
    let t = CliqueNet.topology();
    let s = CliqueNet.source(&t);
    let d2 = t.get_node_id("d2").unwrap();
    let tree = MulticastTreeBuilder::new()
        .build_multicast_tree(&t, s, &[d2], &TreeAlgorithm::RedBlue)
        .unwrap();
    assert_eq!(printer::tree(&t, &tree).unwrap(), "root: s, edges: {0 -- 1, 0 -- s, 1 -- d2}");

    let data = tree.to_node_link(&t).unwrap();
    assert_eq!(data.nodes.len(), 4);
    assert_eq!(data.links.len(), 3);
    assert_eq!(data.graph.get("root"), Some(&serde_json::Value::from("s")));
}
