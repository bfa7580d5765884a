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

//! # Redundant paths
//!
//! Computes multiple paths with minimal component sharing by solving a min-cost flow problem on a
//! transformed network (Zheng et al., *Minimum-Cost Multiple Paths Subject to Minimum Link and
//! Node Sharing in a Network*). Every node `v` is split into `v_in -> v_out`, and every undirected
//! link becomes two arcs `u_out -> v_in` and `v_out -> u_in`. Each node and each arc has a single
//! unit of capacity at its base cost, and `k - 1` additional units at a penalized cost. The penalty
//! for sharing a link is larger than the penalty for sharing all nodes of a path, so link sharing
//! is minimized first, node sharing second, and the total weight third.
//!
//! The flow is computed with successive shortest paths (Bellman-Ford on the residual network),
//! one unit at a time, and finally decomposed into paths.

use super::path_cost;
use crate::topology::{LinkWeight, NodeId, Path, Topology};
use crate::Error;

use log::*;
use std::collections::{HashMap, VecDeque};

const EPSILON: LinkWeight = 1e-9;

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    cap: usize,
    cost: LinkWeight,
    /// index of the reverse arc in `arcs`
    rev: usize,
    /// Only forward arcs carry flow that is part of a path
    forward: bool,
}

/// Residual network used for the successive shortest path algorithm.
#[derive(Debug)]
struct FlowNetwork {
    arcs: Vec<Arc>,
    adj: Vec<Vec<usize>>,
    /// Topology node of each flow node, `None` for helper nodes.
    owner: Vec<Option<NodeId>>,
    /// Flow nodes `(in, out)` of each topology node
    split: HashMap<NodeId, (usize, usize)>,
}

impl FlowNetwork {
    /// Build the penalized network for `units` paths.
    fn new(topo: &Topology, units: usize, metric: &str) -> Self {
        let mut net =
            Self { arcs: Vec::new(), adj: Vec::new(), owner: Vec::new(), split: HashMap::new() };

        let total_weight: LinkWeight = topo.link_ids().map(|e| topo.link(e).metric(metric)).sum();
        let node_penalty = total_weight + 1.0;
        let link_penalty = node_penalty * (topo.node_count() as LinkWeight + 1.0);
        let extra = units.saturating_sub(1);

        for n in topo.node_ids() {
            let v_in = net.add_node(Some(n));
            let v_out = net.add_node(Some(n));
            net.split.insert(n, (v_in, v_out));
            net.add_arc(v_in, v_out, 1, 0.0);
            if extra > 0 {
                net.add_arc(v_in, v_out, extra, node_penalty);
            }
        }

        for e in topo.link_ids() {
            let (a, b) = match topo.link_endpoints(e) {
                Some(x) => x,
                None => continue,
            };
            let w = topo.link(e).metric(metric);
            for (u, v) in [(a, b), (b, a)].iter() {
                let u_out = net.split[u].1;
                let v_in = net.split[v].0;
                net.add_arc(u_out, v_in, 1, w);
                if extra > 0 {
                    net.add_arc(u_out, v_in, extra, w + link_penalty);
                }
            }
        }

        net
    }

    fn add_node(&mut self, owner: Option<NodeId>) -> usize {
        self.adj.push(Vec::new());
        self.owner.push(owner);
        self.adj.len() - 1
    }

    fn add_arc(&mut self, from: usize, to: usize, cap: usize, cost: LinkWeight) {
        let fwd = self.arcs.len();
        let bwd = fwd + 1;
        self.arcs.push(Arc { to, cap, cost, rev: bwd, forward: true });
        self.arcs.push(Arc { to: from, cap: 0, cost: -cost, rev: fwd, forward: false });
        self.adj[from].push(fwd);
        self.adj[to].push(bwd);
    }

    /// Find the cheapest augmenting path in the residual network using Bellman-Ford (queue based).
    /// Returns the arcs on the path, in order from `source` to `sink`.
    fn cheapest_augmenting_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        let n = self.adj.len();
        let mut dist: Vec<Option<LinkWeight>> = vec![None; n];
        let mut pred_arc: Vec<Option<usize>> = vec![None; n];
        let mut in_queue = vec![false; n];
        let mut queue = VecDeque::new();

        dist[source] = Some(0.0);
        queue.push_back(source);
        in_queue[source] = true;

        while let Some(u) = queue.pop_front() {
            in_queue[u] = false;
            let du = match dist[u] {
                Some(d) => d,
                None => continue,
            };
            for &a in self.adj[u].iter() {
                let arc = &self.arcs[a];
                if arc.cap == 0 {
                    continue;
                }
                let candidate = du + arc.cost;
                let better = match dist[arc.to] {
                    Some(d) => candidate < d - EPSILON,
                    None => true,
                };
                if better {
                    dist[arc.to] = Some(candidate);
                    pred_arc[arc.to] = Some(a);
                    if !in_queue[arc.to] {
                        in_queue[arc.to] = true;
                        queue.push_back(arc.to);
                    }
                }
            }
        }

        dist[sink]?;
        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let a = pred_arc[current]?;
            path.push(a);
            current = self.arcs[self.arcs[a].rev].to;
        }
        path.reverse();
        Some(path)
    }

    /// Push one unit of flow along the given arcs.
    fn augment(&mut self, path: &[usize]) {
        for &a in path {
            let rev = self.arcs[a].rev;
            self.arcs[a].cap -= 1;
            self.arcs[rev].cap += 1;
        }
    }

    /// Run successive shortest paths, pushing up to `units` units of flow. Returns the number of
    /// units that could be pushed.
    fn min_cost_flow(&mut self, source: usize, sink: usize, units: usize) -> usize {
        for pushed in 0..units {
            match self.cheapest_augmenting_path(source, sink) {
                Some(path) => self.augment(&path),
                None => return pushed,
            }
        }
        units
    }

    /// Flow on a forward arc, which is the residual capacity of its reverse arc.
    fn flow(&self, arc: usize) -> usize {
        self.arcs[self.arcs[arc].rev].cap
    }

    /// Decompose one unit of flow, starting at `start` (a flow node), into a path of topology
    /// nodes. The flow along the path is removed. Cycles in the walk are cut out.
    fn extract_path(
        &mut self,
        start: usize,
        sink: usize,
        used: &mut HashMap<usize, usize>,
    ) -> Path {
        let mut path: Path = Vec::new();
        let mut current = start;
        if let Some(n) = self.owner[current] {
            path.push(n);
        }
        while current != sink {
            let next_arc = self.adj[current].iter().copied().find(|a| {
                self.arcs[*a].forward && self.flow(*a) > *used.get(a).unwrap_or(&0)
            });
            let a = match next_arc {
                Some(a) => a,
                None => break,
            };
            *used.entry(a).or_insert(0) += 1;
            current = self.arcs[a].to;
            if let Some(n) = self.owner[current] {
                // every topology node has two flow nodes, only push it once
                if path.last() != Some(&n) {
                    if let Some(pos) = path.iter().position(|x| *x == n) {
                        path.truncate(pos + 1);
                    } else {
                        path.push(n);
                    }
                }
            }
        }
        path
    }
}

/// Computes `k` paths from `source` to `destination` with minimal link and node sharing, ordered
/// by non-decreasing total cost (according to `metric`). If `source` equals `destination`, then
/// `k` degenerate paths `[source]` are returned. For `k == 1`, this is the same as
/// [`shortest_path`](super::shortest_path).
pub fn k_redundant_paths(
    topo: &Topology,
    source: NodeId,
    destination: NodeId,
    k: usize,
    metric: &str,
) -> Result<Vec<Path>, Error> {
    if k == 0 {
        return Err(Error::InvalidRedundancy);
    }
    topo.node(source)?;
    topo.node(destination)?;
    if source == destination {
        return Ok(vec![vec![source]; k]);
    }
    if k == 1 {
        return match super::shortest_path(topo, source, destination, metric) {
            Ok(p) => Ok(vec![p]),
            Err(Error::NoPath(_, _)) => Err(Error::InsufficientConnectivity {
                from: source,
                to: destination,
                required: k,
                found: 0,
            }),
            Err(e) => Err(e),
        };
    }

    let mut net = FlowNetwork::new(topo, k, metric);
    let flow_source = net.split[&source].1;
    let flow_sink = net.split[&destination].0;

    let found = net.min_cost_flow(flow_source, flow_sink, k);
    if found < k {
        return Err(Error::InsufficientConnectivity {
            from: source,
            to: destination,
            required: k,
            found,
        });
    }

    let mut used: HashMap<usize, usize> = HashMap::new();
    let mut paths: Vec<(LinkWeight, Path)> = Vec::with_capacity(k);
    for _ in 0..k {
        let mut path = net.extract_path(flow_source, flow_sink, &mut used);
        if path.last() != Some(&destination) {
            path.push(destination);
        }
        let cost = path_cost(topo, &path, metric)?;
        paths.push((cost, path));
    }
    paths.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    debug!("Found {} redundant paths between {:?} and {:?}", k, source, destination);
    Ok(paths.into_iter().map(|(_, p)| p).collect())
}

/// Computes one path from each source to the common `target`, such that the paths share as few
/// links and nodes as possible. The paths are returned in the order of `sources`. Duplicate sources
/// receive the same path.
pub fn multi_source_disjoint_paths(
    topo: &Topology,
    sources: &[NodeId],
    target: NodeId,
    metric: &str,
) -> Result<Vec<Path>, Error> {
    topo.node(target)?;
    let mut unique: Vec<NodeId> = Vec::new();
    for s in sources {
        topo.node(*s)?;
        if !unique.contains(s) && *s != target {
            unique.push(*s);
        }
    }

    let mut net = FlowNetwork::new(topo, unique.len(), metric);
    let super_source = net.add_node(None);
    for s in unique.iter() {
        let s_out = net.split[s].1;
        net.add_arc(super_source, s_out, 1, 0.0);
    }
    let flow_sink = net.split[&target].0;

    let found = net.min_cost_flow(super_source, flow_sink, unique.len());
    if found < unique.len() {
        // find a source that is not connected to report it
        let from = unique
            .iter()
            .copied()
            .find(|s| super::shortest_path(topo, *s, target, metric).is_err())
            .unwrap_or(unique[0]);
        return Err(Error::NoPath(from, target));
    }

    let mut used: HashMap<usize, usize> = HashMap::new();
    let mut result: HashMap<NodeId, Path> = HashMap::new();
    for _ in 0..unique.len() {
        let mut path = net.extract_path(super_source, flow_sink, &mut used);
        if path.last() != Some(&target) {
            path.push(target);
        }
        if let Some(first) = path.first() {
            result.insert(*first, path);
        }
    }

    sources
        .iter()
        .map(|s| {
            if *s == target {
                Ok(vec![target])
            } else {
                result.get(s).cloned().ok_or(Error::NoPath(*s, target))
            }
        })
        .collect()
}
