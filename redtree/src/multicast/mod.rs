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

//! # Multicast Tree Builder
//!
//! Computes `k` structurally diverse multicast trees, rooted at a source and spanning a set of
//! destinations. Four algorithms are available, see [`TreeAlgorithm`]:
//!
//! - **[`Steiner`](TreeAlgorithm::Steiner)**: Repeated Steiner tree approximation, where the links
//!   of every tree are penalized before computing the next one.
//! - **[`DiversePaths`](TreeAlgorithm::DiversePaths)**: Compute `k` redundant paths to every
//!   destination, and greedily distribute them among the trees.
//! - **[`RedBlue`](TreeAlgorithm::RedBlue)**: Recursively split the topology into red and blue
//!   directed acyclic graphs.
//! - **[`Ilp`](TreeAlgorithm::Ilp)**: Delegate to an external [`IlpSolver`].
//!
//! After the algorithm has finished, every tree is checked. Trees that are not valid are repaired
//! (see [`validate::repair`]). All returned trees are independent copies.
//!
//! ```rust
//! use redtree::multicast::{MulticastTreeBuilder, TreeAlgorithm};
//! use redtree::example_topologies::{CliqueNet, ExampleTopology};
//!
//! # fn main() -> Result<(), redtree::Error> {
//! let topo = CliqueNet.topology();
//! let source = CliqueNet.source(&topo);
//! let destinations = CliqueNet.destinations(&topo);
//!
//! let trees = MulticastTreeBuilder::new()
//!     .build(&topo, source, &destinations, 2, &TreeAlgorithm::DiversePaths)?;
//! assert_eq!(trees.len(), 2);
//! assert!(trees.iter().all(|t| t.is_tree()));
//! # Ok(())
//! # }
//! ```

mod diverse_paths;
mod ilp;
mod red_blue;
mod steiner;
mod tree;
pub mod validate;

pub use diverse_paths::diverse_path_trees;
pub use ilp::IlpSolver;
pub use red_blue::{red_blue_trees, ArborescenceSplit, RedBlueSplit, RootedDigraph};
pub use steiner::{redundant_steiner_trees, steiner_tree};
pub use tree::{MulticastTree, TreeGraph};

use crate::topology::{NodeId, Topology, DEFAULT_METRIC};
use crate::Error;

use log::*;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Policy used to penalize links of a Steiner tree before computing the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyPolicy {
    /// Add the maximum link weight of the topology to every used link.
    Max,
    /// Double the weight of every used link.
    Double,
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self::Max
    }
}

impl PenaltyPolicy {
    /// Parse the heuristic argument. Missing values select `Max`, unknown values select `Max` and
    /// log a warning.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("max") => Self::Max,
            Some("double") => Self::Double,
            Some(other) => {
                warn!(
                    "Unknown steiner tree edge penalty heuristic '{}'. Using max instead",
                    other
                );
                Self::Max
            }
        }
    }
}

/// # Multicast tree algorithm
/// Every variant carries its own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAlgorithm {
    /// Iterative-penalty Steiner trees
    Steiner {
        /// How to penalize the links of the previous trees
        penalty: PenaltyPolicy,
    },
    /// Trees assembled from redundant paths to every destination
    DiversePaths,
    /// Recursive red/blue bipartition
    RedBlue,
    /// External integer linear program
    Ilp,
}

impl Default for TreeAlgorithm {
    fn default() -> Self {
        Self::Steiner { penalty: PenaltyPolicy::Max }
    }
}

impl TreeAlgorithm {
    /// Parse the algorithm from its name, using `heuristic_args` to configure it. Only the first
    /// argument of the `steiner` algorithm is used (the penalty policy), all other arguments are
    /// ignored.
    pub fn from_name(name: &str, heuristic_args: &[&str]) -> Result<Self, Error> {
        match name {
            "steiner" => {
                let penalty = PenaltyPolicy::from_arg(heuristic_args.first().copied());
                Ok(Self::Steiner { penalty })
            }
            "diverse-paths" => Ok(Self::DiversePaths),
            "red-blue" => Ok(Self::RedBlue),
            "ilp" => Ok(Self::Ilp),
            _ => Err(Error::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Name of the algorithm, as accepted by [`TreeAlgorithm::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Steiner { .. } => "steiner",
            Self::DiversePaths => "diverse-paths",
            Self::RedBlue => "red-blue",
            Self::Ilp => "ilp",
        }
    }
}

impl fmt::Display for TreeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steiner { penalty: PenaltyPolicy::Double } => write!(f, "steiner (double)"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for TreeAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, &[])
    }
}

/// # Multicast Tree Builder
///
/// Configuration shared by all algorithms. The builder itself is never modified while computing
/// trees, and the topology is only read.
#[derive(Debug)]
pub struct MulticastTreeBuilder {
    metric: String,
    validate: bool,
    splitter: Box<dyn RedBlueSplit>,
    ilp: Option<Box<dyn IlpSolver>>,
}

impl Default for MulticastTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MulticastTreeBuilder {
    /// Create a builder using the `weight` metric, with post-validation enabled, the
    /// [`ArborescenceSplit`] and no ILP solver.
    pub fn new() -> Self {
        Self {
            metric: DEFAULT_METRIC.to_string(),
            validate: true,
            splitter: Box::new(ArborescenceSplit),
            ilp: None,
        }
    }

    /// Set the name of the link attribute used as weight.
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = metric.into();
        self
    }

    /// Enable or disable the post-validation (and repair) of all computed trees.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Replace the procedure used by the red/blue algorithm.
    pub fn splitter(mut self, splitter: Box<dyn RedBlueSplit>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Set the external ILP solver.
    pub fn ilp_solver(mut self, solver: Box<dyn IlpSolver>) -> Self {
        self.ilp = Some(solver);
        self
    }

    /// Returns the name of the configured metric
    pub fn get_metric(&self) -> &str {
        &self.metric
    }

    /// Compute `k` multicast trees, rooted at `source` and spanning all `destinations`.
    ///
    /// Destinations that are not part of the topology are dropped with a warning. The call either
    /// returns exactly `k` trees, or fails as a whole.
    pub fn build(
        &self,
        topo: &Topology,
        source: NodeId,
        destinations: &[NodeId],
        k: usize,
        algorithm: &TreeAlgorithm,
    ) -> Result<Vec<MulticastTree>, Error> {
        if k == 0 {
            return Err(Error::InvalidRedundancy);
        }
        topo.node(source)?;

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut dests: Vec<NodeId> = Vec::with_capacity(destinations.len());
        for d in destinations {
            if !topo.contains_node(*d) {
                warn!("Skipping unknown destination {:?}: not part of the topology", d);
            } else if *d != source && seen.insert(*d) {
                dests.push(*d);
            }
        }

        info!(
            "Computing {} multicast trees from {:?} to {} destinations using the {} algorithm",
            k,
            source,
            dests.len(),
            algorithm
        );

        let trees = match algorithm {
            TreeAlgorithm::Steiner { penalty } => {
                redundant_steiner_trees(topo, source, &dests, k, *penalty, &self.metric)?
            }
            TreeAlgorithm::DiversePaths => {
                diverse_path_trees(topo, source, &dests, k, &self.metric)?
            }
            TreeAlgorithm::RedBlue => {
                red_blue_trees(topo, source, &dests, k, self.splitter.as_ref(), &self.metric)?
            }
            TreeAlgorithm::Ilp => match &self.ilp {
                Some(solver) => solver.solve(topo, source, &dests, k)?,
                None => return Err(Error::MissingDependency(ilp::ILP_DEPENDENCY)),
            },
        };

        if trees.len() != k {
            return Err(Error::InsufficientTrees { required: k, found: trees.len() });
        }

        if !self.validate {
            return Ok(trees);
        }

        let mut terminals = dests.clone();
        terminals.push(source);
        trees
            .into_iter()
            .map(|tree| {
                if validate::check_tree(&tree, &terminals, algorithm.name()) {
                    Ok(tree)
                } else {
                    validate::repair(&tree, source, &dests, &self.metric)
                }
            })
            .collect()
    }

    /// Like [`MulticastTreeBuilder::build`], but source and destinations are given by name. Unknown
    /// destination names are dropped with a warning, and an unknown source name is an error.
    pub fn build_by_name(
        &self,
        topo: &Topology,
        source: &str,
        destinations: &[&str],
        k: usize,
        algorithm: &TreeAlgorithm,
    ) -> Result<Vec<MulticastTree>, Error> {
        let source = topo.get_node_id(source)?;
        let destinations: Vec<NodeId> = destinations
            .iter()
            .filter_map(|name| match topo.get_node_id(name) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Skipping unknown destination {}: not part of the topology", name);
                    None
                }
            })
            .collect();
        self.build(topo, source, &destinations, k, algorithm)
    }

    /// Compute a single multicast tree.
    pub fn build_multicast_tree(
        &self,
        topo: &Topology,
        source: NodeId,
        destinations: &[NodeId],
        algorithm: &TreeAlgorithm,
    ) -> Result<MulticastTree, Error> {
        self.build(topo, source, destinations, 1, algorithm)?
            .pop()
            .ok_or(Error::InvalidRedundancy)
    }
}

/// Compute `k` multicast trees with a default [`MulticastTreeBuilder`], using the given metric.
pub fn build_redundant_trees(
    topo: &Topology,
    source: NodeId,
    destinations: &[NodeId],
    k: usize,
    algorithm: &TreeAlgorithm,
    metric: &str,
) -> Result<Vec<MulticastTree>, Error> {
    MulticastTreeBuilder::new().metric(metric).build(topo, source, destinations, k, algorithm)
}
