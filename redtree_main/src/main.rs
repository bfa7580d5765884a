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

use redtree::example_topologies::{self, ExampleTopology};
use redtree::paths::k_redundant_paths;
use redtree::topology::{
    printer, NodeClass, NodeId, NodeLinkData, NodeLinkFile, Topology, TopologyAdapter,
    DEFAULT_METRIC,
};
use redtree::{MulticastTreeBuilder, TreeAlgorithm};

use clap::{Args, Parser, Subcommand};
use log::*;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    match args.cmd {
        MainCommand::Trees {
            topology,
            source,
            destinations,
            k,
            algorithm,
            heuristic_args,
            metric,
            json_filename,
        } => {
            let scenario = get_topo(&topology, source.as_deref(), &destinations)?;
            let heuristic_args: Vec<&str> = heuristic_args.iter().map(|s| s.as_str()).collect();
            let algorithm = TreeAlgorithm::from_name(&algorithm, &heuristic_args)?;

            info!(
                "Computing {} trees from {} using {}",
                k,
                scenario.topo.get_node_name(scenario.source)?,
                algorithm
            );
            let trees = MulticastTreeBuilder::new().metric(metric.as_str()).build(
                &scenario.topo,
                scenario.source,
                &scenario.destinations,
                k,
                &algorithm,
            )?;
            printer::print_trees(&scenario.topo, &trees)?;
            for (i, tree) in trees.iter().enumerate() {
                println!("tree {}: cost {}", i, tree.cost(&metric));
            }

            if let Some(filename) = json_filename {
                let data = trees
                    .iter()
                    .map(|t| t.to_node_link(&scenario.topo))
                    .collect::<Result<Vec<NodeLinkData>, _>>()?;
                std::fs::write(&filename, serde_json::to_string_pretty(&data)?)?;
                info!("Trees written to {}", filename);
            }
        }
        MainCommand::Paths { topology, source, destination, k, metric } => {
            let scenario = get_topo(&topology, Some(source.as_str()), &[])?;
            let destination = scenario.topo.get_node_id(&destination)?;
            let paths =
                k_redundant_paths(&scenario.topo, scenario.source, destination, k, &metric)?;
            println!("{}", printer::paths(&scenario.topo, &paths)?);
        }
    }

    Ok(())
}

/// Topology together with the multicast source and destinations
struct Scenario {
    topo: Topology,
    source: NodeId,
    destinations: Vec<NodeId>,
}

/// Load the topology, and resolve the source and destinations. If they are not given, the example
/// topology provides them. For node-link files, the first server is the default source, and all
/// hosts are the default destinations.
fn get_topo(
    selection: &TopologySelection,
    source: Option<&str>,
    destinations: &[String],
) -> Result<Scenario, Box<dyn Error>> {
    let selected = (&selection.topology, &selection.example);
    let (topo, default_source, default_destinations) = match selected {
        (Some(filename), _) => {
            let adapter = NodeLinkFile::new(filename.as_str());
            let topo = adapter.build_topology()?;
            info!(
                "Loaded {} with {} nodes ({} switches) and {} links",
                adapter.filename(),
                topo.node_count(),
                adapter.switches(&topo, true).len(),
                topo.link_count()
            );
            let servers = adapter.nodes_of_class(&topo, NodeClass::Server);
            let hosts = adapter.nodes_of_class(&topo, NodeClass::Host);
            (topo, servers.first().copied(), hosts)
        }
        (None, Some(name)) => {
            let example = example_topologies::by_name(name)
                .ok_or_else(|| format!("Unknown example topology: {}", name))?;
            let topo = example.topology();
            let s = example.source(&topo);
            let d = example.destinations(&topo);
            (topo, Some(s), d)
        }
        (None, None) => return Err("Either --topology or --example must be given".into()),
    };

    let source = match source {
        Some(name) => topo.get_node_id(name)?,
        None => default_source.ok_or("No multicast source given")?,
    };
    let destinations = if destinations.is_empty() {
        default_destinations
    } else {
        destinations
            .iter()
            .filter_map(|name| match topo.get_node_id(name) {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("Skipping unknown destination {}", name);
                    None
                }
            })
            .collect()
    };

    Ok(Scenario { topo, source, destinations })
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    /// Action to perform
    #[command(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Compute k redundant multicast trees
    #[command(name = "trees")]
    Trees {
        /// Topology to use
        #[command(flatten)]
        topology: TopologySelection,
        /// Name of the multicast source
        #[arg(short = 's', long)]
        source: Option<String>,
        /// Names of the multicast destinations
        #[arg(short = 'd', long = "destination")]
        destinations: Vec<String>,
        /// Number of redundant trees
        #[arg(short = 'k', long, default_value = "2")]
        k: usize,
        /// Algorithm: steiner, diverse-paths, red-blue or ilp
        #[arg(short = 'a', long, default_value = "steiner")]
        algorithm: String,
        /// Arguments for the algorithm, like the penalty policy (max or double) for steiner
        #[arg(long = "heuristic")]
        heuristic_args: Vec<String>,
        /// Link attribute used as weight
        #[arg(short = 'm', long, default_value = DEFAULT_METRIC)]
        metric: String,
        /// Store the trees as node-link data in a json file
        #[arg(long = "json")]
        json_filename: Option<String>,
    },
    /// Compute k redundant paths between two nodes
    #[command(name = "paths")]
    Paths {
        /// Topology to use
        #[command(flatten)]
        topology: TopologySelection,
        /// Name of the first node
        source: String,
        /// Name of the last node
        destination: String,
        /// Number of redundant paths
        #[arg(short = 'k', long, default_value = "2")]
        k: usize,
        /// Link attribute used as weight
        #[arg(short = 'm', long, default_value = DEFAULT_METRIC)]
        metric: String,
    },
}

#[derive(Args, Debug)]
struct TopologySelection {
    /// Node-link json file containing the topology
    #[arg(short = 't', long, conflicts_with = "example")]
    topology: Option<String>,
    /// Name of the example topology: clique, ring, grid or random
    #[arg(short = 'e', long)]
    example: Option<String>,
}
