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

//! # ILP boundary
//!
//! Trees computed by an integer linear program are not part of this crate. An external solver can
//! be plugged into the [`MulticastTreeBuilder`](super::MulticastTreeBuilder) by implementing
//! [`IlpSolver`]. Without a solver, requesting the `ilp` algorithm fails with
//! [`Error::MissingDependency`].

use super::MulticastTree;
use crate::topology::{NodeId, Topology};
use crate::Error;

use std::fmt::Debug;

/// External solver computing `k` redundant multicast trees.
pub trait IlpSolver: Debug {
    /// Compute `k` trees, rooted at `source` and spanning all `destinations`.
    fn solve(
        &self,
        topo: &Topology,
        source: NodeId,
        destinations: &[NodeId],
        k: usize,
    ) -> Result<Vec<MulticastTree>, Error>;
}

/// Name of the missing dependency, reported when no solver is configured.
pub const ILP_DEPENDENCY: &str = "ilp";
