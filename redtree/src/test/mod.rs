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

#[cfg(test)]
mod test_multicast;
#[cfg(test)]
mod test_paths;

use crate::topology::{NodeId, Topology};
use lazy_static::lazy_static;

lazy_static! {
    static ref A: NodeId = 0.into();
    static ref B: NodeId = 1.into();
    static ref C: NodeId = 2.into();
    static ref D: NodeId = 3.into();
    static ref E: NodeId = 4.into();
    static ref F: NodeId = 5.into();
    static ref Z: NodeId = 6.into();
}

/// # Test topology
///
/// ```text
/// a ---- b ---- c
/// |      |3     |
/// d ---- e ---- f      z
/// ```
///
/// All links have weight 1, except `b -- e`, which has weight 3. The node `z` is isolated.
fn get_test_topo() -> Topology {
    let mut t = Topology::new();

    assert_eq!(*A, t.add_node("a"));
    assert_eq!(*B, t.add_node("b"));
    assert_eq!(*C, t.add_node("c"));
    assert_eq!(*D, t.add_node("d"));
    assert_eq!(*E, t.add_node("e"));
    assert_eq!(*F, t.add_node("f"));
    assert_eq!(*Z, t.add_node("z"));

    t.add_link(*A, *B, 1.0);
    t.add_link(*B, *C, 1.0);
    t.add_link(*A, *D, 1.0);
    t.add_link(*B, *E, 3.0);
    t.add_link(*C, *F, 1.0);
    t.add_link(*D, *E, 1.0);
    t.add_link(*E, *F, 1.0);

    t
}

/// Show the log output of a test with `RUST_LOG`.
fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

fn campus_topo() -> Topology {
    let filename = format!("{}/test_files/campus.json", env!("CARGO_MANIFEST_DIR"));
    Topology::load_from_file(filename).unwrap()
}
