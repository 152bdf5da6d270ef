// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::NodeId;
use super::link::{Link, Sign};
use crate::graph::Graph;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn link(src: &str, trg: &str) -> Link {
    Link::new(nid(src), nid(trg))
}

pub(crate) fn signed(src: &str, trg: &str, sign: Sign) -> Link {
    Link::signed(nid(src), nid(trg), sign)
}

pub(crate) fn links(pairs: &[(&str, &str)]) -> Vec<Link> {
    pairs.iter().map(|(src, trg)| link(src, trg)).collect()
}

pub(crate) fn graph(nodes: &[&str], pairs: &[(&str, &str)]) -> Graph {
    Graph::new(nodes.iter().map(|n| nid(n)), links(pairs)).expect("valid graph")
}

pub(crate) fn columns(entries: &[(&str, i32)]) -> BTreeMap<NodeId, i32> {
    entries.iter().map(|(node, col)| (nid(node), *col)).collect()
}

/// Endomesoderm-style diamond with a side branch:
/// `a -> b -> d`, `a -> c -> d`, `d -> e`, `c -> f`.
pub(crate) fn diamond_with_tail() -> Graph {
    graph(
        &["a", "b", "c", "d", "e", "f"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e"), ("c", "f")],
    )
}
