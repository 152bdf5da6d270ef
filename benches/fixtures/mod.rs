// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeMap;

use netlayout::graph::Graph;
use netlayout::model::{Link, NodeId, RectId, Sign};
use netlayout::packing::{PackRequest, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagParams {
    pub layers: usize,
    pub nodes_per_layer: usize,
    pub fanout: usize,
    pub cross_edges_per_node: usize,
}

impl DagParams {
    pub const fn new(
        layers: usize,
        nodes_per_layer: usize,
        fanout: usize,
        cross_edges_per_node: usize,
    ) -> Self {
        Self { layers, nodes_per_layer, fanout, cross_edges_per_node }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> DagParams {
        match self {
            Self::Small => DagParams::new(6, 10, 2, 0),
            Self::MediumDense => DagParams::new(12, 20, 4, 1),
            Self::Large => DagParams::new(24, 35, 4, 2),
        }
    }
}

pub const CASES: [Case; 3] = [Case::Small, Case::MediumDense, Case::Large];

/// Layered network with node ids grouped by generating layer.
pub struct Network {
    pub layers: Vec<Vec<NodeId>>,
    pub links: Vec<Link>,
}

impl Network {
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.layers.iter().flatten()
    }

    pub fn graph(&self) -> Graph {
        Graph::new(self.nodes().cloned(), self.links.iter().cloned()).expect("valid graph")
    }

    pub fn first(&self) -> &NodeId {
        &self.layers[0][0]
    }

    pub fn last(&self) -> &NodeId {
        let last = self.layers.last().expect("non-empty");
        &last[last.len() - 1]
    }

    /// Column positions of two neighbouring generated layers.
    pub fn rows(&self, upper: usize) -> (BTreeMap<NodeId, i32>, BTreeMap<NodeId, i32>) {
        let columns = |layer: &[NodeId]| -> BTreeMap<NodeId, i32> {
            layer.iter().enumerate().map(|(col, id)| (id.clone(), col as i32)).collect()
        };
        (columns(&self.layers[upper]), columns(&self.layers[upper + 1]))
    }

    /// Links from layer `upper` straight into layer `upper + 1`.
    pub fn links_between(&self, upper: usize) -> Vec<Link> {
        let (row1, row2) = self.rows(upper);
        self.links
            .iter()
            .filter(|link| row1.contains_key(link.src()) && row2.contains_key(link.trg()))
            .cloned()
            .collect()
    }
}

fn node_id(layer: usize, idx: usize) -> NodeId {
    NodeId::new(format!("l{layer:02}_n{idx:04}")).expect("valid node id")
}

/// Deterministic layered DAG generator.
///
/// - All links go from lower to higher layers (acyclic by construction).
/// - Every third link is negative, the rest positive.
pub fn dag(params: DagParams) -> Network {
    assert!(params.layers >= 2, "layers must be >= 2");
    assert!(params.nodes_per_layer >= 1, "nodes_per_layer must be >= 1");
    assert!(params.fanout >= 1, "fanout must be >= 1");

    let layers = (0..params.layers)
        .map(|layer| (0..params.nodes_per_layer).map(|idx| node_id(layer, idx)).collect())
        .collect::<Vec<Vec<NodeId>>>();

    let mut links = Vec::new();
    let mut push = |from: &NodeId, to: &NodeId| {
        let sign = if links.len() % 3 == 2 { Sign::Negative } else { Sign::Positive };
        links.push(Link::signed(from.clone(), to.clone(), sign));
    };
    let fanout = params.fanout.min(params.nodes_per_layer);

    for layer in 0..params.layers.saturating_sub(1) {
        for idx in 0..params.nodes_per_layer {
            let from = &layers[layer][idx];
            for k in 0..fanout {
                // Shuffle targets so neighbouring rows start with crossings.
                let to_idx = (idx * 7 + k * 3) % params.nodes_per_layer;
                push(from, &layers[layer + 1][to_idx]);
            }

            if layer + 2 >= params.layers {
                continue;
            }
            let max_target_layers = params.layers - (layer + 2);
            for k in 0..params.cross_edges_per_node {
                let target_layer = layer + 2 + (k % max_target_layers);
                let to_idx = (idx + 1 + k.saturating_mul(3)) % params.nodes_per_layer;
                push(from, &layers[target_layer][to_idx]);
            }
        }
    }

    Network { layers, links }
}

pub fn fixture(case: Case) -> Network {
    dag(case.params())
}

/// A fixed hub with linked children plus a pile of loose rectangles.
pub fn pack_request(children: usize, loose: usize) -> PackRequest {
    let rid = |value: String| RectId::new(value).expect("valid rect id");
    let mut request = PackRequest::new().fix(rid("hub".to_owned()), Rect::new(0, 0, 120, 80));
    for idx in 0..children {
        let id = rid(format!("child{idx:04}"));
        let width = 30 + (idx % 5) as i32 * 10;
        request = request.float(id.clone(), width, 20).link(rid("hub".to_owned()), id);
    }
    for idx in 0..loose {
        let width = 10 + (idx % 7) as i32 * 6;
        let height = 10 + (idx % 4) as i32 * 8;
        request = request.float(rid(format!("loose{idx:04}")), width, height);
    }
    request
}

pub fn checksum_levels(levels: &BTreeMap<NodeId, usize>) -> u64 {
    let mut acc = 0u64;
    for (node, level) in levels {
        acc = acc.wrapping_mul(131).wrapping_add(node.as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(*level as u64);
    }
    acc
}
