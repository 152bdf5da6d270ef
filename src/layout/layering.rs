// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;
use tracing::{debug, debug_span, trace};

use crate::config::LayeringConfig;
use crate::error::{AnalysisError, Result};
use crate::model::{Link, NodeId};

type LabelSet = SmallVec<[usize; 8]>;

/// Coffman–Graham style layering with a bounded layer width.
///
/// Nodes are labelled layer by layer from the initial grouping, then placed
/// from the sink side by descending label and the layer numbers are flipped
/// at the end so sources come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerAssigner {
    max_per_layer: usize,
    greedy: bool,
}

impl LayerAssigner {
    pub fn new(max_per_layer: usize, greedy: bool) -> Result<Self> {
        if max_per_layer == 0 {
            return Err(AnalysisError::invalid_parameter("max_per_layer", "must be at least 1"));
        }
        Ok(Self { max_per_layer, greedy })
    }

    pub fn from_config(config: &LayeringConfig) -> Result<Self> {
        Self::new(config.max_per_layer, config.greedy)
    }

    /// Assigns final layers.
    ///
    /// `initial` must cover every link endpoint. Self loops are ignored, and so
    /// are links that run against the labelling (feedback links).
    pub fn assign(
        &self,
        initial: &BTreeMap<NodeId, usize>,
        links: &[Link],
    ) -> Result<BTreeMap<NodeId, usize>> {
        let _span = debug_span!(
            "assign_layers",
            nodes = initial.len(),
            max_per_layer = self.max_per_layer,
            greedy = self.greedy
        )
        .entered();

        let mut sources = BTreeMap::<&NodeId, BTreeSet<&NodeId>>::new();
        for link in links {
            for endpoint in [link.src(), link.trg()] {
                if !initial.contains_key(endpoint) {
                    return Err(AnalysisError::UnknownNode(endpoint.clone()));
                }
            }
            if !link.is_self_loop() {
                sources.entry(link.trg()).or_default().insert(link.src());
            }
        }

        let labels = label_nodes(initial, &sources);

        let mut forward_targets = BTreeMap::<&NodeId, BTreeSet<&NodeId>>::new();
        for (trg, srcs) in &sources {
            for src in srcs {
                if labels[*src] < labels[*trg] {
                    forward_targets.entry(*src).or_default().insert(*trg);
                }
            }
        }

        let placed = self.place(&labels, &forward_targets);
        let highest = placed.values().copied().max().unwrap_or(0);
        let out = placed
            .into_iter()
            .map(|(node, layer)| (node.clone(), highest - layer))
            .collect::<BTreeMap<_, _>>();

        debug!(layers = if out.is_empty() { 0 } else { highest + 1 }, "layer assignment done");
        Ok(out)
    }

    fn place<'n>(
        &self,
        labels: &BTreeMap<&'n NodeId, usize>,
        forward_targets: &BTreeMap<&'n NodeId, BTreeSet<&'n NodeId>>,
    ) -> BTreeMap<&'n NodeId, usize> {
        let no_targets = BTreeSet::new();
        let targets_of = |node: &NodeId| forward_targets.get(node).unwrap_or(&no_targets);

        let mut remaining =
            labels.iter().map(|(node, label)| (*label, *node)).collect::<BTreeMap<_, _>>();
        let mut placed = BTreeMap::<&NodeId, usize>::new();
        let mut current = 0usize;
        let mut filled = 0usize;

        while !remaining.is_empty() {
            let all_placed =
                |node: &NodeId| targets_of(node).iter().all(|t| placed.contains_key(*t));
            let pick = if self.greedy {
                let fits = |node: &NodeId| {
                    targets_of(node).iter().all(|t| placed.get(*t).is_some_and(|l| *l < current))
                };
                let candidate =
                    remaining.iter().rev().map(|(_, node)| *node).find(|node| fits(*node));
                match candidate {
                    Some(node) if filled < self.max_per_layer => node,
                    _ => {
                        current += 1;
                        filled = 0;
                        continue;
                    }
                }
            } else {
                // The highest remaining label is always eligible: every
                // forward target carries a higher label.
                let Some(node) =
                    remaining.iter().rev().map(|(_, node)| *node).find(|node| all_placed(*node))
                else {
                    break;
                };
                let blocked =
                    targets_of(node).iter().any(|t| placed.get(*t).is_some_and(|l| *l == current));
                if filled >= self.max_per_layer || blocked {
                    current += 1;
                    filled = 0;
                }
                node
            };

            trace!(node = %pick, layer = current, "placed");
            remaining.remove(&labels[pick]);
            placed.insert(pick, current);
            filled += 1;
        }

        placed
    }
}

/// Gives every node a unique label, lowest first.
///
/// Layers are handled in ascending order. Inside a layer the next label goes
/// to the node whose descending set of already-labelled source labels is
/// smallest, compared element by element; node id breaks remaining ties.
fn label_nodes<'n>(
    initial: &'n BTreeMap<NodeId, usize>,
    sources: &BTreeMap<&'n NodeId, BTreeSet<&'n NodeId>>,
) -> BTreeMap<&'n NodeId, usize> {
    let mut by_layer = BTreeMap::<usize, BTreeSet<&NodeId>>::new();
    for (node, layer) in initial {
        by_layer.entry(*layer).or_default().insert(node);
    }

    let mut labels = BTreeMap::<&NodeId, usize>::new();
    let mut next_label = 1usize;
    for (_, mut pending) in by_layer {
        while !pending.is_empty() {
            let mut best: Option<(LabelSet, &NodeId)> = None;
            for node in &pending {
                let key = label_set(node, sources, &labels);
                let better = match &best {
                    None => true,
                    Some((best_key, _)) => key < *best_key,
                };
                if better {
                    best = Some((key, *node));
                }
            }
            let Some((_, node)) = best else {
                break;
            };
            pending.remove(node);
            labels.insert(node, next_label);
            next_label += 1;
        }
    }
    labels
}

fn label_set(
    node: &NodeId,
    sources: &BTreeMap<&NodeId, BTreeSet<&NodeId>>,
    labels: &BTreeMap<&NodeId, usize>,
) -> LabelSet {
    let mut set = sources
        .get(node)
        .into_iter()
        .flatten()
        .filter_map(|src| labels.get(*src).copied())
        .collect::<LabelSet>();
    set.sort_unstable_by(|a, b| b.cmp(a));
    set
}
