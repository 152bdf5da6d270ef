// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, debug_span, trace};

use super::Graph;
use crate::error::{AnalysisError, Result};
use crate::model::NodeId;

/// Level assignment produced by [`Graph::topo_sort`].
///
/// Levels start at 0 for the first batch of roots; every link `s -> t` ends
/// with `level(s) < level(t)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoSort {
    levels: BTreeMap<NodeId, usize>,
    insertion: Vec<NodeId>,
}

impl Graph {
    /// Peels roots off a working copy of the edge set, one level per round.
    ///
    /// With `compress`, nodes are then pushed as far downstream as their
    /// targets allow.
    pub fn topo_sort(&self, compress: bool) -> Result<TopoSort> {
        if self.is_ordered() {
            return Err(AnalysisError::OrderedGraphTopoSort);
        }
        let _span = debug_span!("topo_sort", nodes = self.node_count(), compress).entered();

        let mut edges = self
            .links()
            .iter()
            .map(|link| (link.src().clone(), link.trg().clone()))
            .collect::<BTreeSet<_>>();
        let mut remaining = self.nodes().iter().cloned().collect::<BTreeSet<_>>();
        let mut levels = BTreeMap::<NodeId, usize>::new();
        let mut level = 0usize;

        while !remaining.is_empty() {
            let has_inbound = edges.iter().map(|(_, trg)| trg).collect::<BTreeSet<_>>();
            let roots = remaining
                .iter()
                .filter(|node| !has_inbound.contains(node))
                .cloned()
                .collect::<Vec<_>>();
            if roots.is_empty() {
                return Err(AnalysisError::CycleDetected { remaining: remaining.len() });
            }

            trace!(level, roots = roots.len(), "peeled roots");
            let peeled = roots.iter().collect::<BTreeSet<_>>();
            edges.retain(|(src, _)| !peeled.contains(src));
            for root in roots {
                remaining.remove(&root);
                levels.insert(root, level);
            }
            level += 1;
        }

        let mut sort = TopoSort { levels, insertion: self.nodes().to_vec() };
        if compress {
            sort.compress(self);
        }
        debug!(levels = sort.max_level().map_or(0, |max| max + 1), "topological sort done");
        Ok(sort)
    }
}

impl TopoSort {
    /// Wraps an existing assignment, e.g. one loaded from a saved layout.
    pub fn from_levels(levels: BTreeMap<NodeId, usize>) -> Self {
        let insertion = levels.keys().cloned().collect();
        Self { levels, insertion }
    }

    pub fn levels(&self) -> &BTreeMap<NodeId, usize> {
        &self.levels
    }

    pub fn level(&self, node: &NodeId) -> Option<usize> {
        self.levels.get(node).copied()
    }

    pub fn max_level(&self) -> Option<usize> {
        self.levels.values().copied().max()
    }

    pub fn into_levels(self) -> BTreeMap<NodeId, usize> {
        self.levels
    }

    /// Moves every node to one level above its nearest target until nothing
    /// moves any more. Sinks stay put.
    fn compress(&mut self, graph: &Graph) {
        let mut rounds = 0usize;
        loop {
            let mut moved = false;
            for node in &self.insertion {
                let Some(min_target) =
                    graph.targets_of(node).iter().filter_map(|t| self.levels.get(t)).min().copied()
                else {
                    continue;
                };
                let Some(current) = self.levels.get_mut(node) else {
                    continue;
                };
                if min_target > *current + 1 {
                    *current = min_target - 1;
                    moved = true;
                }
            }
            rounds += 1;
            if !moved {
                break;
            }
        }
        trace!(rounds, "compression reached a fixed point");
    }

    /// Nodes ordered by level.
    ///
    /// Ties keep the graph's insertion order unless `repeatable` is set, in
    /// which case they are ordered by id so the result does not depend on how
    /// the caller happened to collect its nodes.
    pub fn node_order(&self, repeatable: bool) -> Vec<NodeId> {
        let mut order = if repeatable {
            self.levels.keys().cloned().collect::<Vec<_>>()
        } else {
            self.insertion.clone()
        };
        // Stable sort keeps the tie order chosen above.
        order.sort_by_key(|node| self.levels.get(node).copied().unwrap_or(usize::MAX));
        order
    }

    /// Nodes grouped per level, id order within a level.
    pub fn partial_ordering(&self) -> Vec<Vec<NodeId>> {
        let Some(max) = self.max_level() else {
            return Vec::new();
        };
        let mut out = vec![Vec::new(); max + 1];
        for (node, level) in &self.levels {
            out[*level].push(node.clone());
        }
        out
    }

    /// Forces `node` into its own column at the low (`to_min`) or high end.
    ///
    /// Every other node keeps its relative order. With `to_min` all other
    /// columns shift up by one to make room; if the node's old column becomes
    /// empty the columns past it close the gap.
    pub fn reposition(&self, node: &NodeId, to_min: bool) -> Result<TopoSort> {
        let Some(old) = self.level(node) else {
            return Err(AnalysisError::UnknownNode(node.clone()));
        };
        let min = self.levels.values().copied().min().unwrap_or(0);
        let alone = self.levels.values().filter(|level| **level == old).count() == 1;

        let mut levels = BTreeMap::<NodeId, usize>::new();
        for (other, level) in &self.levels {
            if other == node {
                continue;
            }
            let mut shifted = if to_min { *level + 1 } else { *level };
            if alone && *level > old {
                shifted -= 1;
            }
            levels.insert(other.clone(), shifted);
        }

        let forced = if to_min {
            min
        } else {
            levels.values().copied().max().map_or(min, |max| max + 1)
        };
        levels.insert(node.clone(), forced);

        Ok(TopoSort { levels, insertion: self.insertion.clone() })
    }
}
