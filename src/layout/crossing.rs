// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, debug_span, trace};

use crate::error::{AnalysisError, Result};
use crate::model::{Link, NodeId};

/// Two-row crossing reduction.
///
/// Row 1 is fixed; row 2 is permuted by pairwise swaps, each accepted only when
/// it lowers the crossing count. Passes repeat until a full pass no longer
/// lowers the total. This is hill climbing and stops at a local optimum.
#[derive(Debug, Clone)]
pub struct CrossingReducer {
    order: Vec<NodeId>,
    columns: Vec<i32>,
    crossings: Vec<Vec<i64>>,
}

impl CrossingReducer {
    /// Validates the rows and precomputes crossing numbers for every ordered
    /// pair of row-2 nodes.
    ///
    /// `crossings[a][b]` counts link pairs `(w -> a, z -> b)` with
    /// `col(w) > col(z)`: the crossings paid when `a` sits left of `b`.
    pub fn new(
        row1: &BTreeMap<NodeId, i32>,
        row2: &BTreeMap<NodeId, i32>,
        links: &[Link],
    ) -> Result<Self> {
        if let Some(shared) = row1.keys().find(|node| row2.contains_key(*node)) {
            return Err(AnalysisError::InconsistentRows(format!("{shared} appears in both rows")));
        }
        let distinct = row2.values().collect::<BTreeSet<_>>();
        if distinct.len() != row2.len() {
            return Err(AnalysisError::InconsistentRows(
                "row 2 assigns the same column to several nodes".to_owned(),
            ));
        }

        let mut order = row2.keys().cloned().collect::<Vec<_>>();
        order.sort_by(|a, b| row2[a].cmp(&row2[b]));
        let mut columns = row2.values().copied().collect::<Vec<_>>();
        columns.sort_unstable();

        let index =
            order.iter().enumerate().map(|(idx, node)| (node, idx)).collect::<BTreeMap<_, _>>();
        let mut inbound = vec![Vec::<i32>::new(); order.len()];
        let mut seen = BTreeSet::<(&NodeId, &NodeId)>::new();
        for link in links {
            let Some(src_col) = row1.get(link.src()) else {
                return Err(AnalysisError::InconsistentRows(format!(
                    "link {link} does not start in row 1"
                )));
            };
            let Some(trg_idx) = index.get(link.trg()) else {
                return Err(AnalysisError::InconsistentRows(format!(
                    "link {link} does not end in row 2"
                )));
            };
            if seen.insert((link.src(), link.trg())) {
                inbound[*trg_idx].push(*src_col);
            }
        }

        let n = order.len();
        let mut crossings = vec![vec![0i64; n]; n];
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let mut count = 0i64;
                for w in &inbound[a] {
                    for z in &inbound[b] {
                        if w > z {
                            count += 1;
                        }
                    }
                }
                crossings[a][b] = count;
            }
        }

        Ok(Self { order, columns, crossings })
    }

    /// Crossings of the ordering the reducer was built with.
    pub fn initial_crossings(&self) -> i64 {
        let identity = (0..self.order.len()).collect::<Vec<_>>();
        self.total(&identity)
    }

    fn total(&self, positions: &[usize]) -> i64 {
        let mut sum = 0i64;
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                sum += self.crossings[positions[i]][positions[j]];
            }
        }
        sum
    }

    /// Change in crossings if the nodes at positions `i < j` trade places.
    fn swap_delta(&self, positions: &[usize], i: usize, j: usize) -> i64 {
        let c = &self.crossings;
        let (a, b) = (positions[i], positions[j]);
        let mut delta = c[b][a] - c[a][b];
        for &m in &positions[(i + 1)..j] {
            delta += c[b][m] + c[m][a] - c[a][m] - c[m][b];
        }
        delta
    }

    /// Runs the swap passes and returns the new row-2 columns.
    ///
    /// The set of column values is unchanged; only their owners move.
    pub fn reduce(&self) -> BTreeMap<NodeId, i32> {
        let _span = debug_span!("reduce_crossings", row2 = self.order.len()).entered();

        let mut positions = (0..self.order.len()).collect::<Vec<_>>();
        let initial = self.total(&positions);
        let mut best = initial;
        let mut passes = 0usize;

        loop {
            passes += 1;
            for i in 0..positions.len() {
                for j in (i + 1)..positions.len() {
                    // ties swap too
                    if self.swap_delta(&positions, i, j) <= 0 {
                        positions.swap(i, j);
                    }
                }
            }
            let total = self.total(&positions);
            trace!(passes, total, "swap pass finished");
            if total >= best {
                break;
            }
            best = total;
        }

        debug!(initial, reduced = best, passes, "crossing reduction done");
        positions
            .iter()
            .zip(&self.columns)
            .map(|(idx, column)| (self.order[*idx].clone(), *column))
            .collect()
    }
}

/// Reorders row 2 to reduce link crossings against the fixed row 1.
pub fn reduce_crossings(
    row1: &BTreeMap<NodeId, i32>,
    row2: &BTreeMap<NodeId, i32>,
    links: &[Link],
) -> Result<BTreeMap<NodeId, i32>> {
    Ok(CrossingReducer::new(row1, row2, links)?.reduce())
}

/// Number of crossing link pairs between the two rows as given.
pub fn count_crossings(
    row1: &BTreeMap<NodeId, i32>,
    row2: &BTreeMap<NodeId, i32>,
    links: &[Link],
) -> Result<i64> {
    Ok(CrossingReducer::new(row1, row2, links)?.initial_crossings())
}
