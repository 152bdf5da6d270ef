// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use super::Graph;
use crate::model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Grey,
    Black,
}

/// Mutable state of one cycle search: node colours plus the explicit DFS stack.
struct SearchContext<'g> {
    colors: BTreeMap<&'g NodeId, Color>,
    stack: Vec<(&'g NodeId, usize)>,
}

impl<'g> SearchContext<'g> {
    fn color(&self, node: &NodeId) -> Color {
        self.colors.get(node).copied().unwrap_or(Color::White)
    }
}

/// Three-colour depth-first cycle detection.
#[derive(Debug, Clone, Copy)]
pub struct CycleFinder<'g> {
    graph: &'g Graph,
}

impl<'g> CycleFinder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Returns `true` if any directed cycle exists, self loops included.
    ///
    /// Every node is used as a start point so cycles in components without a
    /// root are found too.
    pub fn has_cycle(&self) -> bool {
        let _span = debug_span!("has_cycle", nodes = self.graph.node_count()).entered();

        let mut ctx = SearchContext { colors: BTreeMap::new(), stack: Vec::new() };
        for start in self.graph.nodes() {
            if ctx.color(start) != Color::White {
                continue;
            }
            if self.visit(start, &mut ctx) {
                debug!(start = %start, "cycle found");
                return true;
            }
        }
        false
    }

    fn visit(&self, start: &'g NodeId, ctx: &mut SearchContext<'g>) -> bool {
        ctx.colors.insert(start, Color::Grey);
        ctx.stack.push((start, 0));

        while let Some(frame) = ctx.stack.last_mut() {
            let node: &'g NodeId = frame.0;
            let targets: &'g [NodeId] = self.graph.targets_of(node);
            let Some(target) = targets.get(frame.1) else {
                ctx.colors.insert(node, Color::Black);
                ctx.stack.pop();
                continue;
            };
            frame.1 += 1;
            match ctx.color(target) {
                Color::Grey => return true,
                Color::Black => {}
                Color::White => {
                    ctx.colors.insert(target, Color::Grey);
                    ctx.stack.push((target, 0));
                }
            }
        }
        false
    }
}

impl Graph {
    pub fn has_cycle(&self) -> bool {
        CycleFinder::new(self).has_cycle()
    }
}
