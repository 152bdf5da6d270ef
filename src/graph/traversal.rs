// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug_span, trace};

use super::Graph;
use crate::error::{AnalysisError, Result};
use crate::model::NodeId;

/// A node in discovery order together with its hop distance from the root that
/// reached it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueEntry {
    pub depth: usize,
    pub node: NodeId,
}

impl QueueEntry {
    pub fn new(depth: usize, node: NodeId) -> Self {
        Self { depth, node }
    }
}

struct DfsFrame {
    node: NodeId,
    depth: usize,
    next: usize,
}

impl Graph {
    /// Depth-first discovery order starting from every root in turn.
    ///
    /// Nodes only reachable through cycles (no root above them) are not
    /// visited.
    pub fn depth_first(&self) -> Vec<QueueEntry> {
        let _span = debug_span!("depth_first", nodes = self.node_count()).entered();

        let mut visited = BTreeSet::<NodeId>::new();
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack = Vec::<DfsFrame>::new();

        for root in self.root_nodes() {
            if !visited.insert(root.clone()) {
                continue;
            }
            out.push(QueueEntry::new(0, root.clone()));
            stack.push(DfsFrame { node: root, depth: 0, next: 0 });

            while let Some(frame) = stack.last_mut() {
                let targets = self.targets_of(&frame.node);
                let Some(target) = targets.get(frame.next) else {
                    stack.pop();
                    continue;
                };
                frame.next += 1;
                let depth = frame.depth + 1;
                if visited.insert(target.clone()) {
                    out.push(QueueEntry::new(depth, target.clone()));
                    stack.push(DfsFrame { node: target.clone(), depth, next: 0 });
                }
            }
        }

        trace!(visited = out.len(), "depth-first search done");
        out
    }

    /// Breadth-first discovery order from the roots.
    pub fn breadth_first(&self) -> Vec<QueueEntry> {
        self.breadth_first_inner(self.root_nodes(), |_| false)
    }

    /// Breadth-first discovery order from `starts`.
    ///
    /// `judge` sees every dequeued entry; returning `true` keeps the node in the
    /// output but does not expand its targets. The rest of the search goes on.
    pub fn breadth_first_from<F>(&self, starts: &[NodeId], judge: F) -> Result<Vec<QueueEntry>>
    where
        F: FnMut(&QueueEntry) -> bool,
    {
        if let Some(unknown) = starts.iter().find(|node| !self.contains(node)) {
            return Err(AnalysisError::UnknownNode(unknown.clone()));
        }
        Ok(self.breadth_first_inner(starts.to_vec(), judge))
    }

    fn breadth_first_inner<F>(&self, starts: Vec<NodeId>, mut judge: F) -> Vec<QueueEntry>
    where
        F: FnMut(&QueueEntry) -> bool,
    {
        let _span = debug_span!("breadth_first", nodes = self.node_count(), starts = starts.len())
            .entered();

        let mut visited = BTreeSet::<NodeId>::new();
        let mut queue = VecDeque::<QueueEntry>::new();
        for start in starts {
            if visited.insert(start.clone()) {
                queue.push_back(QueueEntry::new(0, start));
            }
        }

        let mut out = Vec::with_capacity(self.node_count());
        while let Some(entry) = queue.pop_front() {
            let stop = judge(&entry);
            if !stop {
                for target in self.targets_of(&entry.node) {
                    if visited.insert(target.clone()) {
                        queue.push_back(QueueEntry::new(entry.depth + 1, target.clone()));
                    }
                }
            }
            out.push(entry);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::QueueEntry;
    use crate::graph::Graph;
    use crate::model::fixtures::{diamond_with_tail, graph, link, nid};

    fn entries(pairs: &[(usize, &str)]) -> Vec<QueueEntry> {
        pairs.iter().map(|(depth, node)| QueueEntry::new(*depth, nid(node))).collect()
    }

    #[test]
    fn depth_first_visits_each_node_once_in_id_order() {
        let dfs = diamond_with_tail().depth_first();
        assert_eq!(
            dfs,
            entries(&[(0, "a"), (1, "b"), (2, "d"), (3, "e"), (1, "c"), (2, "f")])
        );
    }

    #[test]
    fn depth_first_follows_explicit_link_order_and_ignores_repeats() {
        let g = Graph::with_link_order(
            ["a", "b", "c", "d"].map(nid),
            vec![link("a", "c"), link("a", "b"), link("a", "c"), link("c", "d"), link("b", "d")],
        )
        .unwrap();
        assert_eq!(g.depth_first(), entries(&[(0, "a"), (1, "c"), (2, "d"), (1, "b")]));
    }

    #[test]
    fn depth_first_handles_long_chains_without_recursion() {
        let names = (0..20_000).map(|i| format!("n{i:05}")).collect::<Vec<_>>();
        let nodes = names.iter().map(|n| nid(n));
        let links = names.windows(2).map(|w| link(&w[0], &w[1])).collect::<Vec<_>>();
        let g = Graph::new(nodes, links).unwrap();
        let dfs = g.depth_first();
        assert_eq!(dfs.len(), 20_000);
        assert_eq!(dfs.last().unwrap().depth, 19_999);
    }

    #[test]
    fn breadth_first_records_hop_distance() {
        let bfs = diamond_with_tail().breadth_first();
        assert_eq!(
            bfs,
            entries(&[(0, "a"), (1, "b"), (1, "c"), (2, "d"), (2, "f"), (3, "e")])
        );
    }

    #[test]
    fn judge_prunes_expansion_without_aborting() {
        let g = diamond_with_tail();
        let bfs = g.breadth_first_from(&[nid("a")], |entry| entry.node.as_str() == "c").unwrap();
        assert_eq!(bfs, entries(&[(0, "a"), (1, "b"), (1, "c"), (2, "d"), (3, "e")]));
    }

    #[test]
    fn breadth_first_from_rejects_unknown_start() {
        let g = graph(&["a"], &[]);
        assert!(g.breadth_first_from(&[nid("zz")], |_| false).is_err());
    }
}
