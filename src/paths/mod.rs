// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded enumeration of simple paths between two nodes.
//!
//! The search is exponential in the number of distinct simple paths. The
//! depth bound and the optional count cap in [`PathQuery`] are the only
//! limits, so callers pick them to bound the runtime.

pub mod path;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, debug_span, trace};

use crate::error::Result;
use crate::graph::Graph;
use crate::model::{Link, NodeId};

pub use path::{Path, PathTracker};

/// Bounds for one enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathQuery {
    /// Maximum number of links in a returned path.
    pub max_depth: usize,
    /// Stop exploring once this many distinct paths are collected.
    pub max_count: Option<usize>,
}

impl Default for PathQuery {
    fn default() -> Self {
        Self { max_depth: 6, max_count: None }
    }
}

/// Paths found by [`PathEnumerator::all_paths`], in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Path>,
    depths: BTreeMap<NodeId, usize>,
    over_limit: bool,
}

impl PathSet {
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Breadth-first depth of every node touched by a path. The target is
    /// always one deeper than anything else.
    pub fn depths(&self) -> &BTreeMap<NodeId, usize> {
        &self.depths
    }

    /// Whether the search stopped early on the count cap.
    pub fn is_over_limit(&self) -> bool {
        self.over_limit
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathEnumerator {
    outbound: BTreeMap<NodeId, Vec<Link>>,
}

impl PathEnumerator {
    pub fn new(links: impl IntoIterator<Item = Link>) -> Self {
        let mut outbound = BTreeMap::<NodeId, Vec<Link>>::new();
        for link in links {
            outbound.entry(link.src().clone()).or_default().push(link);
        }
        for links in outbound.values_mut() {
            links.sort();
            links.dedup();
        }
        Self { outbound }
    }

    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.links().iter().cloned())
    }

    fn outbound_of(&self, node: &NodeId) -> &[Link] {
        self.outbound.get(node).map_or(&[], Vec::as_slice)
    }

    pub fn all_paths(&self, src: &NodeId, trg: &NodeId, query: &PathQuery) -> Result<PathSet> {
        let _span = debug_span!("all_paths", %src, %trg, max_depth = query.max_depth).entered();

        let mut tracker = PathTracker::new(query.max_count);
        if query.max_depth == 0 {
            return Ok(PathSet::default());
        }
        if src == trg {
            self.collect_self_loops(src, &mut tracker)?;
        } else {
            self.collect_walks(src, trg, query.max_depth, &mut tracker)?;
        }

        let over_limit = tracker.is_over_limit();
        let set = rank(tracker.into_paths(), src, trg);
        debug!(paths = set.paths.len(), over_limit, "path enumeration done");
        Ok(PathSet { over_limit, ..set })
    }

    /// A node's only path to itself is a direct self link.
    fn collect_self_loops(&self, node: &NodeId, tracker: &mut PathTracker) -> Result<()> {
        for link in self.outbound_of(node).iter().filter(|link| link.is_self_loop()) {
            if tracker.is_over_limit() {
                break;
            }
            tracker.add(Path::autoregulation(link.clone())?);
        }
        Ok(())
    }

    fn collect_walks(
        &self,
        src: &NodeId,
        trg: &NodeId,
        max_depth: usize,
        tracker: &mut PathTracker,
    ) -> Result<()> {
        let mut path = Path::new();
        // One frame per node on the current walk: the node and the index of
        // its next outbound link to try.
        let mut stack = vec![(src.clone(), 0usize)];

        while let Some((node, next)) = stack.last_mut() {
            if tracker.is_over_limit() {
                trace!(paths = tracker.len(), "path limit reached");
                break;
            }
            let outbound = self.outbound_of(node);
            let Some(link) = outbound.get(*next) else {
                stack.pop();
                path.pop();
                continue;
            };
            *next += 1;

            let revisit = link.trg() == src || path.contains_node(link.trg());
            if link.is_self_loop() || revisit || path.len() >= max_depth {
                continue;
            }

            path.push(link.clone())?;
            if link.trg() == trg {
                tracker.add(path.clone());
                path.pop();
            } else {
                stack.push((link.trg().clone(), 0));
            }
        }
        Ok(())
    }
}

/// Orders collected paths by length, then by the summed breadth-first depth
/// of their nodes, then by their links.
fn rank(paths: Vec<Path>, src: &NodeId, trg: &NodeId) -> PathSet {
    let mut adjacency = BTreeMap::<&NodeId, BTreeSet<&NodeId>>::new();
    for link in paths.iter().flat_map(Path::links) {
        adjacency.entry(link.src()).or_default().insert(link.trg());
    }

    let mut depths = BTreeMap::<NodeId, usize>::new();
    if !paths.is_empty() {
        depths.insert(src.clone(), 0);
    }
    let mut queue = VecDeque::from([(src, 0usize)]);
    while let Some((node, depth)) = queue.pop_front() {
        for next in adjacency.get(node).into_iter().flatten() {
            if *next == trg || depths.contains_key(*next) {
                continue;
            }
            depths.insert((*next).clone(), depth + 1);
            queue.push_back((*next, depth + 1));
        }
    }
    if src != trg && !paths.is_empty() {
        let deepest = depths.values().copied().max().unwrap_or(0);
        depths.insert(trg.clone(), deepest + 1);
    }

    let mut paths = paths;
    for path in &mut paths {
        let ranking = path.nodes().iter().filter_map(|node| depths.get(node)).sum::<usize>();
        path.set_ranking(i64::try_from(ranking).unwrap_or(i64::MAX));
    }
    paths.sort_by(|a, b| {
        a.len()
            .cmp(&b.len())
            .then(a.ranking().cmp(&b.ranking()))
            .then_with(|| a.links().cmp(b.links()))
    });

    PathSet { paths, depths, over_limit: false }
}
