// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Directed graph view over opaque node ids.
//!
//! A [`Graph`] is an immutable snapshot: callers build one per analysis call from
//! their own node/link collections, run searches on it, and drop it. Signed and
//! tagged links between the same pair collapse into one traversal edge.

pub mod cycle;
pub mod topo;
pub mod traversal;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{AnalysisError, Result};
use crate::model::{Link, NetworkSource, NodeId};

pub use cycle::CycleFinder;
pub use topo::TopoSort;
pub use traversal::QueueEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<NodeId>,
    node_set: BTreeSet<NodeId>,
    links: BTreeSet<Link>,
    link_order: Option<Vec<Link>>,
    children: BTreeMap<NodeId, Vec<NodeId>>,
    parents: BTreeMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    /// Builds a graph whose traversals iterate siblings in id order.
    ///
    /// Duplicate nodes and links are dropped. Every link endpoint must be in
    /// `nodes`.
    pub fn new(
        nodes: impl IntoIterator<Item = NodeId>,
        links: impl IntoIterator<Item = Link>,
    ) -> Result<Self> {
        let mut graph = Self::empty(nodes);
        for link in links {
            graph.check_endpoints(&link)?;
            graph.links.insert(link);
        }

        let mut children = BTreeMap::<NodeId, BTreeSet<NodeId>>::new();
        for link in &graph.links {
            children.entry(link.src().clone()).or_default().insert(link.trg().clone());
        }
        graph.children =
            children.into_iter().map(|(src, trgs)| (src, trgs.into_iter().collect())).collect();
        graph.index_parents();
        Ok(graph)
    }

    /// Builds a graph that remembers the caller's link order.
    ///
    /// Depth-first output then follows that order for siblings. The list may
    /// repeat a link; repeats count as one edge. Graphs built this way are
    /// DFS-only: [`Graph::topo_sort`] rejects them.
    pub fn with_link_order(
        nodes: impl IntoIterator<Item = NodeId>,
        ordered_links: Vec<Link>,
    ) -> Result<Self> {
        let mut graph = Self::empty(nodes);
        let mut seen_edges = BTreeSet::<(NodeId, NodeId)>::new();
        for link in &ordered_links {
            graph.check_endpoints(link)?;
            graph.links.insert(link.clone());
            if seen_edges.insert((link.src().clone(), link.trg().clone())) {
                graph.children.entry(link.src().clone()).or_default().push(link.trg().clone());
            }
        }
        graph.link_order = Some(ordered_links);
        graph.index_parents();
        Ok(graph)
    }

    /// Snapshots a domain model through its [`NetworkSource`] accessor.
    pub fn from_source(source: &dyn NetworkSource) -> Result<Self> {
        let nodes = source.node_ids().collect::<Vec<_>>();
        let links = source.linkages().map(|linkage| linkage.to_link()).collect::<Vec<_>>();
        Self::new(nodes, links)
    }

    fn empty(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut node_list = Vec::new();
        let mut node_set = BTreeSet::new();
        for node in nodes {
            if node_set.insert(node.clone()) {
                node_list.push(node);
            }
        }
        Self {
            nodes: node_list,
            node_set,
            links: BTreeSet::new(),
            link_order: None,
            children: BTreeMap::new(),
            parents: BTreeMap::new(),
        }
    }

    fn check_endpoints(&self, link: &Link) -> Result<()> {
        for endpoint in [link.src(), link.trg()] {
            if !self.node_set.contains(endpoint) {
                return Err(AnalysisError::UnknownEndpoint {
                    src: link.src().clone(),
                    trg: link.trg().clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        Ok(())
    }

    fn index_parents(&mut self) {
        let mut parents = BTreeMap::<NodeId, BTreeSet<NodeId>>::new();
        for (src, trgs) in &self.children {
            for trg in trgs {
                parents.entry(trg.clone()).or_default().insert(src.clone());
            }
        }
        self.parents =
            parents.into_iter().map(|(trg, srcs)| (trg, srcs.into_iter().collect())).collect();
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn links(&self) -> &BTreeSet<Link> {
        &self.links
    }

    pub fn link_order(&self) -> Option<&[Link]> {
        self.link_order.as_deref()
    }

    pub fn is_ordered(&self) -> bool {
        self.link_order.is_some()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.node_set.contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct targets of `node`, in traversal order.
    pub fn targets_of(&self, node: &NodeId) -> &[NodeId] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct sources of `node`, in id order.
    pub fn sources_of(&self, node: &NodeId) -> &[NodeId] {
        self.parents.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_degree(&self, node: &NodeId) -> usize {
        self.targets_of(node).len()
    }

    pub fn in_degree(&self, node: &NodeId) -> usize {
        self.sources_of(node).len()
    }

    /// Nodes without inbound links.
    ///
    /// Id order by default. With an explicit link order, roots appear in the
    /// order they first show up as a link source, followed by isolated roots in
    /// insertion order.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        let is_root = |node: &NodeId| !self.parents.contains_key(node);
        match &self.link_order {
            None => self.node_set.iter().filter(|node| is_root(node)).cloned().collect(),
            Some(order) => {
                let mut seen = BTreeSet::new();
                let mut roots = Vec::new();
                for link in order {
                    if is_root(link.src()) && seen.insert(link.src().clone()) {
                        roots.push(link.src().clone());
                    }
                }
                for node in &self.nodes {
                    if is_root(node) && seen.insert(node.clone()) {
                        roots.push(node.clone());
                    }
                }
                roots
            }
        }
    }

    /// Every node reachable from `start` (including `start`).
    pub fn reachable_from(&self, start: &NodeId) -> BTreeSet<NodeId> {
        self.flood(start, &self.children)
    }

    /// Every node that can reach `end` (including `end`).
    pub fn reaching(&self, end: &NodeId) -> BTreeSet<NodeId> {
        self.flood(end, &self.parents)
    }

    fn flood(&self, start: &NodeId, adjacency: &BTreeMap<NodeId, Vec<NodeId>>) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        if !self.contains(start) {
            return seen;
        }
        let mut queue = VecDeque::from([start.clone()]);
        seen.insert(start.clone());
        while let Some(node) = queue.pop_front() {
            for next in adjacency.get(&node).into_iter().flatten() {
                if seen.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
        seen
    }

    /// Induced subgraph on `keep`; link order (if any) is preserved.
    pub fn subgraph(&self, keep: &BTreeSet<NodeId>) -> Result<Graph> {
        let nodes = self.nodes.iter().filter(|node| keep.contains(*node)).cloned();
        let inside = |link: &Link| keep.contains(link.src()) && keep.contains(link.trg());
        match &self.link_order {
            Some(order) => {
                Graph::with_link_order(nodes, order.iter().filter(|l| inside(l)).cloned().collect())
            }
            None => Graph::new(nodes, self.links.iter().filter(|l| inside(l)).cloned()),
        }
    }
}
