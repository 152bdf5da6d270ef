// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::{AnalysisError, Result};
use crate::model::{Link, NodeId, Sign};

/// A walk of links without repeated nodes.
///
/// The one exception is an autoregulation path: a single self loop, built with
/// [`Path::autoregulation`]. Equality and ordering look at the links only; the
/// ranking is presentation data assigned after a search.
#[derive(Debug, Clone, Default)]
pub struct Path {
    links: SmallVec<[Link; 4]>,
    autoregulation: bool,
    ranking: i64,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn autoregulation(link: Link) -> Result<Self> {
        if !link.is_self_loop() {
            return Err(AnalysisError::invalid_parameter(
                "link",
                format!("{link} is not a self loop"),
            ));
        }
        let mut links = SmallVec::new();
        links.push(link);
        Ok(Self { links, autoregulation: true, ranking: 0 })
    }

    /// Extends the walk by one link.
    pub fn push(&mut self, link: Link) -> Result<()> {
        if link.is_self_loop() || self.autoregulation {
            return Err(AnalysisError::UnexpectedSelfLoop(link.src().clone()));
        }
        if let Some(tail) = self.end() {
            if link.src() != tail {
                return Err(AnalysisError::BrokenWalk {
                    src: link.src().clone(),
                    trg: link.trg().clone(),
                    tail: tail.clone(),
                });
            }
            if self.contains_node(link.trg()) {
                return Err(AnalysisError::PathRevisit {
                    src: link.src().clone(),
                    trg: link.trg().clone(),
                });
            }
        }
        self.links.push(link);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Link> {
        let link = self.links.pop();
        if self.links.is_empty() {
            self.autoregulation = false;
        }
        link
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_autoregulation(&self) -> bool {
        self.autoregulation
    }

    pub fn ranking(&self) -> i64 {
        self.ranking
    }

    pub(crate) fn set_ranking(&mut self, ranking: i64) {
        self.ranking = ranking;
    }

    pub fn start(&self) -> Option<&NodeId> {
        self.links.first().map(Link::src)
    }

    pub fn end(&self) -> Option<&NodeId> {
        self.links.last().map(Link::trg)
    }

    /// Visited nodes, start first.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.links.len() + 1);
        if let Some(start) = self.start() {
            nodes.push(start.clone());
        }
        if !self.autoregulation {
            nodes.extend(self.links.iter().map(|link| link.trg().clone()));
        }
        nodes
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.start() == Some(node) || self.links.iter().any(|link| link.trg() == node)
    }

    /// Combined regulatory effect along the walk.
    ///
    /// `None` for an empty path or when any link carries no sign information.
    pub fn net_sign(&self) -> Option<Sign> {
        let mut signs = self.links.iter().map(Link::sign);
        let first = signs.next()??;
        signs.try_fold(first, |acc, sign| sign.map(|sign| acc.compose(sign)))
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.links == other.links && self.autoregulation == other.autoregulation
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.links.hash(state);
        self.autoregulation.hash(state);
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.links.cmp(&other.links).then(self.autoregulation.cmp(&other.autoregulation))
    }
}

/// Deduplicating collector for accepted paths.
///
/// With a limit set, insertions past the limit still succeed; the tracker only
/// reports [`PathTracker::is_over_limit`] so a search can stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTracker {
    paths: BTreeSet<Path>,
    max_count: Option<usize>,
}

impl PathTracker {
    pub fn new(max_count: Option<usize>) -> Self {
        Self { paths: BTreeSet::new(), max_count }
    }

    /// Returns `false` if an equal path was already present.
    pub fn add(&mut self, path: Path) -> bool {
        self.paths.insert(path)
    }

    pub fn merge(&mut self, other: PathTracker) {
        self.paths.extend(other.paths);
    }

    pub fn is_over_limit(&self) -> bool {
        self.max_count.is_some_and(|max| self.paths.len() >= max)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths.into_iter().collect()
    }
}
