// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Agglomerative clustering of target nodes by their input sources.
//!
//! Each leaf is described by which canonical sources feed it. Leaves with the
//! same pattern are grouped up front; the remaining clusters are merged by
//! cosine similarity until one dendrogram remains. Its leaf order puts nodes
//! with similar inputs next to each other.

pub mod tree;
pub mod vector;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use tracing::{debug, debug_span, trace};

use crate::error::{AnalysisError, Result};
use crate::model::{Link, NodeId};

pub use tree::{ClusterNode, ClusterTree, LeafChunk};
pub use vector::ClusterVector;

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalClusterer {
    leaves: Vec<(NodeId, ClusterVector)>,
}

impl HierarchicalClusterer {
    /// One leaf per distinct target; position `i` of its vector is set when
    /// `sources[i]` links into it. Links from other nodes are ignored.
    pub fn from_network(sources: &[NodeId], targets: &[NodeId], links: &[Link]) -> Result<Self> {
        let source_index =
            sources.iter().enumerate().map(|(idx, node)| (node, idx)).collect::<BTreeMap<_, _>>();
        if source_index.len() != sources.len() {
            return Err(AnalysisError::invalid_parameter("sources", "contains duplicates"));
        }

        let mut inputs = BTreeMap::<&NodeId, BTreeSet<usize>>::new();
        for link in links {
            if let Some(idx) = source_index.get(link.src()) {
                inputs.entry(link.trg()).or_default().insert(*idx);
            }
        }

        let mut seen = BTreeSet::new();
        let mut leaves = Vec::with_capacity(targets.len());
        for target in targets {
            if !seen.insert(target) {
                continue;
            }
            let fed_by = inputs.get(target);
            let vector = ClusterVector::dense((0..sources.len()).map(|idx| {
                if fed_by.is_some_and(|s| s.contains(&idx)) {
                    1.0
                } else {
                    0.0
                }
            }));
            leaves.push((target.clone(), vector.normalized()));
        }
        Ok(Self { leaves })
    }

    /// Leaves from caller-supplied vectors. Missing entries get the column
    /// mean, then every vector is normalised.
    pub fn from_seed_vectors(seeds: Vec<(NodeId, ClusterVector)>) -> Result<Self> {
        let (tags, mut vectors): (Vec<_>, Vec<_>) = seeds.into_iter().unzip();
        ClusterVector::fill_missing_with_column_mean(&mut vectors)?;
        let leaves = tags.into_iter().zip(vectors.iter().map(ClusterVector::normalized)).collect();
        Ok(Self { leaves })
    }

    pub fn leaves(&self) -> &[(NodeId, ClusterVector)] {
        &self.leaves
    }

    pub fn cluster(&self) -> Result<ClusterTree> {
        let _span = debug_span!("cluster", leaves = self.leaves.len()).entered();

        let pure = self.pre_cluster();
        debug!(pure = pure.len(), "exact-match pre-clustering done");
        if pure.len() <= 1 {
            let root = if pure.is_empty() { None } else { Some(0) };
            return Ok(ClusterTree::new(pure, root));
        }

        let mut agglomerator = Agglomerator::new(pure)?;
        while agglomerator.live > 1 {
            agglomerator.merge_best()?;
        }
        Ok(agglomerator.finish())
    }

    /// Buckets leaves with bit-identical vectors, first appearance first.
    fn pre_cluster(&self) -> Vec<ClusterNode> {
        let mut bucket_of = BTreeMap::<Vec<u64>, usize>::new();
        let mut pure = Vec::<ClusterNode>::new();
        for (tag, vector) in &self.leaves {
            let key = vector.pattern_key();
            if let Some(idx) = bucket_of.get(&key) {
                if let ClusterNode::Pure { members, .. } = &mut pure[*idx] {
                    members.push(tag.clone());
                }
                continue;
            }
            bucket_of.insert(key, pure.len());
            pure.push(ClusterNode::Pure { members: vec![tag.clone()], consensus: vector.clone() });
        }
        pure
    }
}

/// Heap entry for one candidate merge.
///
/// Entries are never removed when a cluster dies; instead each entry records
/// the generation both sides had when it was pushed and is dropped on pop if
/// either side has moved on.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    similarity: f64,
    left: usize,
    right: usize,
    left_gen: u32,
    right_gen: u32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Highest similarity first, then the oldest pair.
    fn cmp(&self, other: &Self) -> Ordering {
        self.similarity
            .total_cmp(&other.similarity)
            .then_with(|| other.left.cmp(&self.left))
            .then_with(|| other.right.cmp(&self.right))
    }
}

struct Agglomerator {
    nodes: Vec<ClusterNode>,
    generation: Vec<u32>,
    alive: Vec<bool>,
    live: usize,
    heap: BinaryHeap<Candidate>,
}

impl Agglomerator {
    fn new(pure: Vec<ClusterNode>) -> Result<Self> {
        let count = pure.len();
        let mut agglomerator = Self {
            nodes: pure,
            generation: vec![0; count],
            alive: vec![true; count],
            live: count,
            heap: BinaryHeap::with_capacity(count * count.saturating_sub(1) / 2),
        };
        for left in 0..count {
            for right in (left + 1)..count {
                agglomerator.push_candidate(left, right)?;
            }
        }
        Ok(agglomerator)
    }

    fn similarity(&self, a: usize, b: usize) -> Result<f64> {
        self.nodes[a].consensus().dot(self.nodes[b].consensus())
    }

    fn push_candidate(&mut self, left: usize, right: usize) -> Result<()> {
        let similarity = self.similarity(left, right)?;
        self.heap.push(Candidate {
            similarity,
            left,
            right,
            left_gen: self.generation[left],
            right_gen: self.generation[right],
        });
        Ok(())
    }

    fn is_current(&self, candidate: &Candidate) -> bool {
        self.alive[candidate.left]
            && self.alive[candidate.right]
            && self.generation[candidate.left] == candidate.left_gen
            && self.generation[candidate.right] == candidate.right_gen
    }

    /// Merges the most similar live pair into a new cluster.
    fn merge_best(&mut self) -> Result<usize> {
        if self.live < 2 {
            return Err(AnalysisError::NothingToMerge { live: self.live });
        }
        let mut stale = 0usize;
        let best = loop {
            let Some(candidate) = self.heap.pop() else {
                return Err(AnalysisError::NothingToMerge { live: self.live });
            };
            if self.is_current(&candidate) {
                break candidate;
            }
            stale += 1;
        };
        trace!(
            left = best.left,
            right = best.right,
            similarity = best.similarity,
            stale,
            "merging clusters"
        );

        let (left, right) = self.child_order(best.left, best.right)?;
        let (size_l, size_r) = (self.nodes[left].size(), self.nodes[right].size());
        let consensus = ClusterVector::weighted_average(&[
            (self.nodes[left].consensus(), size_l as f64),
            (self.nodes[right].consensus(), size_r as f64),
        ])?
        .normalized();

        for dead in [best.left, best.right] {
            self.alive[dead] = false;
            self.generation[dead] += 1;
        }
        self.live -= 1;

        let merged = self.nodes.len();
        self.nodes.push(ClusterNode::Merged {
            left,
            right,
            size: size_l + size_r,
            similarity: best.similarity,
            consensus,
        });
        self.generation.push(0);
        self.alive.push(true);

        for other in 0..merged {
            if self.alive[other] {
                self.push_candidate(other, merged)?;
            }
        }
        Ok(merged)
    }

    /// Orders two merged clusters so their most similar grandchildren touch.
    ///
    /// With `a = (a1, a2)` and `b = (b1, b2)` the inner pair is `a2|b1`; if the
    /// outer pair `a1, b2` is more similar the two sides swap so that pair
    /// becomes adjacent instead.
    fn child_order(&self, a: usize, b: usize) -> Result<(usize, usize)> {
        let (Some((a1, a2)), Some((b1, b2))) = (self.nodes[a].children(), self.nodes[b].children())
        else {
            return Ok((a, b));
        };
        let inner = self.similarity(a2, b1)?;
        let outer = self.similarity(a1, b2)?;
        Ok(if outer > inner { (b, a) } else { (a, b) })
    }

    fn finish(self) -> ClusterTree {
        let root = self.alive.iter().rposition(|alive| *alive);
        ClusterTree::new(self.nodes, root)
    }
}

#[cfg(test)]
mod tests;
