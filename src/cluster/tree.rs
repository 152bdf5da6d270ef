// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::vector::ClusterVector;
use crate::model::NodeId;

/// One node of the dendrogram.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterNode {
    /// Leaves sharing one exact input pattern.
    Pure { members: Vec<NodeId>, consensus: ClusterVector },
    /// Two clusters joined at `similarity`.
    Merged { left: usize, right: usize, size: usize, similarity: f64, consensus: ClusterVector },
}

impl ClusterNode {
    pub fn size(&self) -> usize {
        match self {
            Self::Pure { members, .. } => members.len(),
            Self::Merged { size, .. } => *size,
        }
    }

    pub fn consensus(&self) -> &ClusterVector {
        match self {
            Self::Pure { consensus, .. } | Self::Merged { consensus, .. } => consensus,
        }
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, Self::Pure { .. })
    }

    pub fn children(&self) -> Option<(usize, usize)> {
        match self {
            Self::Pure { .. } => None,
            Self::Merged { left, right, .. } => Some((*left, *right)),
        }
    }
}

/// A run of leaves that came from the same pure cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafChunk {
    pub members: Vec<NodeId>,
    pub count: usize,
}

/// Arena-backed dendrogram; node indices are stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterTree {
    nodes: Vec<ClusterNode>,
    root: Option<usize>,
}

impl ClusterTree {
    pub(crate) fn new(nodes: Vec<ClusterNode>, root: Option<usize>) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> Option<&ClusterNode> {
        self.root.and_then(|idx| self.nodes.get(idx))
    }

    pub fn root_index(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, idx: usize) -> Option<&ClusterNode> {
        self.nodes.get(idx)
    }

    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.root().map_or(0, ClusterNode::size)
    }

    /// Pure clusters in left-to-right dendrogram order.
    fn pure_in_order(&self) -> Vec<&ClusterNode> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            match &self.nodes[idx] {
                pure @ ClusterNode::Pure { .. } => out.push(pure),
                ClusterNode::Merged { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
        out
    }

    /// Leaf tags in dendrogram order.
    pub fn in_order(&self) -> Vec<NodeId> {
        self.pure_in_order()
            .into_iter()
            .flat_map(|node| match node {
                ClusterNode::Pure { members, .. } => members.clone(),
                ClusterNode::Merged { .. } => Vec::new(),
            })
            .collect()
    }

    /// Dendrogram order with each pure pre-cluster reported as one chunk.
    pub fn chunked(&self) -> Vec<LeafChunk> {
        self.pure_in_order()
            .into_iter()
            .filter_map(|node| match node {
                ClusterNode::Pure { members, .. } => {
                    Some(LeafChunk { members: members.clone(), count: members.len() })
                }
                ClusterNode::Merged { .. } => None,
            })
            .collect()
    }
}
