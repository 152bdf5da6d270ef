// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LinkTag, NodeId};
use super::link::{Link, Sign};

/// One linkage as reported by the domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linkage {
    pub source: NodeId,
    pub target: NodeId,
    pub sign: Sign,
    pub id: LinkTag,
}

impl Linkage {
    /// Full signed + tagged link.
    pub fn to_link(&self) -> Link {
        Link::signed(self.source.clone(), self.target.clone(), self.sign).with_tag(self.id.clone())
    }
}

/// Read-only accessor over a network model (a genome, a layout engine view).
///
/// Implementations only hand out identities; nothing in this crate mutates
/// the model through it.
pub trait NetworkSource {
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    fn linkages(&self) -> Box<dyn Iterator<Item = Linkage> + '_>;
}

/// Simple in-memory [`NetworkSource`], mostly for tests and benches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticNetwork {
    nodes: Vec<NodeId>,
    linkages: Vec<Linkage>,
}

impl StaticNetwork {
    pub fn new(nodes: Vec<NodeId>, linkages: Vec<Linkage>) -> Self {
        Self { nodes, linkages }
    }
}

impl NetworkSource for StaticNetwork {
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.nodes.iter().cloned())
    }

    fn linkages(&self) -> Box<dyn Iterator<Item = Linkage> + '_> {
        Box::new(self.linkages.iter().cloned())
    }
}
