// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Netlayout: graph analysis and automatic-layout algorithms for regulatory
//! network diagrams.
//!
//! Every entry point takes a snapshot of nodes, links or rectangles and
//! returns a fresh result: orderings, layers, clusters, paths or placements.
//! Nothing is cached between calls and identical input always yields identical
//! output.

pub mod cluster;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod packing;
pub mod paths;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ErrorKind, Result};
pub use graph::{CycleFinder, Graph, TopoSort};
pub use model::{Link, LinkTag, NetworkSource, NodeId, RectId, Sign};

#[cfg(test)]
mod tests {
    use crate::model::fixtures::graph;

    #[test]
    fn sanity() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert!(!g.has_cycle());
        assert_eq!(g.node_count(), 3);
    }
}
