// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error taxonomy shared by every algorithm in the crate.
//!
//! All errors are caller-contract violations except [`AnalysisError::Cancelled`],
//! which is the expected outcome of a user-aborted packing pass.

use thiserror::Error;

use crate::model::{IdError, NodeId};

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Coarse classification of an [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IllegalArgument,
    IllegalState,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error("link {src} -> {trg} references node {missing} outside the node set")]
    UnknownEndpoint { src: NodeId, trg: NodeId, missing: NodeId },

    #[error("graph contains a cycle; {remaining} node(s) could not be levelled")]
    CycleDetected { remaining: usize },

    #[error("node {0} is not part of the topological sort")]
    UnknownNode(NodeId),

    #[error("link {src} -> {trg} does not continue the path ending at {tail}")]
    BrokenWalk { src: NodeId, trg: NodeId, tail: NodeId },

    #[error("self loop on {0} is only allowed as an autoregulation path")]
    UnexpectedSelfLoop(NodeId),

    #[error("link {src} -> {trg} would revisit a node already on the path")]
    PathRevisit { src: NodeId, trg: NodeId },

    #[error("vector length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("inconsistent row maps: {0}")]
    InconsistentRows(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("topological sort is unavailable on a graph built with explicit link order")]
    OrderedGraphTopoSort,

    #[error("cannot merge clusters: {live} live cluster(s) remain")]
    NothingToMerge { live: usize },

    #[error("operation cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OrderedGraphTopoSort | Self::NothingToMerge { .. } => ErrorKind::IllegalState,
            Self::Cancelled => ErrorKind::Cancelled,
            _ => ErrorKind::IllegalArgument,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}
