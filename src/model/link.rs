// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{LinkTag, NodeId};

/// Regulatory sign of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Positive,
    Negative,
    None,
}

impl Sign {
    /// Sign of two regulations applied in series.
    pub fn compose(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::None, _) | (_, Sign::None) => Sign::None,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// A directed link between two nodes.
///
/// Plain, signed and tagged links share this one type. Plain links leave both
/// `sign` and `tag` empty, so equality and ordering fall back to the
/// `(src, trg)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    src: NodeId,
    trg: NodeId,
    sign: Option<Sign>,
    tag: Option<LinkTag>,
}

impl Link {
    pub fn new(src: NodeId, trg: NodeId) -> Self {
        Self { src, trg, sign: None, tag: None }
    }

    pub fn signed(src: NodeId, trg: NodeId, sign: Sign) -> Self {
        Self { src, trg, sign: Some(sign), tag: None }
    }

    pub fn tagged(src: NodeId, trg: NodeId, tag: LinkTag) -> Self {
        Self { src, trg, sign: None, tag: Some(tag) }
    }

    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn with_tag(mut self, tag: LinkTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn src(&self) -> &NodeId {
        &self.src
    }

    pub fn trg(&self) -> &NodeId {
        &self.trg
    }

    pub fn sign(&self) -> Option<Sign> {
        self.sign
    }

    pub fn tag(&self) -> Option<&LinkTag> {
        self.tag.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.sign.is_some()
    }

    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.trg
    }

    /// Drops sign and tag, leaving the bare `(src, trg)` edge.
    pub fn plain(&self) -> Link {
        Link::new(self.src.clone(), self.trg.clone())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.trg)?;
        match self.sign {
            Some(Sign::Positive) => f.write_str(" (+)")?,
            Some(Sign::Negative) => f.write_str(" (-)")?,
            Some(Sign::None) | None => {}
        }
        if let Some(tag) = &self.tag {
            write!(f, " [{tag}]")?;
        }
        Ok(())
    }
}
