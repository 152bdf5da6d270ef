// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Identities and links handed in by callers.
//!
//! Nodes exist only as ids; the domain model (genes, regulators, modules) stays
//! outside this crate and is reached through [`NetworkSource`].

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod link;
pub mod source;

pub use ids::{Id, IdError, LinkTag, NodeId, RectId};
pub use link::{Link, Sign};
pub use source::{Linkage, NetworkSource, StaticNetwork};
