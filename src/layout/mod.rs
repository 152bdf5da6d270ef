// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered-drawing helpers: layer assignment and row ordering.
//!
//! Both are heuristics with fixed tie-break and stopping rules; identical input
//! always produces identical output.

pub mod crossing;
pub mod layering;

pub use crossing::{count_crossings, reduce_crossings, CrossingReducer};
pub use layering::LayerAssigner;
