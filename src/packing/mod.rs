// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rectangle placement: constrained packing and interlocking grid growth.

pub mod grid;
pub mod packer;
pub mod progress;
pub mod rect;

pub use grid::{CenteredGridElement, CenteredRects, GridElement, GridGrower};
pub use packer::{PackItem, PackRequest, RectPacker};
pub use progress::{NoCancel, ProgressMonitor};
pub use rect::{bounds, Rect};

/// Rounds `value` up to the next multiple of `unit`.
pub(crate) fn snap_up(value: i32, unit: i32) -> i32 {
    let rem = value.rem_euclid(unit);
    if rem == 0 {
        value
    } else {
        value + unit - rem
    }
}

/// Rounds `value` down to a multiple of `unit`.
pub(crate) fn snap_down(value: i32, unit: i32) -> i32 {
    value - value.rem_euclid(unit)
}

#[cfg(test)]
mod tests;
