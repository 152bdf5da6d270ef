// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::warn;

use crate::error::{AnalysisError, Result};

/// Cooperative cancellation hook polled between scan steps of long passes.
pub trait ProgressMonitor {
    /// Returns `false` to abort the running pass.
    fn keep_going(&mut self) -> bool;
}

impl<F> ProgressMonitor for F
where
    F: FnMut() -> bool,
{
    fn keep_going(&mut self) -> bool {
        self()
    }
}

/// Monitor that never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCancel;

impl ProgressMonitor for NoCancel {
    fn keep_going(&mut self) -> bool {
        true
    }
}

pub(crate) fn checkpoint(monitor: &mut dyn ProgressMonitor, stage: &'static str) -> Result<()> {
    if monitor.keep_going() {
        return Ok(());
    }
    warn!(stage, "packing cancelled");
    Err(AnalysisError::Cancelled)
}
