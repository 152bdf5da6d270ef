// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunables for the algorithms, loadable from JSON.
//!
//! Every section falls back to its defaults when omitted, so `{}` is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::paths::PathQuery;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub paths: PathConfig,
    pub layering: LayeringConfig,
    pub packing: PackingConfig,
    pub grid: GridConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub max_depth: usize,
    pub max_count: Option<usize>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self { max_depth: 6, max_count: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeringConfig {
    pub max_per_layer: usize,
    pub greedy: bool,
}

impl Default for LayeringConfig {
    fn default() -> Self {
        Self { max_per_layer: 8, greedy: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    pub grid_unit: i32,
    pub padding: i32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self { grid_unit: 10, padding: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub unit: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { unit: 10 }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| AnalysisError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layering.max_per_layer == 0 {
            return Err(AnalysisError::InvalidConfig(
                "layering.max_per_layer must be at least 1".to_owned(),
            ));
        }
        if self.packing.grid_unit <= 0 {
            return Err(AnalysisError::InvalidConfig(
                "packing.grid_unit must be positive".to_owned(),
            ));
        }
        if self.packing.padding < 0 {
            return Err(AnalysisError::InvalidConfig(
                "packing.padding must not be negative".to_owned(),
            ));
        }
        if self.grid.unit <= 0 {
            return Err(AnalysisError::InvalidConfig("grid.unit must be positive".to_owned()));
        }
        Ok(())
    }

    pub fn path_query(&self) -> PathQuery {
        PathQuery { max_depth: self.paths.max_depth, max_count: self.paths.max_count }
    }
}
