// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Growing and shrinking an interlocking grid of rectangles.
//!
//! Rectangles in the grid share boundary coordinates. Growth is applied as a
//! monotone map over one axis at a time, so every rectangle that shared a
//! boundary before still shares it afterwards and no two rectangles that were
//! disjoint start to overlap.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, debug_span, trace};

use super::rect::{bounds, Rect};
use super::snap_up;
use crate::config::GridConfig;
use crate::error::{AnalysisError, Result};
use crate::model::RectId;

/// A grid cell with the extra width and height it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridElement {
    pub id: RectId,
    pub rect: Rect,
    pub grow_x: i32,
    pub grow_y: i32,
}

impl GridElement {
    pub fn new(id: RectId, rect: Rect) -> Self {
        Self { id, rect, grow_x: 0, grow_y: 0 }
    }

    pub fn growing(mut self, grow_x: i32, grow_y: i32) -> Self {
        self.grow_x = grow_x;
        self.grow_y = grow_y;
        self
    }
}

/// A grid cell that grows symmetrically about the center of its content.
///
/// `min_rect` is the content and fixes the center; `max_rect` is the cell that
/// takes part in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenteredGridElement {
    pub id: RectId,
    pub min_rect: Rect,
    pub max_rect: Rect,
    pub grow_x: i32,
    pub grow_y: i32,
}

/// Result of [`GridGrower::grow_centered`] for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenteredRects {
    pub min_rect: Rect,
    pub max_rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn span(self, rect: &Rect) -> (i32, i32) {
        match self {
            Axis::X => (rect.x, rect.right()),
            Axis::Y => (rect.y, rect.bottom()),
        }
    }

    fn extent(self, rect: &Rect) -> i32 {
        match self {
            Axis::X => rect.width,
            Axis::Y => rect.height,
        }
    }

    fn map(self, rect: &Rect, f: impl Fn(i32) -> i32) -> Rect {
        match self {
            Axis::X => {
                let (x, right) = (f(rect.x), f(rect.right()));
                Rect::new(x, rect.y, right - x, rect.height)
            }
            Axis::Y => {
                let (y, bottom) = (f(rect.y), f(rect.bottom()));
                Rect::new(rect.x, y, rect.width, bottom - y)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGrower {
    unit: i32,
}

impl GridGrower {
    pub fn new(unit: i32) -> Result<Self> {
        if unit <= 0 {
            return Err(AnalysisError::invalid_parameter("unit", "must be positive"));
        }
        Ok(Self { unit })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.unit)
    }

    pub fn unit(&self) -> i32 {
        self.unit
    }

    /// Gives every element at least its requested growth, X axis first.
    ///
    /// Boundaries at or past a growing element's far edge move out by the full
    /// amount; boundaries inside its span move by a share proportional to
    /// their position. Every shift is a multiple of the grid unit.
    pub fn grow(&self, elements: &[GridElement]) -> Result<BTreeMap<RectId, Rect>> {
        let _span = debug_span!("grid_grow", elements = elements.len()).entered();
        check_unique(elements.iter().map(|e| &e.id))?;

        let original = elements.iter().map(|e| e.rect).collect::<Vec<_>>();
        let mut rects = original.clone();
        let axes: [(Axis, fn(&GridElement) -> i32); 2] =
            [(Axis::X, |e| e.grow_x), (Axis::Y, |e| e.grow_y)];
        for (axis, need) in axes {
            for (idx, element) in elements.iter().enumerate() {
                let gained = axis.extent(&rects[idx]) - axis.extent(&original[idx]);
                let growth = snap_up(need(element) - gained, self.unit);
                if growth <= 0 {
                    continue;
                }
                let (near, far) = axis.span(&rects[idx]);
                trace!(id = %element.id, ?axis, growth, "growing");
                let unit = self.unit;
                for rect in &mut rects {
                    *rect = axis.map(rect, |c| shift_outward(c, near, far, growth, unit));
                }
            }
        }

        debug!(bounds = ?bounds(rects.iter()), "grid grown");
        Ok(elements.iter().map(|e| e.id.clone()).zip(rects).collect())
    }

    /// Like [`GridGrower::grow`], but each element's growth is split evenly
    /// between both sides of its content center.
    pub fn grow_centered(
        &self,
        elements: &[CenteredGridElement],
    ) -> Result<BTreeMap<RectId, CenteredRects>> {
        let _span = debug_span!("grid_grow_centered", elements = elements.len()).entered();
        check_unique(elements.iter().map(|e| &e.id))?;

        let original = elements.iter().map(|e| e.max_rect).collect::<Vec<_>>();
        let mut rects = elements.iter().map(|e| (e.min_rect, e.max_rect)).collect::<Vec<_>>();
        let axes: [(Axis, fn(&CenteredGridElement) -> i32); 2] =
            [(Axis::X, |e| e.grow_x), (Axis::Y, |e| e.grow_y)];
        for (axis, need) in axes {
            for (idx, element) in elements.iter().enumerate() {
                let (min_rect, max_rect) = rects[idx];
                let gained = axis.extent(&max_rect) - axis.extent(&original[idx]);
                let growth = snap_up(need(element) - gained, self.unit);
                if growth <= 0 {
                    continue;
                }
                let (near, far) = axis.span(&max_rect);
                let (content_near, content_far) = axis.span(&min_rect);
                let center = (content_near + content_far).div_euclid(2).clamp(near, far);
                let units = growth / self.unit;
                let before = units / 2 * self.unit;
                let after = growth - before;
                trace!(id = %element.id, ?axis, before, after, "growing about center");

                let unit = self.unit;
                let f = |c: i32| {
                    if c >= center {
                        shift_outward(c, center, far, after, unit)
                    } else {
                        shift_inward(c, near, center, before, unit)
                    }
                };
                for (min_rect, max_rect) in &mut rects {
                    *min_rect = axis.map(min_rect, f);
                    *max_rect = axis.map(max_rect, f);
                }
            }
        }

        Ok(elements
            .iter()
            .map(|e| e.id.clone())
            .zip(rects.into_iter().map(|(min_rect, max_rect)| CenteredRects { min_rect, max_rect }))
            .collect())
    }

    /// Collapses grid columns and rows that no rectangle occupies.
    ///
    /// Columns are unit wide and start at the leftmost edge snapped down to
    /// the unit; everything past an empty column moves in by one unit.
    pub fn shrink(&self, rects: &BTreeMap<RectId, Rect>) -> BTreeMap<RectId, Rect> {
        let _span = debug_span!("grid_shrink", rects = rects.len()).entered();
        let mut out = rects.clone();
        for axis in [Axis::X, Axis::Y] {
            let runs = self.empty_runs(axis, out.values());
            if runs.is_empty() {
                continue;
            }
            trace!(?axis, runs = runs.len(), "collapsing empty bands");
            let unit = i64::from(self.unit);
            for rect in out.values_mut() {
                *rect = axis.map(rect, |c| {
                    let passed = runs.iter().map(|run| run.passed_by(c, unit)).sum::<i64>();
                    i32::try_from(i64::from(c) - passed * unit).unwrap_or(c)
                });
            }
        }
        out
    }

    /// Runs of consecutive unit bands along `axis` that no rectangle overlaps.
    ///
    /// Bands are aligned to the smallest near edge snapped down to the unit.
    /// Spans are walked in order of their near edge, so the cost depends on
    /// the number of rectangles and not on the distance between them.
    fn empty_runs<'a>(&self, axis: Axis, rects: impl Iterator<Item = &'a Rect>) -> Vec<EmptyRun> {
        let mut spans = rects
            .map(|rect| {
                let (near, far) = axis.span(rect);
                (i64::from(near), i64::from(far))
            })
            .collect::<Vec<_>>();
        spans.sort_unstable();
        let Some(&(first, _)) = spans.first() else {
            return Vec::new();
        };

        let unit = i64::from(self.unit);
        let origin = first - first.rem_euclid(unit);
        let mut cursor = origin;
        let mut runs = Vec::new();
        for (near, far) in spans {
            let count = (near - cursor).div_euclid(unit);
            if count > 0 {
                runs.push(EmptyRun { start: cursor, count });
            }
            // first band start at or past `far`
            let covered = origin + (far - origin + unit - 1).div_euclid(unit) * unit;
            cursor = cursor.max(covered);
        }
        runs
    }
}

/// `count` empty unit bands starting at `start`.
#[derive(Debug, Clone, Copy)]
struct EmptyRun {
    start: i64,
    count: i64,
}

impl EmptyRun {
    /// Bands of this run that end at or before `c`.
    fn passed_by(self, c: i32, unit: i64) -> i64 {
        (i64::from(c) - self.start).div_euclid(unit).clamp(0, self.count)
    }
}

/// Pushes `c` away from `near` when `[near, far)` grows by `growth` at `far`.
fn shift_outward(c: i32, near: i32, far: i32, growth: i32, unit: i32) -> i32 {
    if c >= far {
        c + growth
    } else if c > near {
        c + prorated(growth, c - near, far - near, unit)
    } else {
        c
    }
}

/// Mirror of [`shift_outward`] for growth at the near edge.
fn shift_inward(c: i32, near: i32, far: i32, growth: i32, unit: i32) -> i32 {
    if c <= near {
        c - growth
    } else if c < far {
        c - prorated(growth, far - c, far - near, unit)
    } else {
        c
    }
}

/// `growth * offset / span` rounded to the nearest unit.
fn prorated(growth: i32, offset: i32, span: i32, unit: i32) -> i32 {
    let numer = i64::from(growth) * i64::from(offset);
    let denom = i64::from(span) * i64::from(unit);
    let units = (2 * numer + denom) / (2 * denom);
    i32::try_from(units).map_or(growth, |units| units * unit)
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a RectId>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AnalysisError::invalid_parameter(
                "elements",
                format!("duplicate rectangle id {id}"),
            ));
        }
    }
    Ok(())
}
