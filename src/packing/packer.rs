// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, debug_span, trace};

use super::progress::{checkpoint, ProgressMonitor};
use super::rect::{bounds, Rect};
use super::{snap_down, snap_up};
use crate::config::PackingConfig;
use crate::error::{AnalysisError, Result};
use crate::model::RectId;

/// A rectangle that still needs a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackItem {
    pub id: RectId,
    pub width: i32,
    pub height: i32,
}

/// Input for one packing pass.
///
/// `links` are parent to child constraints: a child is placed to the right of
/// its parents and a parent to the left of its children. Floating items that
/// take part in no link are packed last as a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackRequest {
    pub fixed: Vec<(RectId, Rect)>,
    pub floating: Vec<PackItem>,
    pub links: Vec<(RectId, RectId)>,
}

impl PackRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fix(mut self, id: RectId, rect: Rect) -> Self {
        self.fixed.push((id, rect));
        self
    }

    pub fn float(mut self, id: RectId, width: i32, height: i32) -> Self {
        self.floating.push(PackItem { id, width, height });
        self
    }

    pub fn link(mut self, parent: RectId, child: RectId) -> Self {
        self.links.push((parent, child));
        self
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        let ids = self.fixed.iter().map(|(id, _)| id).chain(self.floating.iter().map(|i| &i.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(AnalysisError::invalid_parameter(
                    "request",
                    format!("duplicate rectangle id {id}"),
                ));
            }
        }
        if let Some(item) = self.floating.iter().find(|i| i.width <= 0 || i.height <= 0) {
            return Err(AnalysisError::invalid_parameter(
                "floating",
                format!("{} has size {}x{}", item.id, item.width, item.height),
            ));
        }
        for (parent, child) in &self.links {
            if let Some(missing) = [parent, child].into_iter().find(|id| !seen.contains(id)) {
                return Err(AnalysisError::invalid_parameter(
                    "links",
                    format!("unknown rectangle {missing}"),
                ));
            }
        }
        Ok(())
    }
}

/// Places floating rectangles around fixed ones without overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectPacker {
    grid_unit: i32,
    padding: i32,
}

impl RectPacker {
    pub fn new(grid_unit: i32, padding: i32) -> Result<Self> {
        if grid_unit <= 0 {
            return Err(AnalysisError::invalid_parameter("grid_unit", "must be positive"));
        }
        if padding < 0 {
            return Err(AnalysisError::invalid_parameter("padding", "must not be negative"));
        }
        Ok(Self { grid_unit, padding })
    }

    pub fn from_config(config: &PackingConfig) -> Result<Self> {
        Self::new(config.grid_unit, config.padding)
    }

    /// Returns every rectangle of the request, fixed ones unchanged.
    ///
    /// A cancelled pass returns [`AnalysisError::Cancelled`] and no placements.
    pub fn pack(
        &self,
        request: &PackRequest,
        monitor: &mut dyn ProgressMonitor,
    ) -> Result<BTreeMap<RectId, Rect>> {
        let _span = debug_span!(
            "pack",
            fixed = request.fixed.len(),
            floating = request.floating.len(),
            links = request.links.len()
        )
        .entered();
        request.validate()?;

        let mut parents = BTreeMap::<&RectId, Vec<&RectId>>::new();
        let mut children = BTreeMap::<&RectId, Vec<&RectId>>::new();
        for (parent, child) in request.links.iter().filter(|(p, c)| p != c) {
            parents.entry(child).or_default().push(parent);
            children.entry(parent).or_default().push(child);
        }

        let (mut pending, singletons): (Vec<_>, Vec<_>) = request
            .floating
            .iter()
            .partition(|item| parents.contains_key(&item.id) || children.contains_key(&item.id));

        let mut sheet = Sheet {
            unit: self.grid_unit,
            padding: self.padding,
            placed: request.fixed.iter().cloned().collect(),
        };

        while !pending.is_empty() {
            checkpoint(monitor, "constrained")?;
            let placed = sheet.place_anchored(&mut pending, monitor, |sheet, item| {
                let rightmost = parents
                    .get(&item.id)?
                    .iter()
                    .filter_map(|id| sheet.placed.get(*id))
                    .max_by_key(|rect| (rect.right(), rect.y))?;
                Some((
                    snap_up(rightmost.right() + sheet.padding, sheet.unit),
                    snap_up(rightmost.y, sheet.unit),
                ))
            })?;
            if placed > 0 {
                continue;
            }

            let placed = sheet.place_anchored(&mut pending, monitor, |sheet, item| {
                let leftmost = children
                    .get(&item.id)?
                    .iter()
                    .filter_map(|id| sheet.placed.get(*id))
                    .min_by_key(|rect| (rect.x, rect.y))?;
                Some((
                    snap_down(leftmost.x - sheet.padding - item.width, sheet.unit),
                    snap_up(leftmost.y, sheet.unit),
                ))
            })?;
            if placed > 0 {
                continue;
            }

            // Nothing is anchored yet: start a new group at the left edge.
            let item = pending.remove(0);
            let (left, top) = bounds(sheet.placed.values())
                .map_or((0, 0), |b| (snap_down(b.x, sheet.unit), snap_up(b.y, sheet.unit)));
            let rect = sheet.find_free(left, top, item, monitor)?;
            trace!(id = %item.id, x = rect.x, y = rect.y, "seeded group");
            sheet.placed.insert(item.id.clone(), rect);
        }

        sheet.pack_singletons(singletons, monitor)?;
        debug!(placed = sheet.placed.len(), "packing done");
        Ok(sheet.placed)
    }
}

/// Working state of one pass.
struct Sheet {
    unit: i32,
    padding: i32,
    placed: BTreeMap<RectId, Rect>,
}

impl Sheet {
    /// Places every pending item for which `anchor` yields a start position,
    /// in order, and returns how many were placed.
    fn place_anchored<'a>(
        &mut self,
        pending: &mut Vec<&'a PackItem>,
        monitor: &mut dyn ProgressMonitor,
        anchor: impl Fn(&Sheet, &PackItem) -> Option<(i32, i32)>,
    ) -> Result<usize> {
        let mut placed = 0;
        let mut idx = 0;
        while idx < pending.len() {
            let item = pending[idx];
            let Some((x, y)) = anchor(self, item) else {
                idx += 1;
                continue;
            };
            let rect = self.find_free(x, y, item, monitor)?;
            trace!(id = %item.id, x = rect.x, y = rect.y, "placed beside relative");
            self.placed.insert(item.id.clone(), rect);
            pending.remove(idx);
            placed += 1;
        }
        Ok(placed)
    }

    /// Slides `item` down from `(x, y)` until it keeps `padding` clear of
    /// everything placed.
    fn find_free(
        &self,
        x: i32,
        y: i32,
        item: &PackItem,
        monitor: &mut dyn ProgressMonitor,
    ) -> Result<Rect> {
        let mut y = y;
        loop {
            checkpoint(monitor, "slide")?;
            let candidate = Rect::new(x, y, item.width, item.height);
            let halo = candidate.inflate(self.padding);
            let clear_below = self
                .placed
                .values()
                .filter(|rect| rect.intersects(&halo))
                .map(|rect| rect.bottom() + self.padding)
                .max();
            match clear_below {
                None => return Ok(candidate),
                Some(bottom) => y = snap_up(bottom, self.unit),
            }
        }
    }

    /// Top-left fill of unconstrained items into a roughly square block below
    /// everything placed so far. The block may overflow downward.
    fn pack_singletons(
        &mut self,
        mut items: Vec<&PackItem>,
        monitor: &mut dyn ProgressMonitor,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        items.sort_by(|a, b| b.height.cmp(&a.height).then_with(|| a.id.cmp(&b.id)));

        let footprint = |len: i32| cell_count(len + self.padding, self.unit);
        let sizes = items
            .iter()
            .map(|item| (footprint(item.width), footprint(item.height)))
            .collect::<Vec<_>>();
        let area = sizes.iter().map(|(w, h)| w * h).sum::<usize>();
        let widest = sizes.iter().map(|(w, _)| *w).max().unwrap_or(1);
        let columns = ceil_sqrt(area).max(widest);

        let (left, top) = bounds(self.placed.values()).map_or((0, 0), |b| {
            (snap_down(b.x, self.unit), snap_up(b.bottom() + self.padding, self.unit))
        });
        debug!(singletons = items.len(), columns, "packing singleton block");

        let mut cells = CellMap::new(columns);
        for (item, (w, h)) in items.into_iter().zip(sizes) {
            let (col, row) = cells.first_fit(w, h, monitor)?;
            cells.fill(col, row, w, h);
            let rect = Rect::new(
                left + cells_to_len(col, self.unit)?,
                top + cells_to_len(row, self.unit)?,
                item.width,
                item.height,
            );
            self.placed.insert(item.id.clone(), rect);
        }
        Ok(())
    }
}

/// Occupancy bitmap with a fixed column count and rows added on demand.
struct CellMap {
    columns: usize,
    rows: Vec<Vec<bool>>,
}

impl CellMap {
    fn new(columns: usize) -> Self {
        Self { columns, rows: Vec::new() }
    }

    fn ensure_rows(&mut self, count: usize) {
        while self.rows.len() < count {
            self.rows.push(vec![false; self.columns]);
        }
    }

    fn is_free(&self, col: usize, row: usize, w: usize, h: usize) -> bool {
        self.rows[row..row + h].iter().all(|cells| cells[col..col + w].iter().all(|c| !c))
    }

    /// First free slot scanning rows top-down, columns left to right.
    fn first_fit(
        &mut self,
        w: usize,
        h: usize,
        monitor: &mut dyn ProgressMonitor,
    ) -> Result<(usize, usize)> {
        let mut row = 0;
        loop {
            checkpoint(monitor, "bitmap")?;
            self.ensure_rows(row + h);
            if let Some(col) = (0..=self.columns - w).find(|col| self.is_free(*col, row, w, h)) {
                return Ok((col, row));
            }
            row += 1;
        }
    }

    fn fill(&mut self, col: usize, row: usize, w: usize, h: usize) {
        for cells in &mut self.rows[row..row + h] {
            cells[col..col + w].iter_mut().for_each(|c| *c = true);
        }
    }
}

fn cell_count(len: i32, unit: i32) -> usize {
    let cells = (len + unit - 1) / unit;
    usize::try_from(cells.max(1)).unwrap_or(1)
}

fn cells_to_len(cells: usize, unit: i32) -> Result<i32> {
    i32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(unit))
        .ok_or_else(|| AnalysisError::invalid_parameter("floating", "packed block too large"))
}

fn ceil_sqrt(value: usize) -> usize {
    let mut root = (value as f64).sqrt() as usize;
    while root * root < value {
        root += 1;
    }
    root
}
