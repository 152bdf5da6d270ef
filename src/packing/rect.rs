// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Axis-aligned rectangle in diagram coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when the interiors overlap. Rectangles sharing only an edge do not
    /// intersect.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (x < right && y < bottom).then(|| Rect::new(x, y, right - x, bottom - y))
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Grows every side outward by `margin`.
    pub const fn inflate(&self, margin: i32) -> Rect {
        let grow = 2 * margin;
        Rect::new(self.x - margin, self.y - margin, self.width + grow, self.height + grow)
    }

    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub const fn with_origin(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

/// Bounding box of all `rects`, `None` when empty.
pub fn bounds<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects.into_iter().fold(None, |acc: Option<Rect>, rect| {
        Some(acc.map_or(*rect, |acc| acc.union(rect)))
    })
}

#[cfg(test)]
mod tests {
    use super::{bounds, Rect};

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert_eq!(a.intersection(&Rect::new(5, 5, 10, 10)), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(&Rect::new(10, 0, 1, 1)), None);
    }

    #[test]
    fn inflate_and_union_cover_both_inputs() {
        let a = Rect::new(10, 10, 5, 5);
        assert_eq!(a.inflate(2), Rect::new(8, 8, 9, 9));
        let b = Rect::new(0, 20, 3, 3);
        assert_eq!(a.union(&b), Rect::new(0, 10, 15, 13));
        assert_eq!(bounds([a, b].iter()), Some(Rect::new(0, 10, 15, 13)));
        assert_eq!(bounds(std::iter::empty()), None);
    }
}
