// =============================================================================
// Axis-aligned rectangles in y-up world space
//
// Everything that collides in the game is a box:
// - Sprite hit boxes (center + scaled size)
// - Broad-phase cell coverage for the spatial hash
// - Probe boxes used by the platformer physics ("am I standing on something?")
// =============================================================================

use glam::Vec2;

/// Overlaps thinner than this are treated as touching.  Absorbs the rounding
/// left behind when a sprite is snapped flush against a wall face.
pub const OVERLAP_EPSILON: f32 = 1e-3;

/// Axis-aligned rectangle. `left`/`bottom` is the minimum corner because the
/// world's y axis points up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self { left, bottom, width, height }
    }

    /// Box of `width × height` centred on `center`.
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width * 0.5,
            bottom: center.y - height * 0.5,
            width,
            height,
        }
    }

    #[inline] pub fn right(&self) -> f32 { self.left + self.width }
    #[inline] pub fn top(&self) -> f32 { self.bottom + self.height }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.bottom + self.height * 0.5)
    }

    /// True when the two boxes overlap with positive area on both axes.
    /// Boxes that only share an edge do **not** intersect, so a sprite resting
    /// exactly on top of a wall is not "inside" it.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right() - OVERLAP_EPSILON
            && self.right() > other.left + OVERLAP_EPSILON
            && self.bottom < other.top() - OVERLAP_EPSILON
            && self.top() > other.bottom + OVERLAP_EPSILON
    }

    /// Half-open containment: the left/bottom edges are inside, right/top are not.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.bottom && p.y < self.top()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self { left: self.left + dx, bottom: self.bottom + dy, ..*self }
    }

    /// Inclusive range of grid cells `(min_x, min_y)..=(max_x, max_y)` covered
    /// by this box on a grid of `cell_size` pixels.
    ///
    /// The far edges are nudged inward by a tiny epsilon so a box whose right
    /// edge lies exactly on a cell boundary does not spill into the next cell.
    pub fn cells(&self, cell_size: f32) -> ((i32, i32), (i32, i32)) {
        let eps = 1e-4;
        let min_x = (self.left / cell_size).floor() as i32;
        let min_y = (self.bottom / cell_size).floor() as i32;
        let max_x = ((self.right() - eps).max(self.left) / cell_size).floor() as i32;
        let max_y = ((self.top() - eps).max(self.bottom) / cell_size).floor() as i32;
        ((min_x, min_y), (max_x, max_y))
    }
}
