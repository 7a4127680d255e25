use std::collections::{HashMap, HashSet};

use crate::geometry::Rect;
use crate::sprite::SpriteId;

/// Default broad-phase cell edge in world pixels.
pub const DEFAULT_CELL_SIZE: f32 = 128.0;

/// Uniform-grid broad phase.  Each sprite is filed under every cell its hit
/// box touches; a query returns everything filed under the cells the query
/// box touches.  Narrow-phase overlap tests are the caller's job.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<SpriteId>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size: cell_size.max(1.0), buckets: HashMap::new() }
    }

    pub fn cell_size(&self) -> f32 { self.cell_size }

    pub fn insert(&mut self, id: SpriteId, rect: &Rect) {
        let ((x0, y0), (x1, y1)) = rect.cells(self.cell_size);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.buckets.entry((cx, cy)).or_default().push(id);
            }
        }
    }

    /// Remove `id` from the cells covered by `rect`.  `rect` must be the box
    /// the sprite was inserted with.
    pub fn remove(&mut self, id: SpriteId, rect: &Rect) {
        let ((x0, y0), (x1, y1)) = rect.cells(self.cell_size);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(bucket) = self.buckets.get_mut(&(cx, cy)) {
                    bucket.retain(|&other| other != id);
                    if bucket.is_empty() {
                        self.buckets.remove(&(cx, cy));
                    }
                }
            }
        }
    }

    /// Ids filed under any cell `rect` touches, each reported once.
    pub fn query(&self, rect: &Rect) -> Vec<SpriteId> {
        let ((x0, y0), (x1, y1)) = rect.cells(self.cell_size);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                let Some(bucket) = self.buckets.get(&(cx, cy)) else { continue };
                for &id in bucket {
                    if seen.insert(id) {
                        out.push(id);
                    }
                }
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Number of distinct ids currently filed.
    pub fn len(&self) -> usize {
        self.buckets.values().flatten().collect::<HashSet<_>>().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for SpatialHash {
    fn default() -> Self { Self::new(DEFAULT_CELL_SIZE) }
}
