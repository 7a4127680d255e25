use glam::Vec2;

use crate::geometry::Rect;
use crate::spatial_hash::SpatialHash;

// ---------------------------------------------------------------------------
// Sprite
// ---------------------------------------------------------------------------

/// A drawable, positioned image with an axis-aligned hit box.
///
/// `width`/`height` are the unscaled pixel dimensions of the texture; the
/// on-screen and collision size is that times `scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    /// Velocity in pixels per update tick.
    pub change: Vec2,
    /// Key of the texture region in the renderer's atlas.
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            change: Vec2::ZERO,
            texture: texture.into(),
            width,
            height,
            scale: 1.0,
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center = Vec2::new(x, y);
        self
    }

    pub fn scaled_width(&self) -> f32 { self.width * self.scale }
    pub fn scaled_height(&self) -> f32 { self.height * self.scale }

    pub fn hit_box(&self) -> Rect {
        Rect::from_center(self.center, self.scaled_width(), self.scaled_height())
    }

    pub fn left(&self) -> f32 { self.center.x - self.scaled_width() * 0.5 }
    pub fn right(&self) -> f32 { self.center.x + self.scaled_width() * 0.5 }
    pub fn bottom(&self) -> f32 { self.center.y - self.scaled_height() * 0.5 }
    pub fn top(&self) -> f32 { self.center.y + self.scaled_height() * 0.5 }

    pub fn set_left(&mut self, x: f32) { self.center.x = x + self.scaled_width() * 0.5; }
    pub fn set_right(&mut self, x: f32) { self.center.x = x - self.scaled_width() * 0.5; }
    pub fn set_bottom(&mut self, y: f32) { self.center.y = y + self.scaled_height() * 0.5; }
    pub fn set_top(&mut self, y: f32) { self.center.y = y - self.scaled_height() * 0.5; }
}

// ---------------------------------------------------------------------------
// SpriteId: generational handle into a SpriteList
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId {
    index: u32,
    generation: u32,
}

impl SpriteId {
    pub fn index(self) -> u32 { self.index }
    pub fn generation(self) -> u32 { self.generation }
}

struct Slot {
    generation: u32,
    /// Insertion rank of the current occupant; orders broad-phase results.
    rank: u64,
    sprite: Option<Sprite>,
}

// ---------------------------------------------------------------------------
// SpriteList
// ---------------------------------------------------------------------------

/// Ordered sprite collection with stable handles and an optional spatial
/// hash for static layers (walls, coins).
///
/// Removing a sprite bumps its slot's generation, so the old `SpriteId`
/// stops resolving even after the slot is recycled.
#[derive(Default)]
pub struct SpriteList {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live slot indices in insertion order (draw order).
    order: Vec<u32>,
    next_rank: u64,
    hash: Option<SpatialHash>,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spatial_hash(cell_size: f32) -> Self {
        Self { hash: Some(SpatialHash::new(cell_size)), ..Self::default() }
    }

    pub fn uses_spatial_hash(&self) -> bool { self.hash.is_some() }

    pub fn push(&mut self, sprite: Sprite) -> SpriteId {
        let rect = sprite.hit_box();
        let rank = self.next_rank;
        self.next_rank += 1;
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.sprite = Some(sprite);
                slot.rank = rank;
                SpriteId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, rank, sprite: Some(sprite) });
                SpriteId { index, generation: 0 }
            }
        };
        self.order.push(id.index);
        if let Some(hash) = self.hash.as_mut() {
            hash.insert(id, &rect);
        }
        id
    }

    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        if !self.contains(id) {
            return None;
        }
        let slot = &mut self.slots[id.index as usize];
        let sprite = slot.sprite.take()?;
        slot.generation += 1;
        self.free.push(id.index);
        self.order.retain(|&i| i != id.index);
        if let Some(hash) = self.hash.as_mut() {
            hash.remove(id, &sprite.hit_box());
        }
        Some(sprite)
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|s| s.generation == id.generation && s.sprite.is_some())
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.sprite.as_ref()
    }

    /// Mutable access for velocity/texture edits.  Moving a sprite that lives
    /// in a hashed list through this reference leaves the hash stale; use
    /// [`SpriteList::set_center`] for that.
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.sprite.as_mut()
    }

    /// Move a sprite, keeping the spatial hash in sync.
    pub fn set_center(&mut self, id: SpriteId, center: Vec2) -> bool {
        let Some(sprite) = self.get_mut(id) else { return false };
        let old = sprite.hit_box();
        sprite.center = center;
        let new = sprite.hit_box();
        if let Some(hash) = self.hash.as_mut() {
            hash.remove(id, &old);
            hash.insert(id, &new);
        }
        true
    }

    /// Live sprites in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> + '_ {
        self.order.iter().filter_map(move |&index| {
            let slot = &self.slots[index as usize];
            slot.sprite
                .as_ref()
                .map(|s| (SpriteId { index, generation: slot.generation }, s))
        })
    }

    pub fn ids(&self) -> Vec<SpriteId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.sprite.take().is_some() {
                slot.generation += 1;
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.order.clear();
        if let Some(hash) = self.hash.as_mut() {
            hash.clear();
        }
    }

    /// Broad phase: sprites whose hit boxes *may* overlap `rect`, in
    /// insertion order.  Without a spatial hash every sprite is a candidate.
    pub fn query(&self, rect: &Rect) -> Vec<SpriteId> {
        match &self.hash {
            Some(hash) => {
                let mut ids = hash.query(rect);
                ids.sort_by_key(|id| self.slots[id.index as usize].rank);
                ids
            }
            None => self.ids(),
        }
    }
}

impl std::fmt::Debug for SpriteList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteList")
            .field("len", &self.len())
            .field("spatial_hash", &self.hash.is_some())
            .finish()
    }
}
