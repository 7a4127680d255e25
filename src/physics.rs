//! Platformer stepping for a single body against static solid layers.
//!
//! Axes are resolved separately (vertical first, then horizontal), so a hit
//! found while moving along one axis can only have come from that axis.

use crate::collision::{check_for_collision_with_lists, collisions_with_rect};
use crate::sprite::{Sprite, SpriteId, SpriteList};

/// How far below the player `can_jump` probes for ground, in pixels.
pub const JUMP_PROBE_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    /// Subtracted from the player's vertical velocity every tick.
    pub gravity_constant: f32,
    multi_jump: bool,
    allowed_jumps: u32,
    jumps_since_ground: u32,
}

impl PlatformerPhysics {
    pub fn new(gravity_constant: f32) -> Self {
        Self {
            gravity_constant,
            multi_jump: false,
            allowed_jumps: 1,
            jumps_since_ground: 0,
        }
    }

    /// Allow up to `allowed_jumps` jumps before touching ground again.
    pub fn enable_multi_jump(&mut self, allowed_jumps: u32) {
        self.multi_jump = true;
        self.allowed_jumps = allowed_jumps;
    }

    pub fn disable_multi_jump(&mut self) {
        self.multi_jump = false;
        self.allowed_jumps = 1;
        self.jumps_since_ground = 0;
    }

    pub fn jumps_since_ground(&self) -> u32 { self.jumps_since_ground }

    /// True when the player stands on a wall (or still has air jumps left).
    ///
    /// Standing is detected by shifting the hit box `JUMP_PROBE_DISTANCE`
    /// pixels down and looking for overlap; being grounded resets the jump
    /// counter.
    pub fn can_jump(&mut self, player: &Sprite, walls: &[&SpriteList]) -> bool {
        let probe = player.hit_box().translated(0.0, -JUMP_PROBE_DISTANCE);
        let grounded = walls.iter().any(|list| !collisions_with_rect(&probe, list).is_empty());
        if grounded {
            self.jumps_since_ground = 0;
            return true;
        }
        self.multi_jump && self.jumps_since_ground < self.allowed_jumps
    }

    /// Launch the player upward and count the jump.
    pub fn jump(&mut self, player: &mut Sprite, velocity: f32) {
        player.change.y = velocity;
        self.jumps_since_ground += 1;
    }

    /// Advance one tick.  Returns every wall sprite touched, tagged with the
    /// index of its list in `walls`.
    pub fn update(&mut self, player: &mut Sprite, walls: &[&SpriteList]) -> Vec<(usize, SpriteId)> {
        let mut touched = Vec::new();

        // A body spawned (or left) inside geometry is lifted on top of it.
        let stuck = check_for_collision_with_lists(player, walls);
        if !stuck.is_empty() {
            let top = max_of(&stuck, walls, Sprite::top);
            log::debug!("player overlapped {} wall(s); lifting to y={top}", stuck.len());
            player.set_bottom(top);
            touched.extend(stuck);
        }

        player.change.y -= self.gravity_constant;

        // ── Vertical ─────────────────────────────────────────────────────────
        player.center.y += player.change.y;
        let hits = check_for_collision_with_lists(player, walls);
        if !hits.is_empty() {
            if player.change.y > 0.0 {
                player.set_top(min_of(&hits, walls, Sprite::bottom));
            } else if player.change.y < 0.0 {
                player.set_bottom(max_of(&hits, walls, Sprite::top));
                self.jumps_since_ground = 0;
            }
            player.change.y = 0.0;
            touched.extend(hits);
        }

        // ── Horizontal ───────────────────────────────────────────────────────
        if player.change.x != 0.0 {
            player.center.x += player.change.x;
            let hits = check_for_collision_with_lists(player, walls);
            if !hits.is_empty() {
                // Try walking up a ramp or a low step first.
                let lift = player.change.x.abs();
                player.center.y += lift;
                if !check_for_collision_with_lists(player, walls).is_empty() {
                    player.center.y -= lift;
                    if player.change.x > 0.0 {
                        player.set_right(min_of(&hits, walls, Sprite::left));
                    } else {
                        player.set_left(max_of(&hits, walls, Sprite::right));
                    }
                }
                touched.extend(hits);
            }
        }

        touched.sort_by_key(|&(list, id)| (list, id.index()));
        touched.dedup();
        touched
    }
}

fn edges<'a>(
    hits: &'a [(usize, SpriteId)],
    walls: &'a [&SpriteList],
    edge: fn(&Sprite) -> f32,
) -> impl Iterator<Item = f32> + 'a {
    hits.iter().filter_map(move |&(list, id)| walls[list].get(id).map(edge))
}

fn max_of(hits: &[(usize, SpriteId)], walls: &[&SpriteList], edge: fn(&Sprite) -> f32) -> f32 {
    edges(hits, walls, edge).fold(f32::NEG_INFINITY, f32::max)
}

fn min_of(hits: &[(usize, SpriteId)], walls: &[&SpriteList], edge: fn(&Sprite) -> f32) -> f32 {
    edges(hits, walls, edge).fold(f32::INFINITY, f32::min)
}
