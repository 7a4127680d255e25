use glam::Vec2;

use crate::camera::user_centered_target;
use crate::collision::check_for_collision_with_list;
use crate::config::{GameConfig, PhysicsSettings};
use crate::error::LoadError;
use crate::physics::PlatformerPhysics;
use crate::sprite::{Sprite, SpriteId, SpriteList};
use crate::tilemap::TileMap;

use super::Action;

pub const WALLS_LAYER: &str = "Walls";
pub const COINS_LAYER: &str = "Coins";
pub const BACKGROUND_LAYER: &str = "Background";
pub const END_LAYER: &str = "End";

/// Offset of the game-over text from the player's center.
pub const GAME_OVER_TEXT_OFFSET: Vec2 = Vec2::new(50.0, 100.0);
pub const GAME_OVER_FONT_SIZE: f32 = 30.0;

/// Something the shell may want to react to (sound, logging).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LevelEvent {
    Jumped,
    CoinCollected { score: u32 },
    GameOver { score: u32 },
}

/// All state the update loop touches.  Holds no window or GPU objects.
#[derive(Debug)]
pub struct Level {
    pub player_list: SpriteList,
    player: SpriteId,
    pub walls: SpriteList,
    pub coins: SpriteList,
    pub background: SpriteList,
    pub end: SpriteList,
    physics: PlatformerPhysics,
    movement: PhysicsSettings,
    score: u32,
    game_over: bool,
    end_of_map: f32,
}

impl Level {
    /// Build a level from a loaded map.  The map must have a walls layer;
    /// the other layers are optional.
    pub fn new(mut tile_map: TileMap, mut player: Sprite, config: &GameConfig) -> Result<Self, LoadError> {
        let walls = tile_map
            .take_layer(WALLS_LAYER)
            .ok_or_else(|| LoadError::MissingLayer(WALLS_LAYER.to_string()))?;
        let mut optional = |name: &str| {
            tile_map.take_layer(name).unwrap_or_else(|| {
                log::warn!("tile map has no '{name}' layer; using an empty one");
                SpriteList::new()
            })
        };
        let coins = optional(COINS_LAYER);
        let background = optional(BACKGROUND_LAYER);
        let end = optional(END_LAYER);
        for name in tile_map.sprite_lists.keys() {
            log::debug!("ignoring map layer '{name}'");
        }

        player.center = Vec2::new(config.player.start_x, config.player.start_y);
        player.change = Vec2::ZERO;
        let mut player_list = SpriteList::new();
        let player = player_list.push(player);

        Ok(Self {
            player_list,
            player,
            walls,
            coins,
            background,
            end,
            physics: PlatformerPhysics::new(config.physics.gravity),
            movement: config.physics.clone(),
            score: 0,
            game_over: false,
            end_of_map: tile_map.width as f32 * config.grid_pixel_size(),
        })
    }

    pub fn player(&self) -> &Sprite {
        match self.player_list.get(self.player) {
            Some(sprite) => sprite,
            None => unreachable!("player sprite is never removed"),
        }
    }

    fn player_mut(&mut self) -> &mut Sprite {
        match self.player_list.get_mut(self.player) {
            Some(sprite) => sprite,
            None => unreachable!("player sprite is never removed"),
        }
    }

    pub fn score(&self) -> u32 { self.score }
    pub fn is_game_over(&self) -> bool { self.game_over }
    /// Right edge of the map in world pixels.
    pub fn end_of_map(&self) -> f32 { self.end_of_map }
    pub fn physics(&self) -> &PlatformerPhysics { &self.physics }

    /// React to an action key going down.
    pub fn on_key_press(&mut self, action: Action) -> Option<LevelEvent> {
        match action {
            Action::Jump => {
                let walls = [&self.walls];
                let player = self.player_list.get_mut(self.player)?;
                if self.physics.can_jump(player, &walls) {
                    self.physics.jump(player, self.movement.jump_speed);
                    return Some(LevelEvent::Jumped);
                }
                None
            }
            Action::Left => {
                let speed = self.movement.movement_speed;
                self.player_mut().change.x = -speed;
                None
            }
            Action::Right => {
                let speed = self.movement.movement_speed;
                self.player_mut().change.x = speed;
                None
            }
            Action::Quit => None,
        }
    }

    pub fn on_key_release(&mut self, action: Action) {
        if matches!(action, Action::Left | Action::Right) {
            self.player_mut().change.x = 0.0;
        }
    }

    /// Advance one tick.
    pub fn update(&mut self) -> Vec<LevelEvent> {
        let mut events = Vec::new();

        if !self.game_over {
            if let Some(player) = self.player_list.get_mut(self.player) {
                self.physics.update(player, &[&self.walls]);
            }
        }

        if !self.game_over && !check_for_collision_with_list(self.player(), &self.end).is_empty() {
            self.game_over = true;
            log::info!("reached the end with {} coins", self.score);
            events.push(LevelEvent::GameOver { score: self.score });
        }

        // Coins keep counting after game over.
        let hits = check_for_collision_with_list(self.player(), &self.coins);
        for id in hits {
            if self.coins.remove(id).is_some() {
                self.score += 1;
                events.push(LevelEvent::CoinCollected { score: self.score });
            }
        }

        events
    }

    /// Camera origin that keeps the player in view.
    pub fn camera_target(&self, viewport_width: f32, viewport_height: f32) -> Vec2 {
        user_centered_target(self.player().center, viewport_width, viewport_height)
    }

    pub fn game_over_text(&self) -> String {
        format!("Game Over - Score {}", self.score)
    }

    pub fn game_over_text_origin(&self) -> Vec2 {
        self.player().center + GAME_OVER_TEXT_OFFSET
    }

    /// Sprite layers in the order they are drawn.
    pub fn layers_in_draw_order(&self) -> [&SpriteList; 5] {
        [&self.walls, &self.coins, &self.background, &self.end, &self.player_list]
    }
}
