//! The platformer: a headless [`Level`] plus the [`PlatformerGame`] shell
//! that wires it to the engine (input, camera, drawing, sound).

pub mod level;

use std::path::Path;

pub use level::{Level, LevelEvent};

use crate::audio::SoundConfig;
use crate::config::GameConfig;
use crate::engine::{Color, Engine, Game, KeyCode};
use crate::error::LoadError;
use crate::input::ActionMap;
use crate::sprite::Sprite;
use crate::texture::{TextureSource, image_size, texture_key};
use crate::tilemap::load_tilemap;

const COIN_SOUND: &str = "coin";
const JUMP_SOUND: &str = "jump";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Left,
    Right,
    Quit,
}

/// Arrow keys to move and jump, Escape to quit.
pub fn default_bindings() -> ActionMap<Action> {
    let mut actions = ActionMap::new();
    actions.bind(Action::Jump, KeyCode::ArrowUp);
    actions.bind(Action::Left, KeyCode::ArrowLeft);
    actions.bind(Action::Right, KeyCode::ArrowRight);
    actions.bind(Action::Quit, KeyCode::Escape);
    actions
}

/// Player sprite for `path`, sized from the image header.  A missing image
/// still yields a sprite; the renderer substitutes a placeholder.
pub fn player_sprite(path: &Path, scaling: f32) -> Sprite {
    let fallback = crate::renderer::atlas::TextureAtlas::PLACEHOLDER_SIZE;
    let (w, h) = image_size(path).unwrap_or_else(|e| {
        log::warn!("{e}; player uses a {fallback}x{fallback} placeholder");
        (fallback, fallback)
    });
    Sprite::new(texture_key(path), w as f32, h as f32).with_scale(scaling)
}

pub struct PlatformerGame {
    level: Level,
    actions: ActionMap<Action>,
    config: GameConfig,
    /// Handed to the renderer on enter.
    textures: Vec<TextureSource>,
}

impl PlatformerGame {
    /// Load the map and player described by `config`.
    pub fn new(config: GameConfig) -> Result<Self, LoadError> {
        let tile_map = load_tilemap(&config.map.path, &config.map.layers, config.map.tile_scaling)?;
        let mut textures = tile_map.textures.clone();
        textures.push(TextureSource::file(&config.player.sprite));

        let player = player_sprite(&config.player.sprite, config.player.scaling);
        let level = Level::new(tile_map, player, &config)?;
        Ok(Self { level, actions: default_bindings(), config, textures })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    fn pan_camera_to_user(&self, engine: &mut Engine) {
        let camera = engine.camera();
        let target = self.level.camera_target(camera.viewport_width, camera.viewport_height);
        engine.move_camera_to(target, self.config.camera.panning_fraction);
    }
}

impl Game for PlatformerGame {
    fn on_enter(&mut self, engine: &mut Engine) {
        engine.register_textures(self.textures.drain(..));
        engine.set_background_color(Color::from_rgb8(self.config.window.background));

        let audio = engine.audio();
        for (name, path) in [
            (COIN_SOUND, &self.config.audio.coin_sound),
            (JUMP_SOUND, &self.config.audio.jump_sound),
        ] {
            if let Some(path) = path {
                audio.load_sound(name, path);
            }
        }

        self.pan_camera_to_user(engine);
    }

    fn update(&mut self, engine: &mut Engine) {
        for event in self.level.update() {
            match event {
                LevelEvent::CoinCollected { .. } => engine.audio().play(COIN_SOUND, SoundConfig::default()),
                LevelEvent::GameOver { score } => log::info!("game over, score {score}"),
                LevelEvent::Jumped => {}
            }
        }
        self.pan_camera_to_user(engine);
    }

    fn render(&mut self, engine: &mut Engine) {
        for list in self.level.layers_in_draw_order() {
            engine.draw_sprite_list(list);
        }
        if self.level.is_game_over() {
            engine.draw_text(
                &self.level.game_over_text(),
                self.level.game_over_text_origin(),
                Color::BLACK,
                level::GAME_OVER_FONT_SIZE,
            );
        }
    }

    fn on_key_press(&mut self, engine: &mut Engine, key: KeyCode) {
        let Some(action) = self.actions.action_for(key) else { return };
        if action == Action::Quit {
            engine.request_quit();
            return;
        }
        if let Some(LevelEvent::Jumped) = self.level.on_key_press(action) {
            engine.audio().play(JUMP_SOUND, SoundConfig::default());
        }
    }

    fn on_key_release(&mut self, _engine: &mut Engine, key: KeyCode) {
        if let Some(action) = self.actions.action_for(key) {
            self.level.on_key_release(action);
        }
    }
}
