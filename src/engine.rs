use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
pub use winit::keyboard::KeyCode;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::AudioContext;
use crate::camera::Camera;
use crate::error::EngineError;
use crate::input::InputState;
use crate::renderer::Renderer;
use crate::renderer::pipeline::{Flip, SpriteVertex, quad};
use crate::renderer::text::generate_text_mesh;
use crate::sprite::{Sprite, SpriteList};
use crate::texture::TextureSource;

/// Longest frame the fixed-step loop will try to catch up on.
const MAX_FRAME_TIME: f32 = 0.25;

// ── Color ──────────────────────────────────────────────────────────────────

/// Straight-alpha RGBA in `[0, 1]`, sRGB encoded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);

    pub const fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self([rgb[0] as f32 / 255.0, rgb[1] as f32 / 255.0, rgb[2] as f32 / 255.0, 1.0])
    }
}

// ── Game trait ──────────────────────────────────────────────────────────────

/// Callbacks the engine drives.  Key callbacks fire as soon as the event
/// arrives, before the next fixed update.
pub trait Game {
    fn on_enter(&mut self, _engine: &mut Engine) {}
    fn update(&mut self, engine: &mut Engine);
    fn render(&mut self, engine: &mut Engine);
    fn on_key_press(&mut self, _engine: &mut Engine, _key: KeyCode) {}
    fn on_key_release(&mut self, _engine: &mut Engine, _key: KeyCode) {}
}

// ── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine {
    /// GPU renderer: surface, pipeline and atlases.
    pub renderer: Renderer,
    pub(crate) camera: Camera,
    pub input: InputState,
    pub audio: AudioContext,
    /// World-space sprite quads queued this frame, in draw order.
    sprite_vertices: Vec<SpriteVertex>,
    /// World-space text quads queued this frame; drawn after all sprites.
    text_vertices: Vec<SpriteVertex>,
    /// Texture keys already reported as missing, so each warns once.
    missing_textures: HashSet<String>,
    dt: f32,
    tick: u64,
    /// Set by `request_quit()`; the event loop exits after the current callback.
    pub(crate) quit_requested: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn from_builder(renderer: Renderer, background: Color) -> Self {
        let size = renderer.size();
        let mut engine = Self {
            renderer,
            camera: Camera::new(size.width as f32, size.height as f32),
            input: InputState::new(),
            audio: AudioContext::new(),
            sprite_vertices: Vec::new(),
            text_vertices: Vec::new(),
            missing_textures: HashSet::new(),
            dt: 0.0,
            tick: 0,
            quit_requested: false,
        };
        engine.set_background_color(background);
        engine
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn dt(&self) -> f32 { self.dt }
    pub fn tick(&self) -> u64 { self.tick }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.input.is_key_held(key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.input.is_key_pressed(key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.input.is_key_released(key) }

    pub fn camera(&self) -> &Camera { &self.camera }
    pub fn camera_mut(&mut self) -> &mut Camera { &mut self.camera }

    /// Start panning the camera's bottom-left corner toward `goal`.
    pub fn move_camera_to(&mut self, goal: Vec2, speed: f32) {
        self.camera.move_to(goal, speed);
    }

    pub fn audio(&mut self) -> &mut AudioContext { &mut self.audio }

    pub fn set_background_color(&mut self, color: Color) {
        self.renderer.set_clear_color(color.0);
    }

    /// Make textures available to `draw_sprite`.  Rebakes the atlas when
    /// anything new is added, so batch registrations where possible.
    pub fn register_textures<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = TextureSource>,
    {
        self.renderer.register_textures(sources);
    }

    /// Signal that the application should exit.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    // ── Drawing ────────────────────────────────────────────────────────────

    /// Queue a sprite for this frame.  Sprites whose texture was never
    /// registered are skipped with a one-time warning.
    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        let Some(entry) = self.renderer.atlas.entry(&sprite.texture) else {
            if self.missing_textures.insert(sprite.texture.clone()) {
                log::warn!("texture '{}' is not registered; sprite not drawn", sprite.texture);
            }
            return;
        };
        let flip = Flip { horizontal: sprite.flip_h, vertical: sprite.flip_v };
        let verts = quad(&sprite.hit_box(), entry.uv_min, entry.uv_max, flip, Color::WHITE.0);
        self.sprite_vertices.extend_from_slice(&verts);
    }

    pub fn draw_sprite_list(&mut self, list: &SpriteList) {
        for (_, sprite) in list.iter() {
            self.draw_sprite(sprite);
        }
    }

    /// Queue world-space text with its first line's bottom-left at `origin`.
    pub fn draw_text(&mut self, text: &str, origin: Vec2, color: Color, size: f32) {
        let verts = generate_text_mesh(text, &self.renderer.font, origin, size, color.0);
        self.text_vertices.extend(verts);
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    pub(crate) fn sync_camera(&mut self) {
        let uniform = self.camera.build_view_proj();
        self.renderer.update_camera(&uniform);
    }

    fn handle_resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize(size);
        let size = self.renderer.size();
        self.camera.resize(size.width as f32, size.height as f32);
    }

    fn render_frame(&mut self) {
        self.sync_camera();
        match self.renderer.render(&self.sprite_vertices, &self.text_vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost; reconfiguring");
                let size = self.renderer.size();
                self.renderer.resize(size);
            }
            Err(e) => log::warn!("render error: {e}; frame skipped"),
        }
        self.sprite_vertices.clear();
        self.text_vertices.clear();
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    target_ups: u32,
    background: Color,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "tilehop".into(),
            width: 800,
            height: 600,
            target_ups: 60,
            background: Color::BLACK,
        }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self { self.title = title.into(); self }
    pub fn with_size(mut self, width: u32, height: u32) -> Self { self.width = width; self.height = height; self }
    pub fn with_ups(mut self, ups: u32) -> Self { self.target_ups = ups.max(1); self }
    pub fn with_background(mut self, color: Color) -> Self { self.background = color; self }

    /// Open the window and drive `game` until it quits or the window closes.
    pub fn run(self, game: impl Game + 'static) -> Result<(), EngineError> {
        let event_loop = EventLoop::new()?;
        let fixed_dt = 1.0 / self.target_ups as f32;
        let mut app = App {
            config: self,
            game: Box::new(game),
            engine: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
            error: None,
        };
        event_loop.run_app(&mut app)?;
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: EngineBuilder,
    game: Box<dyn Game>,
    engine: Option<Engine>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
    /// Startup failure raised inside a callback, returned from `run`.
    error: Option<EngineError>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Engine, EngineError> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&self.config.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        self.config.width,
                        self.config.height,
                    ))
                    .with_resizable(false),
            )?,
        );
        let renderer = pollster::block_on(Renderer::new(window))?;
        Ok(Engine::from_builder(renderer, self.config.background))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(mut engine) => {
                self.game.on_enter(&mut engine);
                self.engine = Some(engine);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_ref() {
            engine.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => engine.handle_resize(size),

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(MAX_FRAME_TIME),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                while self.accumulator >= self.fixed_dt {
                    engine.dt = self.fixed_dt;
                    engine.tick += 1;
                    self.game.update(engine);
                    if engine.quit_requested {
                        event_loop.exit();
                        return;
                    }
                    self.accumulator -= self.fixed_dt;
                }

                engine.camera.update();
                self.game.render(engine);
                engine.render_frame();

                // End of frame cleanup
                engine.input.clear_frame_state();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        // OS key repeat is not a new press.
                        if engine.input.press(code) {
                            self.game.on_key_press(engine, code);
                        }
                    }
                    ElementState::Released => {
                        engine.input.release(code);
                        self.game.on_key_release(engine, code);
                    }
                }
                if engine.quit_requested {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
