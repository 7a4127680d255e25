pub mod atlas;
pub mod pipeline;
pub mod text;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use atlas::{GpuTexture, TextureAtlas, empty_image};
use pipeline::{SpritePipeline, SpriteVertex, create_sprite_pipeline};
use text::Font;

use crate::camera::CameraUniform;
use crate::error::RenderError;
use crate::texture::TextureSource;

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: SpritePipeline,
    /// Camera view-projection buffer, shared by the sprite and text draws.
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    /// Bind group for the sprite atlas; rebuilt whenever the atlas is rebaked.
    sprite_bind_group: wgpu::BindGroup,
    /// Bind group for the built-in font atlas (never changes).
    font_bind_group: wgpu::BindGroup,
    pub(crate) atlas: TextureAtlas,
    pub(crate) font: Font,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        log::info!("using GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_sprite_pipeline(&device, format);

        // Start at the screen projection so the first frame is sane even
        // before the engine uploads the camera.
        let cam_uniform = CameraUniform::screen_ortho(config.width as f32, config.height as f32);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::cast_slice(&[cam_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sprite_bind_group = GpuTexture::upload(&device, &queue, &empty_image(), "sprite_atlas_tex")
            .bind_group(&device, &pipeline.texture_bind_group_layout, "sprite_atlas_bg");

        let (font, font_img) = Font::builtin();
        let font_bind_group = GpuTexture::upload(&device, &queue, &font_img, "font_atlas_tex")
            .bind_group(&device, &pipeline.texture_bind_group_layout, "font_atlas_bg");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            camera_buffer,
            camera_bind_group,
            sprite_bind_group,
            font_bind_group,
            atlas: TextureAtlas::new(),
            font,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Add textures to the sprite atlas, rebaking and re-uploading it if any
    /// of them are new.
    pub fn register_textures<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = TextureSource>,
    {
        if !self.atlas.register(sources) {
            return;
        }
        let img = self.atlas.bake();
        self.sprite_bind_group = GpuTexture::upload(&self.device, &self.queue, &img, "sprite_atlas_tex")
            .bind_group(&self.device, &self.pipeline.texture_bind_group_layout, "sprite_atlas_bg");
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Upload a new camera view-projection matrix to the GPU.
    pub fn update_camera(&mut self, uniform: &CameraUniform) {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(uniform)),
        );
    }

    /// Clear color as straight sRGB components in `[0, 1]`.
    pub fn set_clear_color(&mut self, rgba: [f32; 4]) {
        self.clear_color = wgpu::Color {
            r: srgb_to_linear(rgba[0]) as f64,
            g: srgb_to_linear(rgba[1]) as f64,
            b: srgb_to_linear(rgba[2]) as f64,
            a: rgba[3] as f64,
        };
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Render one frame: clear, sprites (sprite atlas), then text (font
    /// atlas).  Both draws use the camera projection.
    pub fn render(
        &mut self,
        sprite_verts: &[SpriteVertex],
        text_verts: &[SpriteVertex],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("world_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline.render_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for (verts, bind_group, label) in [
                (sprite_verts, &self.sprite_bind_group, "sprite_vertex_buffer"),
                (text_verts, &self.font_bind_group, "text_vertex_buffer"),
            ] {
                if verts.is_empty() {
                    continue;
                }
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(verts),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_bind_group(1, bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..verts.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
