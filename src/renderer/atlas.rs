use std::collections::{HashMap, HashSet};

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::texture::{TextureSource, placeholder};

// ── AtlasEntry ───────────────────────────────────────────────────────────────

/// Where one texture ended up inside the baked atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasEntry {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    /// Pixel size of the packed image.
    pub width: u32,
    pub height: u32,
}

// ── Shelf packing (pure, GPU-free) ───────────────────────────────────────────

/// One image's position inside the packed atlas.
#[derive(Debug, PartialEq)]
pub struct Placement {
    pub key: String,
    /// Top-left pixel coordinate inside the atlas.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Transparent gap kept between packed images so nearest sampling at an
/// edge never picks up a neighbour.
pub const PADDING: u32 = 1;

/// Shelf-pack `(key, width, height)` items into rows of at most `max_width`
/// pixels.  Taller items go first; duplicate keys keep their first
/// occurrence after sorting; items wider than a row are skipped.
///
/// Returns `(placements, atlas_width, atlas_height)`, both rounded up to a
/// power of two.
pub fn pack(items: &[(String, u32, u32)], max_width: u32) -> (Vec<Placement>, u32, u32) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].2.cmp(&items[a].2));

    let mut placed: HashSet<&str> = HashSet::new();
    let mut placements = Vec::new();
    let mut cur_x = 0u32;
    let mut cur_y = 0u32;
    let mut row_h = 0u32;

    for &i in &order {
        let (ref key, w, h) = items[i];
        if !placed.insert(key.as_str()) {
            continue;
        }
        if w > max_width {
            log::warn!("texture '{key}' is wider ({w}px) than the atlas ({max_width}px); skipping");
            continue;
        }
        if cur_x + w > max_width {
            cur_y += row_h + PADDING;
            cur_x = 0;
            row_h = 0;
        }
        placements.push(Placement { key: key.clone(), x: cur_x, y: cur_y, width: w, height: h });
        cur_x += w + PADDING;
        row_h = row_h.max(h);
    }

    let atlas_h = (cur_y + row_h).next_power_of_two().max(1);
    let atlas_w = max_width.next_power_of_two();
    (placements, atlas_w, atlas_h)
}

// ── TextureAtlas ─────────────────────────────────────────────────────────────

/// CPU side of the sprite atlas: the set of registered texture sources and
/// the UV table of the last bake.
#[derive(Debug, Default)]
pub struct TextureAtlas {
    sources: Vec<TextureSource>,
    known: HashSet<String>,
    entries: HashMap<String, AtlasEntry>,
}

impl TextureAtlas {
    /// Maximum row width of the packed atlas in pixels.
    pub const MAX_WIDTH: u32 = 2048;
    /// Size of the stand-in used for a whole-file texture that cannot be read.
    pub const PLACEHOLDER_SIZE: u32 = 32;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add sources not seen before.  Returns `true` when the atlas needs a
    /// rebake.
    pub fn register<I>(&mut self, sources: I) -> bool
    where
        I: IntoIterator<Item = TextureSource>,
    {
        let mut changed = false;
        for source in sources {
            if self.known.insert(source.key.clone()) {
                self.sources.push(source);
                changed = true;
            }
        }
        changed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.known.contains(key)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// UVs of a texture as of the last [`TextureAtlas::bake`].
    pub fn entry(&self, key: &str) -> Option<&AtlasEntry> {
        self.entries.get(key)
    }

    /// Decode every registered source, pack them and composite the atlas
    /// image.  Unreadable images become placeholders; baking never fails.
    pub fn bake(&mut self) -> RgbaImage {
        let images: Vec<(String, RgbaImage)> = self
            .sources
            .iter()
            .map(|s| (s.key.clone(), s.load_or_placeholder(Self::PLACEHOLDER_SIZE, Self::PLACEHOLDER_SIZE)))
            .collect();
        let dims: Vec<(String, u32, u32)> = images
            .iter()
            .map(|(key, img)| (key.clone(), img.width(), img.height()))
            .collect();

        let (placements, atlas_w, atlas_h) = pack(&dims, Self::MAX_WIDTH);
        let mut atlas = RgbaImage::new(atlas_w, atlas_h);
        let lookup: HashMap<&str, &RgbaImage> = images.iter().map(|(k, i)| (k.as_str(), i)).collect();

        self.entries.clear();
        for p in &placements {
            let Some(img) = lookup.get(p.key.as_str()) else { continue };
            image::imageops::replace(&mut atlas, *img, p.x as i64, p.y as i64);
            let entry = AtlasEntry {
                uv_min: [p.x as f32 / atlas_w as f32, p.y as f32 / atlas_h as f32],
                uv_max: [
                    (p.x + p.width) as f32 / atlas_w as f32,
                    (p.y + p.height) as f32 / atlas_h as f32,
                ],
                width: p.width,
                height: p.height,
            };
            self.entries.insert(p.key.clone(), entry);
        }

        log::info!("baked texture atlas: {} textures into {atlas_w}x{atlas_h}", self.entries.len());
        atlas
    }
}

/// Fallback used before any texture is registered.
pub fn empty_image() -> RgbaImage {
    placeholder(1, 1)
}

// ── GPU upload ───────────────────────────────────────────────────────────────

/// A sampled RGBA texture ready to be bound.
pub struct GpuTexture {
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, img: &RgbaImage, label: &str) -> Self {
        let (w, h) = img.dimensions();
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self { texture_view, sampler }
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}
