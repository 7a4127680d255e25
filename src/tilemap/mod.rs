//! Tiled map loader.
//!
//! Reads orthogonal Tiled JSON maps and turns each tile or object layer into a
//! named [`SpriteList`].  Rows are flipped on the way in: Tiled counts rows
//! from the top, the game world's y axis points up from the map's bottom edge.

pub mod format;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;
use crate::sprite::{Sprite, SpriteList};
use crate::spatial_hash::DEFAULT_CELL_SIZE;
use crate::texture::{Region, TextureSource};
use format::{RawLayer, RawLayerData, RawMap, RawObjectGroup, RawTileLayer, RawTileset, RawTilesetEntry};

const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;
const ROTATED_HEXAGONAL_120: u32 = 0x1000_0000;
const GID_MASK: u32 = !(FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY | ROTATED_HEXAGONAL_120);

/// Per-layer load options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    /// Build a spatial hash for the layer.  Worth it for layers that are
    /// collision-tested every tick and never move (walls, pickups).
    pub use_spatial_hash: bool,
}

/// A loaded map: named sprite layers plus the textures they reference.
#[derive(Debug)]
pub struct TileMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub scaling: f32,
    pub sprite_lists: HashMap<String, SpriteList>,
    /// Every texture region a sprite in `sprite_lists` refers to.
    pub textures: Vec<TextureSource>,
}

impl TileMap {
    /// Map width in world pixels.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_width as f32 * self.scaling
    }

    /// Map height in world pixels.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_height as f32 * self.scaling
    }

    /// Remove and return a layer by name.
    pub fn take_layer(&mut self, name: &str) -> Option<SpriteList> {
        self.sprite_lists.remove(name)
    }

    /// Parse map JSON that was read from `source_path`.  Tileset references
    /// and image paths resolve relative to that file's directory.
    pub fn from_json_str(
        json: &str,
        source_path: &Path,
        options: &HashMap<String, LayerOptions>,
        scaling: f32,
    ) -> Result<Self, LoadError> {
        let raw: RawMap = serde_json::from_str(json)
            .map_err(|source| LoadError::Json { path: source_path.to_path_buf(), source })?;
        if raw.infinite {
            return Err(LoadError::InfiniteMap { path: source_path.to_path_buf() });
        }

        let base_dir = source_path.parent().unwrap_or(Path::new(""));
        let tilesets = resolve_tilesets(raw.tilesets, base_dir, source_path)?;

        let mut builder = Builder {
            path: source_path,
            map_height_px: raw.height as f32 * raw.tile_height as f32,
            tile_width: raw.tile_width as f32,
            tile_height: raw.tile_height as f32,
            scaling,
            options,
            tilesets: &tilesets,
            lists: HashMap::new(),
            textures: HashMap::new(),
        };
        for layer in &raw.layers {
            builder.add_layer(layer)?;
        }

        let mut textures: Vec<TextureSource> = builder.textures.into_values().collect();
        textures.sort_by(|a, b| a.key.cmp(&b.key));

        log::info!(
            "loaded map {} ({}x{} tiles, {} layers, {} textures)",
            source_path.display(),
            raw.width,
            raw.height,
            builder.lists.len(),
            textures.len(),
        );

        Ok(Self {
            width: raw.width,
            height: raw.height,
            tile_width: raw.tile_width,
            tile_height: raw.tile_height,
            scaling,
            sprite_lists: builder.lists,
            textures,
        })
    }
}

/// Read and parse a Tiled JSON map from disk.
pub fn load_tilemap(
    path: impl AsRef<Path>,
    options: &HashMap<String, LayerOptions>,
    scaling: f32,
) -> Result<TileMap, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    TileMap::from_json_str(&json, path, options, scaling)
}

// ── Tilesets ──────────────────────────────────────────────────────────────────

struct Tileset {
    first_gid: u32,
    name: String,
    tile_width: u32,
    tile_height: u32,
    kind: TilesetKind,
}

enum TilesetKind {
    /// One sheet cut into a grid.
    Sheet { image: PathBuf, columns: u32, tile_count: u32, margin: u32, spacing: u32 },
    /// One image per tile, keyed by local id.
    Collection(HashMap<u32, (PathBuf, u32, u32)>),
}

/// What a single gid draws: texture plus its unscaled pixel size.
struct TileImage {
    texture: TextureSource,
    width: u32,
    height: u32,
}

impl Tileset {
    fn from_raw(first_gid: u32, raw: RawTileset, dir: &Path, path: &Path) -> Result<Self, LoadError> {
        let kind = if let Some(image) = raw.image {
            TilesetKind::Sheet {
                image: dir.join(image),
                columns: raw.columns.max(1),
                tile_count: raw.tile_count,
                margin: raw.margin,
                spacing: raw.spacing,
            }
        } else if raw.tiles.iter().any(|t| t.image.is_some()) {
            let images = raw
                .tiles
                .into_iter()
                .filter_map(|t| {
                    let image = t.image?;
                    Some((t.id, (dir.join(image), t.image_width, t.image_height)))
                })
                .collect();
            TilesetKind::Collection(images)
        } else {
            return Err(LoadError::TilesetWithoutImage { path: path.to_path_buf(), tileset: raw.name });
        };
        Ok(Self {
            first_gid,
            name: raw.name,
            tile_width: raw.tile_width,
            tile_height: raw.tile_height,
            kind,
        })
    }

    fn image(&self, local_id: u32) -> Option<TileImage> {
        match &self.kind {
            TilesetKind::Sheet { image, columns, tile_count, margin, spacing } => {
                // A zero count means the tileset did not say; trust the gid.
                if *tile_count > 0 && local_id >= *tile_count {
                    return None;
                }
                let col = local_id % columns;
                let row = local_id / columns;
                // Saturates on nonsense tileset sizes; cropping clips it later.
                let region = Region {
                    x: margin.saturating_add(col.saturating_mul(self.tile_width.saturating_add(*spacing))),
                    y: margin.saturating_add(row.saturating_mul(self.tile_height.saturating_add(*spacing))),
                    width: self.tile_width,
                    height: self.tile_height,
                };
                Some(TileImage {
                    texture: TextureSource::cell(image, local_id, region),
                    width: self.tile_width,
                    height: self.tile_height,
                })
            }
            TilesetKind::Collection(images) => {
                let (path, w, h) = images.get(&local_id)?;
                Some(TileImage {
                    texture: TextureSource::file(path),
                    width: if *w > 0 { *w } else { self.tile_width },
                    height: if *h > 0 { *h } else { self.tile_height },
                })
            }
        }
    }
}

fn resolve_tilesets(entries: Vec<RawTilesetEntry>, base_dir: &Path, map_path: &Path) -> Result<Vec<Tileset>, LoadError> {
    let mut tilesets = Vec::with_capacity(entries.len());
    for entry in entries {
        let tileset = match entry {
            RawTilesetEntry::Embedded { firstgid, tileset } => {
                Tileset::from_raw(firstgid, tileset, base_dir, map_path)?
            }
            RawTilesetEntry::External { firstgid, source } => {
                let ts_path = base_dir.join(source);
                let json = std::fs::read_to_string(&ts_path)
                    .map_err(|source| LoadError::Io { path: ts_path.clone(), source })?;
                let raw: RawTileset = serde_json::from_str(&json)
                    .map_err(|source| LoadError::Json { path: ts_path.clone(), source })?;
                let dir = ts_path.parent().unwrap_or(Path::new(""));
                Tileset::from_raw(firstgid, raw, dir, &ts_path)?
            }
        };
        log::debug!("tileset '{}' starts at gid {}", tileset.name, tileset.first_gid);
        tilesets.push(tileset);
    }
    tilesets.sort_by_key(|t| t.first_gid);
    Ok(tilesets)
}

// ── Layer building ────────────────────────────────────────────────────────────

struct Builder<'a> {
    path: &'a Path,
    map_height_px: f32,
    tile_width: f32,
    tile_height: f32,
    scaling: f32,
    options: &'a HashMap<String, LayerOptions>,
    tilesets: &'a [Tileset],
    lists: HashMap<String, SpriteList>,
    textures: HashMap<String, TextureSource>,
}

impl Builder<'_> {
    fn add_layer(&mut self, layer: &RawLayer) -> Result<(), LoadError> {
        match layer {
            RawLayer::TileLayer(tiles) => {
                let list = self.tile_layer(tiles)?;
                self.insert(&tiles.name, list);
            }
            RawLayer::ObjectGroup(group) => {
                let list = self.object_layer(group)?;
                self.insert(&group.name, list);
            }
            RawLayer::Group(group) => {
                for child in &group.layers {
                    self.add_layer(child)?;
                }
            }
            RawLayer::ImageLayer(named) => {
                log::debug!("skipping image layer '{}'", named.name);
            }
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, list: SpriteList) {
        if self.lists.insert(name.to_string(), list).is_some() {
            log::warn!("{}: duplicate layer name '{name}'; keeping the last one", self.path.display());
        }
    }

    fn new_list(&self, name: &str) -> SpriteList {
        match self.options.get(name) {
            Some(opts) if opts.use_spatial_hash => SpriteList::with_spatial_hash(DEFAULT_CELL_SIZE),
            _ => SpriteList::new(),
        }
    }

    /// Sprite for `raw_gid` whose unscaled bottom-left corner sits at
    /// (`left`, `bottom`) in y-up map pixels.  `None` for the empty gid.
    fn sprite(&mut self, raw_gid: u32, left: f32, bottom: f32, size: Option<(f32, f32)>) -> Result<Option<Sprite>, LoadError> {
        let gid = raw_gid & GID_MASK;
        if gid == 0 {
            return Ok(None);
        }
        let unknown = || LoadError::UnknownGid { path: self.path.to_path_buf(), gid };
        let tileset = self
            .tilesets
            .iter()
            .rev()
            .find(|t| t.first_gid <= gid)
            .ok_or_else(unknown)?;
        let image = tileset.image(gid - tileset.first_gid).ok_or_else(unknown)?;

        let (w, h) = size.unwrap_or((image.width as f32, image.height as f32));
        let mut sprite = Sprite::new(image.texture.key.clone(), image.width as f32, image.height as f32)
            .with_scale(self.scaling)
            .with_center((left + w * 0.5) * self.scaling, (bottom + h * 0.5) * self.scaling);
        // Objects may be stretched in the editor; fold that into the sprite size.
        sprite.width = w;
        sprite.height = h;
        sprite.flip_h = raw_gid & FLIPPED_HORIZONTALLY != 0;
        sprite.flip_v = raw_gid & FLIPPED_VERTICALLY != 0;

        self.textures.entry(image.texture.key.clone()).or_insert(image.texture);
        Ok(Some(sprite))
    }

    fn tile_layer(&mut self, layer: &RawTileLayer) -> Result<SpriteList, LoadError> {
        if let Some(encoding) = layer.encoding.as_deref().filter(|e| *e != "csv") {
            return Err(self.unsupported(&layer.name, encoding));
        }
        if let Some(compression) = layer.compression.as_deref().filter(|c| !c.is_empty()) {
            return Err(self.unsupported(&layer.name, compression));
        }
        let gids = match &layer.data {
            Some(RawLayerData::Gids(gids)) => gids,
            Some(RawLayerData::Encoded(_)) => return Err(self.unsupported(&layer.name, "base64")),
            None => return Err(LoadError::InfiniteMap { path: self.path.to_path_buf() }),
        };
        // Widened so oversized declarations are reported instead of overflowing.
        let expected = u64::from(layer.width) * u64::from(layer.height);
        if gids.len() as u64 != expected {
            return Err(LoadError::LayerSize {
                path: self.path.to_path_buf(),
                layer: layer.name.clone(),
                expected,
                actual: gids.len() as u64,
            });
        }

        let mut list = self.new_list(&layer.name);
        for (i, &raw_gid) in gids.iter().enumerate() {
            let col = i as u32 % layer.width;
            let row = i as u32 / layer.width;
            let left = col as f32 * self.tile_width + layer.offset_x;
            let bottom = self.map_height_px - (row + 1) as f32 * self.tile_height - layer.offset_y;
            if let Some(sprite) = self.sprite(raw_gid, left, bottom, None)? {
                list.push(sprite);
            }
        }
        log::debug!("layer '{}': {} tiles", layer.name, list.len());
        Ok(list)
    }

    fn object_layer(&mut self, group: &RawObjectGroup) -> Result<SpriteList, LoadError> {
        let mut list = self.new_list(&group.name);
        for object in &group.objects {
            let Some(raw_gid) = object.gid else {
                log::debug!("layer '{}': skipping non-tile object {} '{}'", group.name, object.id, object.name);
                continue;
            };
            // Tile objects are anchored at their bottom-left corner.
            let left = object.x + group.offset_x;
            let bottom = self.map_height_px - object.y - group.offset_y;
            let size = (object.width > 0.0 && object.height > 0.0).then_some((object.width, object.height));
            if let Some(sprite) = self.sprite(raw_gid, left, bottom, size)? {
                list.push(sprite);
            }
        }
        log::debug!("layer '{}': {} objects", group.name, list.len());
        Ok(list)
    }

    fn unsupported(&self, layer: &str, encoding: &str) -> LoadError {
        LoadError::UnsupportedEncoding {
            path: self.path.to_path_buf(),
            layer: layer.to_string(),
            encoding: encoding.to_string(),
        }
    }
}
