use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::LoadError;

/// Pixel rectangle inside a source image, top-left origin (image space).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Where the pixels for one atlas entry come from: a whole image file or a
/// sub-rectangle of one (a cell of a tileset sheet).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureSource {
    /// Name sprites use to refer to this texture.
    pub key: String,
    pub path: PathBuf,
    pub region: Option<Region>,
}

impl TextureSource {
    /// A whole image, keyed by its path.
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self { key: texture_key(path), path: path.to_path_buf(), region: None }
    }

    /// One cell of a sheet, keyed `"<sheet path>#<local id>"`.
    pub fn cell(path: impl AsRef<Path>, local_id: u32, region: Region) -> Self {
        let path = path.as_ref();
        Self {
            key: format!("{}#{local_id}", texture_key(path)),
            path: path.to_path_buf(),
            region: Some(region),
        }
    }

    /// Decode the image and cut out the region, if any.  A region reaching
    /// past the image edge is clipped.
    pub fn load(&self) -> Result<RgbaImage, LoadError> {
        let img = image::open(&self.path)
            .map_err(|source| LoadError::Image { path: self.path.clone(), source })?
            .to_rgba8();
        Ok(match self.region {
            Some(r) => crop(&img, r),
            None => img,
        })
    }

    /// Like [`TextureSource::load`] but never fails: a missing or unreadable
    /// image becomes a checkerboard placeholder of the expected size.
    pub fn load_or_placeholder(&self, fallback_w: u32, fallback_h: u32) -> RgbaImage {
        match self.load() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("{e}; using placeholder for '{}'", self.key);
                let (w, h) = match self.region {
                    Some(r) => (r.width, r.height),
                    None => (fallback_w, fallback_h),
                };
                placeholder(w, h)
            }
        }
    }
}

/// Stable string form of an asset path, used as a texture key.
pub fn texture_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Pixel dimensions of an image file, read from its header only.
pub fn image_size(path: &Path) -> Result<(u32, u32), LoadError> {
    image::image_dimensions(path).map_err(|source| LoadError::Image { path: path.to_path_buf(), source })
}

fn crop(img: &RgbaImage, r: Region) -> RgbaImage {
    let x = r.x.min(img.width());
    let y = r.y.min(img.height());
    let w = r.width.min(img.width() - x);
    let h = r.height.min(img.height() - y);
    image::imageops::crop_imm(img, x, y, w, h).to_image()
}

/// Magenta/black 4-pixel checkerboard: impossible to mistake for real art.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgba([0xFF, 0x00, 0xFF, 0xFF])
        } else {
            Rgba([0x10, 0x10, 0x10, 0xFF])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_clips_region_to_image_bounds() {
        let img = RgbaImage::new(64, 32);
        let out = crop(&img, Region { x: 48, y: 0, width: 32, height: 32 });
        assert_eq!(out.dimensions(), (16, 32));
    }

    #[test]
    fn missing_file_yields_placeholder_of_region_size() {
        let src = TextureSource::cell(
            "does/not/exist.png",
            3,
            Region { x: 0, y: 0, width: 16, height: 8 },
        );
        let img = src.load_or_placeholder(32, 32);
        assert_eq!(img.dimensions(), (16, 8));
    }

    #[test]
    fn cell_keys_are_distinct_per_local_id() {
        let r = Region { x: 0, y: 0, width: 32, height: 32 };
        let a = TextureSource::cell("tiles.png", 0, r);
        let b = TextureSource::cell("tiles.png", 1, r);
        assert_ne!(a.key, b.key);
        assert_eq!(a.key, "tiles.png#0");
    }
}
