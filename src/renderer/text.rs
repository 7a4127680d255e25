use std::collections::HashMap;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::geometry::Rect;
use crate::renderer::pipeline::{Flip, SpriteVertex, quad};

// ── Built-in 5×7 font ─────────────────────────────────────────────────────────
//
// Classic LCD font covering printable ASCII (32..=126).  Each glyph is five
// column bytes, left to right; bit 0 is the top row.

const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 126;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
/// Glyph plus one pixel of spacing on the right and below.
const CELL_W: u32 = GLYPH_W + 1;
const CELL_H: u32 = GLYPH_H + 1;
const ATLAS_COLS: u32 = 16;

#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// How far to advance the cursor after drawing this glyph, in font pixels.
    pub x_advance: u32,
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// A bitmap font plus the dimensions of its atlas, so callers can normalise
/// pixel coordinates to UVs: `u = glyph.x as f32 / font.texture_width as f32`.
#[derive(Debug, Clone)]
pub struct Font {
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in font pixels.
    pub line_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl Font {
    /// The built-in 5×7 font and its white-on-transparent atlas image.
    pub fn builtin() -> (Self, RgbaImage) {
        let count = (LAST_CHAR - FIRST_CHAR + 1) as u32;
        let rows = count.div_ceil(ATLAS_COLS);
        let texture_width = ATLAS_COLS * CELL_W;
        let texture_height = rows * CELL_H;
        let mut img = RgbaImage::new(texture_width, texture_height);
        let mut glyphs = HashMap::with_capacity(count as usize);

        for (i, columns) in FONT_5X7.iter().enumerate() {
            let i = i as u32;
            let x0 = (i % ATLAS_COLS) * CELL_W;
            let y0 = (i / ATLAS_COLS) * CELL_H;
            for (dx, bits) in columns.iter().enumerate() {
                for dy in 0..GLYPH_H {
                    if bits & (1 << dy) != 0 {
                        img.put_pixel(x0 + dx as u32, y0 + dy, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
                    }
                }
            }
            let ch = char::from(FIRST_CHAR + i as u8);
            glyphs.insert(ch, Glyph { x: x0, y: y0, width: GLYPH_W, height: GLYPH_H, x_advance: CELL_W });
        }

        let font = Self { glyphs, line_height: CELL_H, texture_width, texture_height };
        (font, img)
    }

    /// Width in font pixels of the longest line of `text`.
    pub fn measure(&self, text: &str) -> u32 {
        text.split('\n')
            .map(|line| {
                line.chars()
                    .filter_map(|ch| self.glyphs.get(&ch))
                    .map(|g| g.x_advance)
                    .sum::<u32>()
            })
            .max()
            .unwrap_or(0)
    }
}

// ── generate_text_mesh ────────────────────────────────────────────────────────

/// Lay out `text` as textured quads, six vertices per visible glyph.
///
/// `origin` is the bottom-left corner of the first line in world space
/// (y up).  `font_size` is the line height in world pixels; every glyph is
/// scaled by `font_size / font.line_height`.
///
/// - `'\n'` returns to `origin.x` and moves down one line.
/// - Spaces and characters missing from the font advance the cursor
///   (missing ones by a full cell) but emit no geometry.
/// - A zero `line_height` yields no vertices.
pub fn generate_text_mesh(
    text: &str,
    font: &Font,
    origin: Vec2,
    font_size: f32,
    color: [f32; 4],
) -> Vec<SpriteVertex> {
    if font.line_height == 0 {
        return Vec::new();
    }

    let scale = font_size / font.line_height as f32;
    let tw = font.texture_width as f32;
    let th = font.texture_height as f32;
    let line_step = font.line_height as f32 * scale;

    let mut vertices = Vec::new();
    let mut cursor = origin;

    for ch in text.chars() {
        if ch == '\n' {
            cursor.x = origin.x;
            cursor.y -= line_step;
            continue;
        }
        let Some(glyph) = font.glyphs.get(&ch) else {
            cursor.x += CELL_W as f32 * scale;
            continue;
        };

        if ch != ' ' {
            // The cell's spare bottom row sits below the glyph.
            let bottom = cursor.y + (font.line_height - glyph.height) as f32 * scale;
            let rect = Rect::new(cursor.x, bottom, glyph.width as f32 * scale, glyph.height as f32 * scale);
            let uv_min = [glyph.x as f32 / tw, glyph.y as f32 / th];
            let uv_max = [(glyph.x + glyph.width) as f32 / tw, (glyph.y + glyph.height) as f32 / th];
            vertices.extend_from_slice(&quad(&rect, uv_min, uv_max, Flip::default(), color));
        }

        cursor.x += glyph.x_advance as f32 * scale;
    }

    vertices
}
