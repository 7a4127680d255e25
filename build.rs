// Generates placeholder art for the sample level if it is missing, so a
// fresh checkout runs without any binary assets.  Existing files are never
// overwritten; drop real art in place to replace them.

use image::{Rgba, RgbaImage};
use std::path::Path;

const TILE: u32 = 32;

fn fill(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: [u8; 4]) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, Rgba(color));
        }
    }
}

fn draw_wall(img: &mut RgbaImage, ox: u32) {
    // Grass strip over dirt bricks.
    fill(img, ox, 0, TILE, TILE, [0x8B, 0x5A, 0x2B, 0xFF]);
    for y in 0..TILE {
        let brick_row = y / 8;
        let offset_x = if brick_row % 2 == 0 { 0 } else { TILE / 4 };
        for x in 0..TILE {
            if y % 8 == 0 || (x + offset_x) % (TILE / 2) == 0 {
                img.put_pixel(ox + x, y, Rgba([0x5E, 0x3A, 0x1A, 0xFF]));
            }
        }
    }
    fill(img, ox, 0, TILE, 6, [0x3C, 0xB0, 0x43, 0xFF]);
}

fn draw_coin(img: &mut RgbaImage, ox: u32) {
    let c = TILE as f32 / 2.0 - 0.5;
    for y in 0..TILE {
        for x in 0..TILE {
            let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
            if d < 9.0 {
                img.put_pixel(ox + x, y, Rgba([0xFF, 0xD7, 0x00, 0xFF]));
            } else if d < 11.0 {
                img.put_pixel(ox + x, y, Rgba([0xB8, 0x86, 0x0B, 0xFF]));
            }
        }
    }
}

fn draw_end(img: &mut RgbaImage, ox: u32) {
    // Flag on a pole.
    fill(img, ox + 6, 2, 3, TILE - 2, [0x40, 0x40, 0x40, 0xFF]);
    fill(img, ox + 9, 3, 18, 12, [0xE0, 0x20, 0x30, 0xFF]);
}

fn draw_background(img: &mut RgbaImage, ox: u32) {
    // Small bush, drawn behind nothing in particular.
    let c = TILE as f32 / 2.0 - 0.5;
    for y in TILE / 2..TILE {
        for x in 0..TILE {
            let d = ((x as f32 - c).powi(2) + (y as f32 - TILE as f32).powi(2)).sqrt();
            if d < 14.0 {
                img.put_pixel(ox + x, y, Rgba([0x2E, 0x8B, 0x57, 0xFF]));
            }
        }
    }
}

fn draw_tileset() -> RgbaImage {
    let mut img = RgbaImage::new(TILE * 4, TILE);
    draw_wall(&mut img, 0);
    draw_coin(&mut img, TILE);
    draw_end(&mut img, TILE * 2);
    draw_background(&mut img, TILE * 3);
    img
}

fn draw_player() -> RgbaImage {
    let mut img = RgbaImage::new(TILE, TILE);
    let body = [0x4C, 0xC0, 0x4C, 0xFF];
    let band = [0xD0, 0x20, 0x20, 0xFF];
    let white = [0xFF, 0xFF, 0xFF, 0xFF];
    let pupil = [0x10, 0x10, 0x10, 0xFF];

    fill(&mut img, 6, 10, 20, 18, body);
    fill(&mut img, 8, 4, 6, 6, white);
    fill(&mut img, 18, 4, 6, 6, white);
    fill(&mut img, 10, 6, 2, 2, pupil);
    fill(&mut img, 20, 6, 2, 2, pupil);
    fill(&mut img, 6, 12, 20, 3, band);
    fill(&mut img, 8, 28, 5, 4, body);
    fill(&mut img, 19, 28, 5, 4, body);
    img
}

fn save_if_missing(path: &str, img: RgbaImage) {
    if Path::new(path).exists() {
        return;
    }
    if let Some(dir) = Path::new(path).parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            println!("cargo:warning=could not create {}: {e}", dir.display());
            return;
        }
    }
    if let Err(e) = img.save(path) {
        println!("cargo:warning=could not save {path}: {e}");
    }
}

fn main() {
    save_if_missing("assets/sprites/ninja_frog.png", draw_player());
    save_if_missing("assets/tiles/tiles.png", draw_tileset());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=assets/sprites/ninja_frog.png");
    println!("cargo:rerun-if-changed=assets/tiles/tiles.png");
}
