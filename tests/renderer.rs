use tilehop::geometry::Rect;
use tilehop::renderer::atlas::{PADDING, Placement, TextureAtlas, pack};
use tilehop::renderer::pipeline::{Flip, quad};
use tilehop::texture::{Region, TextureSource};

// ── Shelf packing ─────────────────────────────────────────────────────────

fn item(name: &str, w: u32, h: u32) -> (String, u32, u32) {
    (name.to_string(), w, h)
}

#[test]
fn pack_empty_input_returns_no_placements() {
    let (placements, _atlas_w, atlas_h) = pack(&[], 512);
    assert!(placements.is_empty());
    assert_eq!(atlas_h, 1);
}

#[test]
fn pack_single_item_placed_at_origin() {
    let (pl, w, h) = pack(&[item("hero", 16, 24)], 512);
    assert_eq!(pl, vec![Placement { key: "hero".into(), x: 0, y: 0, width: 16, height: 24 }]);
    assert_eq!((w, h), (512, 32));
}

#[test]
fn pack_places_taller_items_first() {
    let (pl, _, _) = pack(&[item("short", 16, 8), item("tall", 16, 32)], 512);
    assert_eq!(pl[0].key, "tall");
    assert_eq!(pl[1].x, 16 + PADDING);
}

#[test]
fn pack_rounds_height_to_power_of_two() {
    let items: Vec<_> = (0..5).map(|i| item(&format!("t{i}"), 100, 40)).collect();
    let (pl, w, h) = pack(&items, 256);
    // Two per row: three rows of 40 plus two gaps.
    assert_eq!(pl.last().map(|p| p.y), Some(2 * (40 + PADDING)));
    assert_eq!((w, h), (256, 128));
}

// ── TextureAtlas ──────────────────────────────────────────────────────────

#[test]
fn register_reports_only_new_keys() {
    let mut atlas = TextureAtlas::new();
    assert!(atlas.is_empty());
    assert!(atlas.register([TextureSource::file("a.png"), TextureSource::file("b.png")]));
    assert!(!atlas.register([TextureSource::file("a.png")]));
    assert_eq!(atlas.len(), 2);
    assert!(atlas.contains("b.png"));
    assert!(atlas.entry("a.png").is_none(), "no entries before bake");
}

#[test]
fn bake_substitutes_placeholders_for_missing_images() {
    let mut atlas = TextureAtlas::new();
    let cell = Region { x: 0, y: 0, width: 16, height: 8 };
    atlas.register([
        TextureSource::file("missing/player.png"),
        TextureSource::cell("missing/sheet.png", 0, cell),
    ]);

    let img = atlas.bake();
    assert_eq!(img.dimensions(), (TextureAtlas::MAX_WIDTH, 32));

    let player = atlas.entry("missing/player.png").unwrap();
    assert_eq!((player.width, player.height), (32, 32));
    assert_eq!(player.uv_min, [0.0, 0.0]);
    assert_eq!(player.uv_max, [32.0 / 2048.0, 1.0]);

    let tile = atlas.entry("missing/sheet.png#0").unwrap();
    assert_eq!((tile.width, tile.height), (16, 8));
    assert_eq!(tile.uv_min, [33.0 / 2048.0, 0.0]);
    assert_eq!(tile.uv_max, [49.0 / 2048.0, 0.25]);

    // Placeholder pixels are opaque.
    assert_eq!(img.get_pixel(0, 0)[3], 0xFF);
}

// ── Quads ─────────────────────────────────────────────────────────────────

const WHITE: [f32; 4] = [1.0; 4];

#[test]
fn quad_maps_image_top_to_world_top() {
    let verts = quad(&Rect::new(10.0, 20.0, 4.0, 2.0), [0.0, 0.0], [1.0, 1.0], Flip::default(), WHITE);
    let top_left = verts.iter().find(|v| v.position == [10.0, 22.0]).unwrap();
    assert_eq!(top_left.uv, [0.0, 0.0]);
    let bottom_right = verts.iter().find(|v| v.position == [14.0, 20.0]).unwrap();
    assert_eq!(bottom_right.uv, [1.0, 1.0]);
}

#[test]
fn quad_flips_swap_uv_edges() {
    let flip = Flip { horizontal: true, vertical: true };
    let verts = quad(&Rect::new(0.0, 0.0, 1.0, 1.0), [0.25, 0.5], [0.75, 1.0], flip, WHITE);
    let top_left = verts.iter().find(|v| v.position == [0.0, 1.0]).unwrap();
    assert_eq!(top_left.uv, [0.75, 1.0]);
    let bottom_right = verts.iter().find(|v| v.position == [1.0, 0.0]).unwrap();
    assert_eq!(bottom_right.uv, [0.25, 0.5]);
}
