use glam::Vec2;
use tilehop::renderer::pipeline::SpriteVertex;
use tilehop::renderer::text::{Font, generate_text_mesh};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

fn font() -> Font {
    Font::builtin().0
}

/// Bottom-left corner of each emitted quad.
fn corners(verts: &[SpriteVertex]) -> Vec<[f32; 2]> {
    verts
        .chunks(6)
        .map(|q| {
            let x = q.iter().map(|v| v.position[0]).fold(f32::INFINITY, f32::min);
            let y = q.iter().map(|v| v.position[1]).fold(f32::INFINITY, f32::min);
            [x, y]
        })
        .collect()
}

#[test]
fn builtin_font_covers_printable_ascii() {
    let (font, img) = Font::builtin();
    assert_eq!(font.glyphs.len(), 95);
    assert!(font.glyphs.contains_key(&'~'));
    assert!(!font.glyphs.contains_key(&'\t'));
    assert_eq!(img.dimensions(), (font.texture_width, font.texture_height));
}

#[test]
fn six_vertices_per_visible_glyph() {
    let verts = generate_text_mesh("AB", &font(), Vec2::ZERO, 8.0, BLACK);
    assert_eq!(verts.len(), 12);
    // One pixel of descender space under each glyph.
    assert_eq!(corners(&verts), vec![[0.0, 1.0], [6.0, 1.0]]);
    assert!(verts.iter().all(|v| v.color == BLACK));
}

#[test]
fn spaces_advance_without_geometry() {
    let verts = generate_text_mesh("A B", &font(), Vec2::ZERO, 8.0, BLACK);
    assert_eq!(corners(&verts), vec![[0.0, 1.0], [12.0, 1.0]]);
}

#[test]
fn newline_moves_down_one_line() {
    let verts = generate_text_mesh("A\nB", &font(), Vec2::new(5.0, 100.0), 8.0, BLACK);
    assert_eq!(corners(&verts), vec![[5.0, 101.0], [5.0, 93.0]]);
}

#[test]
fn unknown_characters_advance_a_cell() {
    let verts = generate_text_mesh("éA", &font(), Vec2::ZERO, 8.0, BLACK);
    assert_eq!(corners(&verts), vec![[6.0, 1.0]]);
}

#[test]
fn font_size_scales_glyphs() {
    let verts = generate_text_mesh("AA", &font(), Vec2::ZERO, 16.0, BLACK);
    assert_eq!(corners(&verts), vec![[0.0, 2.0], [12.0, 2.0]]);
    let width = verts[..6].iter().map(|v| v.position[0]).fold(0.0, f32::max);
    assert_eq!(width, 10.0);
}

#[test]
fn glyph_uvs_point_into_atlas() {
    let font = font();
    let glyph = font.glyphs[&'A'];
    let verts = generate_text_mesh("A", &font, Vec2::ZERO, 8.0, BLACK);
    let u_min = verts.iter().map(|v| v.uv[0]).fold(f32::INFINITY, f32::min);
    let v_min = verts.iter().map(|v| v.uv[1]).fold(f32::INFINITY, f32::min);
    assert_eq!(u_min, glyph.x as f32 / font.texture_width as f32);
    assert_eq!(v_min, glyph.y as f32 / font.texture_height as f32);
}

#[test]
fn zero_line_height_yields_nothing() {
    let mut font = font();
    font.line_height = 0;
    assert!(generate_text_mesh("Game Over", &font, Vec2::ZERO, 30.0, BLACK).is_empty());
}

#[test]
fn measure_reports_longest_line() {
    let font = font();
    assert_eq!(font.measure("AB\nABC"), 18);
    assert_eq!(font.measure(""), 0);
}
