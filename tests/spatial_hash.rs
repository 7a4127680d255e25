use tilehop::geometry::Rect;
use tilehop::sprite::{Sprite, SpriteList};
use tilehop::spatial_hash::{DEFAULT_CELL_SIZE, SpatialHash};

fn ids_for(list: &mut SpriteList, centers: &[(f32, f32)]) -> Vec<tilehop::sprite::SpriteId> {
    centers
        .iter()
        .map(|&(x, y)| list.push(Sprite::new("tile", 32.0, 32.0).with_center(x, y)))
        .collect()
}

#[test]
fn query_returns_only_nearby_entries() {
    let mut list = SpriteList::new();
    let ids = ids_for(&mut list, &[(16.0, 16.0), (1000.0, 16.0)]);
    let mut hash = SpatialHash::new(DEFAULT_CELL_SIZE);
    for &id in &ids {
        hash.insert(id, &list.get(id).unwrap().hit_box());
    }

    let found = hash.query(&Rect::new(0.0, 0.0, 64.0, 64.0));
    assert_eq!(found, vec![ids[0]]);
}

#[test]
fn entry_spanning_cells_is_reported_once() {
    let mut list = SpriteList::new();
    // Straddles the boundary at x = 128.
    let ids = ids_for(&mut list, &[(128.0, 16.0)]);
    let mut hash = SpatialHash::new(128.0);
    hash.insert(ids[0], &list.get(ids[0]).unwrap().hit_box());

    let found = hash.query(&Rect::new(0.0, 0.0, 512.0, 64.0));
    assert_eq!(found.len(), 1);
    assert_eq!(hash.len(), 1);
}

#[test]
fn remove_drops_entry_from_every_cell() {
    let mut list = SpriteList::new();
    let ids = ids_for(&mut list, &[(128.0, 128.0)]);
    let rect = list.get(ids[0]).unwrap().hit_box();
    let mut hash = SpatialHash::new(128.0);
    hash.insert(ids[0], &rect);
    hash.remove(ids[0], &rect);

    assert!(hash.is_empty());
    assert!(hash.query(&rect).is_empty());
}

#[test]
fn cell_size_is_clamped_to_one_pixel() {
    assert_eq!(SpatialHash::new(0.0).cell_size(), 1.0);
}
