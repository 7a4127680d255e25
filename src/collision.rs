use crate::geometry::Rect;
use crate::sprite::{Sprite, SpriteId, SpriteList};

/// True when the hit boxes of `a` and `b` overlap.
pub fn check_for_collision(a: &Sprite, b: &Sprite) -> bool {
    a.hit_box().intersects(&b.hit_box())
}

/// Every sprite in `list` overlapping `rect`, in the list's draw order.
pub fn collisions_with_rect(rect: &Rect, list: &SpriteList) -> Vec<SpriteId> {
    list.query(rect)
        .into_iter()
        .filter(|&id| list.get(id).is_some_and(|other| rect.intersects(&other.hit_box())))
        .collect()
}

/// Every sprite in `list` whose hit box overlaps `sprite`'s.
pub fn check_for_collision_with_list(sprite: &Sprite, list: &SpriteList) -> Vec<SpriteId> {
    collisions_with_rect(&sprite.hit_box(), list)
}

/// Like [`check_for_collision_with_list`] across several lists; each hit is
/// tagged with the index of the list it came from.
pub fn check_for_collision_with_lists(sprite: &Sprite, lists: &[&SpriteList]) -> Vec<(usize, SpriteId)> {
    let rect = sprite.hit_box();
    lists
        .iter()
        .enumerate()
        .flat_map(|(i, list)| collisions_with_rect(&rect, list).into_iter().map(move |id| (i, id)))
        .collect()
}
