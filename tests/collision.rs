use tilehop::collision::*;
use tilehop::sprite::{Sprite, SpriteList};

fn tile(x: f32, y: f32) -> Sprite {
    Sprite::new("tile", 32.0, 32.0).with_center(x, y)
}

#[test]
fn touching_sprites_do_not_collide() {
    assert!(!check_for_collision(&tile(16.0, 16.0), &tile(48.0, 16.0)));
    assert!(check_for_collision(&tile(16.0, 16.0), &tile(40.0, 16.0)));
}

#[test]
fn list_collisions_are_in_insertion_order() {
    let mut coins = SpriteList::with_spatial_hash(128.0);
    let far = coins.push(tile(500.0, 16.0));
    let b = coins.push(tile(30.0, 16.0));
    let a = coins.push(tile(10.0, 16.0));

    let player = Sprite::new("player", 32.0, 32.0).with_center(20.0, 16.0);
    let hits = check_for_collision_with_list(&player, &coins);
    assert_eq!(hits, vec![b, a]);
    assert!(!hits.contains(&far));
}

#[test]
fn multi_list_hits_are_tagged_with_list_index() {
    let mut walls = SpriteList::new();
    let mut spikes = SpriteList::new();
    walls.push(tile(500.0, 16.0));
    let spike = spikes.push(tile(16.0, 16.0));

    let player = Sprite::new("player", 32.0, 32.0).with_center(20.0, 20.0);
    let hits = check_for_collision_with_lists(&player, &[&walls, &spikes]);
    assert_eq!(hits, vec![(1, spike)]);
}

#[test]
fn empty_list_has_no_collisions() {
    let player = tile(0.0, 0.0);
    assert!(check_for_collision_with_list(&player, &SpriteList::new()).is_empty());
}
