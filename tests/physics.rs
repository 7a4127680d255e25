use tilehop::physics::{JUMP_PROBE_DISTANCE, PlatformerPhysics};
use tilehop::sprite::{Sprite, SpriteList};

const GRAVITY: f32 = 1.1;

fn tile(x: f32, y: f32) -> Sprite {
    Sprite::new("wall", 32.0, 32.0).with_center(x, y)
}

/// Floor tiles covering x 0..640, y 0..32.
fn floor() -> SpriteList {
    let mut walls = SpriteList::with_spatial_hash(128.0);
    for i in 0..20 {
        walls.push(tile(16.0 + i as f32 * 32.0, 16.0));
    }
    walls
}

fn player_at(x: f32, y: f32) -> Sprite {
    Sprite::new("player", 32.0, 32.0).with_center(x, y)
}

fn step(physics: &mut PlatformerPhysics, player: &mut Sprite, walls: &SpriteList, ticks: usize) {
    for _ in 0..ticks {
        physics.update(player, &[walls]);
    }
}

#[test]
fn falling_player_lands_flush_on_floor() {
    let walls = floor();
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(100.0, 200.0);

    assert!(!physics.can_jump(&player, &[&walls]));
    step(&mut physics, &mut player, &walls, 60);

    assert_eq!(player.bottom(), 32.0);
    assert_eq!(player.change.y, 0.0);
    assert!(physics.can_jump(&player, &[&walls]));
}

#[test]
fn gravity_accumulates_per_tick() {
    let walls = SpriteList::new();
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(0.0, 1000.0);

    step(&mut physics, &mut player, &walls, 3);
    assert!((player.change.y + 3.0 * GRAVITY).abs() < 1e-5);
    // 1.1 + 2.2 + 3.3
    assert!((player.center.y - (1000.0 - 6.6)).abs() < 1e-3);
}

#[test]
fn jump_launches_upward() {
    let walls = floor();
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(100.0, 48.0);

    assert!(physics.can_jump(&player, &[&walls]));
    physics.jump(&mut player, 20.0);
    assert_eq!(physics.jumps_since_ground(), 1);

    physics.update(&mut player, &[&walls]);
    assert!((player.center.y - (48.0 + 20.0 - GRAVITY)).abs() < 1e-4);
    assert!(!physics.can_jump(&player, &[&walls]));
}

#[test]
fn can_jump_probes_a_few_pixels_below() {
    let walls = floor();
    let mut physics = PlatformerPhysics::new(GRAVITY);

    let hovering = player_at(100.0, 48.0 + JUMP_PROBE_DISTANCE - 1.0);
    assert!(physics.can_jump(&hovering, &[&walls]));

    let too_high = player_at(100.0, 48.0 + JUMP_PROBE_DISTANCE + 1.0);
    assert!(!physics.can_jump(&too_high, &[&walls]));
}

#[test]
fn walking_into_wall_stops_at_its_face() {
    let mut walls = floor();
    walls.push(tile(208.0, 48.0));
    walls.push(tile(208.0, 80.0));
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(150.0, 48.0);
    player.change.x = 5.0;

    step(&mut physics, &mut player, &walls, 20);

    assert_eq!(player.right(), 192.0);
    assert_eq!(player.bottom(), 32.0);
    assert_eq!(player.change.x, 5.0, "horizontal intent survives the block");
}

#[test]
fn walking_left_into_wall_stops_at_its_face() {
    let mut walls = floor();
    walls.push(tile(48.0, 48.0));
    walls.push(tile(48.0, 80.0));
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(150.0, 48.0);
    player.change.x = -5.0;

    step(&mut physics, &mut player, &walls, 30);

    assert_eq!(player.left(), 64.0);
}

#[test]
fn climbs_steps_lower_than_horizontal_speed() {
    let mut walls = floor();
    // Top at y = 35: a 3 px step.
    walls.push(tile(176.0, 19.0));
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(100.0, 48.0);
    player.change.x = 5.0;

    step(&mut physics, &mut player, &walls, 14);

    assert_eq!(player.center.x, 170.0);
    assert_eq!(player.bottom(), 35.0);
}

#[test]
fn head_bump_stops_upward_motion() {
    let mut walls = SpriteList::new();
    walls.push(tile(16.0, 200.0));
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(16.0, 150.0);
    player.change.y = 20.0;

    let touched = physics.update(&mut player, &[&walls]);

    assert_eq!(player.top(), 184.0);
    assert_eq!(player.change.y, 0.0);
    assert_eq!(touched.len(), 1);
}

#[test]
fn body_inside_wall_is_lifted_on_top() {
    let walls = floor();
    let mut physics = PlatformerPhysics::new(GRAVITY);
    let mut player = player_at(100.0, 20.0);

    physics.update(&mut player, &[&walls]);
    assert_eq!(player.bottom(), 32.0);
}

#[test]
fn multi_jump_allows_air_jumps_until_budget_spent() {
    let walls = floor();
    let mut physics = PlatformerPhysics::new(GRAVITY);
    physics.enable_multi_jump(2);
    let mut player = player_at(100.0, 48.0);

    assert!(physics.can_jump(&player, &[&walls]));
    physics.jump(&mut player, 20.0);
    physics.update(&mut player, &[&walls]);

    assert!(physics.can_jump(&player, &[&walls]), "one air jump left");
    physics.jump(&mut player, 20.0);
    physics.update(&mut player, &[&walls]);
    assert!(!physics.can_jump(&player, &[&walls]));

    physics.disable_multi_jump();
    assert_eq!(physics.jumps_since_ground(), 0);
}
