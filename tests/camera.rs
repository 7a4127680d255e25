use glam::Vec2;
use tilehop::camera::{Camera, CameraUniform, user_centered_target};

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn pans_a_fraction_of_the_remaining_distance() {
    let mut camera = Camera::new(800.0, 600.0);
    camera.move_to(Vec2::new(100.0, 50.0), 0.12);

    camera.update();
    assert!(approx(camera.position, Vec2::new(12.0, 6.0)));
    camera.update();
    // 12 + 0.12 * 88
    assert!(approx(camera.position, Vec2::new(22.56, 11.28)));
}

#[test]
fn speed_one_snaps_and_zero_freezes() {
    let mut camera = Camera::new(800.0, 600.0);
    camera.move_to(Vec2::new(300.0, 40.0), 1.0);
    camera.update();
    assert_eq!(camera.position, Vec2::new(300.0, 40.0));

    camera.move_to(Vec2::ZERO, 0.0);
    camera.update();
    assert_eq!(camera.position, Vec2::new(300.0, 40.0));
}

#[test]
fn speed_is_clamped_to_unit_range() {
    let mut camera = Camera::new(800.0, 600.0);
    camera.move_to(Vec2::new(10.0, 10.0), 3.0);
    assert_eq!(camera.move_speed, 1.0);
    camera.move_to(Vec2::new(10.0, 10.0), -1.0);
    assert_eq!(camera.move_speed, 0.0);
}

#[test]
fn target_keeps_player_a_third_into_the_view() {
    let target = user_centered_target(Vec2::new(1000.0, 500.0), 800.0, 600.0);
    assert!(approx(target, Vec2::new(1000.0 - 800.0 / 3.0, 300.0)));
}

#[test]
fn target_never_goes_below_or_left_of_origin() {
    let target = user_centered_target(Vec2::new(100.0, 100.0), 800.0, 600.0);
    assert_eq!(target, Vec2::ZERO);
}

#[test]
fn stock_start_clamps_only_horizontally() {
    // 196 - 800/3 is negative; 270 - 600/3 is not.
    let target = user_centered_target(Vec2::new(196.0, 270.0), 800.0, 600.0);
    assert_eq!(target, Vec2::new(0.0, 70.0));
}

#[test]
fn view_projection_maps_viewport_corners_to_ndc() {
    let mut camera = Camera::new(800.0, 600.0);
    camera.position = Vec2::new(200.0, 100.0);
    let uniform = camera.build_view_proj();

    assert!(approx(uniform.transform(Vec2::new(200.0, 100.0)), Vec2::new(-1.0, -1.0)));
    assert!(approx(uniform.transform(Vec2::new(1000.0, 700.0)), Vec2::new(1.0, 1.0)));
    assert!(approx(uniform.transform(Vec2::new(600.0, 400.0)), Vec2::ZERO));
}

#[test]
fn resize_changes_projection_extent() {
    let mut camera = Camera::new(800.0, 600.0);
    camera.resize(400.0, 300.0);
    let uniform = camera.build_view_proj();
    assert!(approx(uniform.transform(Vec2::new(400.0, 300.0)), Vec2::new(1.0, 1.0)));
    assert_eq!(uniform, CameraUniform::screen_ortho(400.0, 300.0));
}
