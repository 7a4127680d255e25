use tilehop::game::{Action, default_bindings};
use tilehop::input::{ActionMap, InputState, KeyCode};

#[test]
fn repeat_press_is_not_a_new_press() {
    let mut input = InputState::new();
    assert!(input.press(KeyCode::ArrowLeft));
    assert!(!input.press(KeyCode::ArrowLeft));
    assert!(input.is_key_pressed(KeyCode::ArrowLeft));
    assert!(input.is_key_held(KeyCode::ArrowLeft));
}

#[test]
fn frame_state_clears_but_held_keys_remain() {
    let mut input = InputState::new();
    input.press(KeyCode::ArrowRight);
    input.clear_frame_state();
    assert!(!input.is_key_pressed(KeyCode::ArrowRight));
    assert!(input.is_key_held(KeyCode::ArrowRight));

    input.release(KeyCode::ArrowRight);
    assert!(input.is_key_released(KeyCode::ArrowRight));
    assert!(!input.is_key_held(KeyCode::ArrowRight));
    input.clear_frame_state();
    assert!(!input.is_key_released(KeyCode::ArrowRight));
}

#[test]
fn action_map_checks_every_bound_key() {
    let mut actions = ActionMap::new();
    actions.bind(Action::Jump, KeyCode::ArrowUp);
    actions.bind(Action::Jump, KeyCode::Space);

    let mut input = InputState::new();
    input.press(KeyCode::Space);
    assert!(actions.is_pressed(Action::Jump, &input));
    assert!(actions.is_held(Action::Jump, &input));
    assert!(!actions.is_held(Action::Left, &input));
    assert_eq!(actions.action_for(KeyCode::Space), Some(Action::Jump));
}

#[test]
fn default_bindings_use_arrow_keys() {
    let actions = default_bindings();
    assert_eq!(actions.action_for(KeyCode::ArrowUp), Some(Action::Jump));
    assert_eq!(actions.action_for(KeyCode::ArrowLeft), Some(Action::Left));
    assert_eq!(actions.action_for(KeyCode::ArrowRight), Some(Action::Right));
    assert_eq!(actions.action_for(KeyCode::Escape), Some(Action::Quit));
    assert_eq!(actions.action_for(KeyCode::ArrowDown), None);
}

#[test]
fn rebinding_a_key_moves_it_to_the_new_action() {
    let mut actions = ActionMap::new();
    actions.bind(Action::Jump, KeyCode::Space);
    actions.bind(Action::Quit, KeyCode::Space);
    actions.bind(Action::Quit, KeyCode::Space);

    let mut input = InputState::new();
    input.press(KeyCode::Space);
    assert_eq!(actions.action_for(KeyCode::Space), Some(Action::Quit));
    assert!(!actions.is_held(Action::Jump, &input));
    assert!(actions.is_held(Action::Quit, &input));
}
