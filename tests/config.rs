use std::path::PathBuf;

use tilehop::config::GameConfig;
use tilehop::error::ConfigError;

#[test]
fn defaults_match_stock_game() {
    let config = GameConfig::default();
    assert_eq!((config.window.width, config.window.height), (800, 600));
    assert_eq!(config.window.background, [172, 229, 238]);
    assert_eq!(config.window.updates_per_second, 60);
    assert_eq!(config.physics.movement_speed, 5.0);
    assert_eq!(config.physics.jump_speed, 20.0);
    assert_eq!(config.physics.gravity, 1.1);
    assert_eq!(config.player.scaling, 1.5);
    assert_eq!((config.player.start_x, config.player.start_y), (196.0, 270.0));
    assert_eq!(config.camera.panning_fraction, 0.12);
    assert_eq!(config.grid_pixel_size(), 32.0);
    assert!(config.audio.coin_sound.is_none());
}

#[test]
fn default_layers_hash_everything_but_background() {
    let layers = GameConfig::default().map.layers;
    assert!(layers["Walls"].use_spatial_hash);
    assert!(layers["Coins"].use_spatial_hash);
    assert!(layers["End"].use_spatial_hash);
    assert!(!layers["Background"].use_spatial_hash);
}

#[test]
fn empty_object_is_all_defaults() {
    assert_eq!(GameConfig::from_json_str("{}").unwrap(), GameConfig::default());
}

#[test]
fn partial_file_overrides_only_named_fields() {
    let config = GameConfig::from_json_str(
        r#"{ "physics": { "gravity": 0.8 }, "map": { "tile_scaling": 2.0 },
             "audio": { "jump_sound": "assets/sounds/jump.ogg" } }"#,
    )
    .unwrap();
    assert_eq!(config.physics.gravity, 0.8);
    assert_eq!(config.physics.jump_speed, 20.0);
    assert_eq!(config.grid_pixel_size(), 64.0);
    assert_eq!(config.audio.jump_sound, Some(PathBuf::from("assets/sounds/jump.ogg")));
    assert_eq!(config.map.layers.len(), 4);
}

#[test]
fn missing_file_yields_defaults() {
    let config = GameConfig::load("definitely/not/here.json").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn malformed_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("tilehop-config-{}.json", std::process::id()));
    std::fs::write(&path, "{ \"physics\": ").unwrap();
    let result = GameConfig::load(&path);
    std::fs::remove_file(&path).ok();
    match result {
        Err(ConfigError::Json { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Json error, got {other:?}"),
    }
}
