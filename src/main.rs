use std::path::PathBuf;

use tilehop::DEFAULT_CONFIG_PATH;
use tilehop::config::GameConfig;
use tilehop::engine::{Color, Engine};
use tilehop::game::PlatformerGame;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if let Err(e) = run(config_path) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load(&config_path)?;
    let window = config.window.clone();
    let game = PlatformerGame::new(config)?;

    Engine::builder()
        .with_title(&window.title)
        .with_size(window.width, window.height)
        .with_ups(window.updates_per_second)
        .with_background(Color::from_rgb8(window.background))
        .run(game)?;
    Ok(())
}
