pub mod audio;
pub mod camera;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod spatial_hash;
pub mod sprite;
pub mod texture;
pub mod tilemap;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "tilehop.json";
