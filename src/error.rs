use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading the optional JSON configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while loading level content (tile maps, tilesets, images).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path}: layer '{layer}' uses unsupported encoding '{encoding}'")]
    UnsupportedEncoding {
        path: PathBuf,
        layer: String,
        encoding: String,
    },
    #[error("{path}: layer '{layer}' has {actual} tiles, expected {expected}")]
    LayerSize {
        path: PathBuf,
        layer: String,
        expected: u64,
        actual: u64,
    },
    #[error("{path}: infinite maps are not supported")]
    InfiniteMap { path: PathBuf },
    #[error("{path}: tile gid {gid} does not belong to any tileset")]
    UnknownGid { path: PathBuf, gid: u32 },
    #[error("{path}: tileset '{tileset}' has neither an image nor per-tile images")]
    TilesetWithoutImage { path: PathBuf, tileset: String },
    #[error("tile map has no '{0}' layer")]
    MissingLayer(String),
}

/// Failure while bringing up the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
}

/// Fatal failure of the window/event-loop shim.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
