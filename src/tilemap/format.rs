// ── Raw (JSON-facing) Tiled types ─────────────────────────────────────────────
//
// Mirrors the subset of the Tiled JSON map format (.tmj) and tileset format
// (.tsj) the loader understands.  Unknown keys are ignored so maps saved by
// newer Tiled versions still parse.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawMap {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default)]
    pub layers: Vec<RawLayer>,
    #[serde(default)]
    pub tilesets: Vec<RawTilesetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawLayer {
    TileLayer(RawTileLayer),
    ObjectGroup(RawObjectGroup),
    Group(RawGroup),
    ImageLayer(RawNamed),
}

#[derive(Debug, Deserialize)]
pub struct RawTileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Absent on infinite maps, which store `chunks` instead.
    #[serde(default)]
    pub data: Option<RawLayerData>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub compression: Option<String>,
    #[serde(default, rename = "offsetx")]
    pub offset_x: f32,
    #[serde(default, rename = "offsety")]
    pub offset_y: f32,
}

/// `data` is a plain gid array for CSV maps and a string for base64 maps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLayerData {
    Gids(Vec<u32>),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
pub struct RawObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<RawObject>,
    #[serde(default, rename = "offsetx")]
    pub offset_x: f32,
    #[serde(default, rename = "offsety")]
    pub offset_y: f32,
}

#[derive(Debug, Deserialize)]
pub struct RawObject {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Present only on tile objects.
    #[serde(default)]
    pub gid: Option<u32>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
pub struct RawNamed {
    #[serde(default)]
    pub name: String,
}

/// A map's tileset reference: either a pointer to an external `.tsj` file or
/// the tileset inlined into the map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTilesetEntry {
    External {
        firstgid: u32,
        source: String,
    },
    Embedded {
        firstgid: u32,
        #[serde(flatten)]
        tileset: RawTileset,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTileset {
    pub name: String,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    pub columns: u32,
    #[serde(rename = "tilecount")]
    pub tile_count: u32,
    pub margin: u32,
    pub spacing: u32,
    /// Single sheet image (grid tilesets).
    pub image: Option<String>,
    /// Per-tile images (image-collection tilesets).
    pub tiles: Vec<RawTile>,
}

#[derive(Debug, Deserialize)]
pub struct RawTile {
    pub id: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "imagewidth")]
    pub image_width: u32,
    #[serde(default, rename = "imageheight")]
    pub image_height: u32,
}
