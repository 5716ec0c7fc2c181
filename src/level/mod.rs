//! Level descriptors
//!
//! A level is parsed from JSON, auto-fitted to the gameplay width if it is a
//! grid layout, then validated against the gameplay area. Anything that fails
//! here is recoverable: the controller swaps in [`Level::create_default`].

pub mod error;
pub mod layout;
pub mod source;

pub use error::{LevelError, ValidationError, ValidationIssue};
pub use source::{DirLevelSource, EmbeddedLevels, LevelSource, MemoryLevels};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::tuning::BrickTypeTable;

/// Closed set of brick types. Display mapping is owned by the renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BrickKind {
    #[default]
    Standard,
    Tusi,
    Weed,
    Columbia,
    Supreme,
}

impl BrickKind {
    /// Resolve a type name from a level file; unknown names (including the
    /// legacy color names) are standard bricks.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tusi" => BrickKind::Tusi,
            "weed" => BrickKind::Weed,
            "columbia" => BrickKind::Columbia,
            "supreme" => BrickKind::Supreme,
            _ => BrickKind::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickKind::Standard => "standard",
            BrickKind::Tusi => "tusi",
            BrickKind::Weed => "weed",
            BrickKind::Columbia => "columbia",
            BrickKind::Supreme => "supreme",
        }
    }
}

/// A brick placed on the 12x10 grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridBrick {
    pub column: i32,
    pub row: i32,
    pub kind: BrickKind,
    pub hits: i32,
}

/// A brick placed at a pixel offset from the gameplay area's top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelBrick {
    pub x: f32,
    pub y: f32,
    pub kind: BrickKind,
    pub hits: i32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub brick_width: f32,
    pub brick_height: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub bricks: Vec<GridBrick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelLayout {
    pub default_width: f32,
    pub default_height: f32,
    pub bricks: Vec<PixelBrick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layout {
    Grid(GridLayout),
    Pixel(PixelLayout),
}

/// A loaded, auto-fitted and validated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Ball speed in pixels per second
    pub ball_speed: f32,
    pub layout: Layout,
}

impl Level {
    /// Built-in fallback: one row of four standard bricks. Always valid.
    pub fn create_default() -> Self {
        let bricks = (4..8)
            .map(|column| GridBrick {
                column,
                row: 2,
                kind: BrickKind::Standard,
                hits: 1,
            })
            .collect();
        Self {
            name: "Default Level".to_string(),
            ball_speed: 400.0,
            layout: Layout::Grid(GridLayout {
                brick_width: 150.0,
                brick_height: 60.0,
                spacing_x: 25.0,
                spacing_y: 30.0,
                bricks,
            }),
        }
    }

    pub fn brick_count(&self) -> usize {
        match &self.layout {
            Layout::Grid(grid) => grid.bricks.len(),
            Layout::Pixel(pixel) => pixel.bricks.len(),
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self.layout {
            Layout::Grid(_) => "grid",
            Layout::Pixel(_) => "pixel",
        }
    }

    /// Parse a level document, auto-fit it and validate it.
    ///
    /// `number` is only used to label errors.
    pub fn parse(
        text: &str,
        number: u32,
        brick_types: &BrickTypeTable,
    ) -> Result<Self, LevelError> {
        let file = LevelFile::from_str(text).map_err(|e| LevelError::Parse {
            level: number,
            message: e.to_string(),
        })?;
        let mut level = file.into_level(brick_types);

        if let Layout::Grid(grid) = &mut level.layout {
            layout::validate_cells(grid).map_err(|error| LevelError::Validation {
                level: number,
                error,
            })?;
            let raw_width = grid.brick_width;
            if layout::auto_fit(grid) {
                log::info!(
                    "Level {} auto-fit: brick size {}x{} (was width {})",
                    number,
                    grid.brick_width,
                    grid.brick_height,
                    raw_width
                );
            }
        }

        layout::validate(&level).map_err(|error| LevelError::Validation {
            level: number,
            error,
        })?;
        Ok(level)
    }
}

/// Fetch, parse and validate level `number` from `source`.
pub fn load(
    source: &dyn LevelSource,
    number: u32,
    brick_types: &BrickTypeTable,
) -> Result<Level, LevelError> {
    let text = source.fetch(number)?;
    let level = Level::parse(&text, number, brick_types)?;
    log::info!(
        "Level {} loaded: {} with {} bricks (format: {})",
        number,
        level.name,
        level.brick_count(),
        level.format_name()
    );
    Ok(level)
}

// --- On-disk schema -------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
enum LevelFile {
    Grid(GridFile),
    Pixel(PixelFile),
}

#[derive(Debug, Deserialize)]
struct GridFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    brick_width: f32,
    #[serde(default)]
    brick_height: f32,
    #[serde(default)]
    brick_spacing_x: f32,
    #[serde(default)]
    brick_spacing_y: f32,
    #[serde(default)]
    ball_speed: f32,
    #[serde(default)]
    bricks: Vec<GridBrickFile>,
}

#[derive(Debug, Deserialize)]
struct GridBrickFile {
    x: i32,
    y: i32,
    #[serde(default, rename = "type", alias = "brick_type", alias = "color")]
    kind: String,
    hits: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PixelFile {
    #[serde(default)]
    name: String,
    default_brick_width: Option<f32>,
    default_brick_height: Option<f32>,
    #[serde(default)]
    ball_speed: f32,
    #[serde(default)]
    bricks: Vec<PixelBrickFile>,
}

#[derive(Debug, Deserialize)]
struct PixelBrickFile {
    #[serde(default)]
    pixel_x: f32,
    #[serde(default)]
    pixel_y: f32,
    #[serde(default, rename = "type", alias = "brick_type", alias = "color")]
    kind: String,
    hits: Option<i32>,
    width: Option<f32>,
    height: Option<f32>,
}

impl LevelFile {
    fn from_str(text: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Value = serde_json::from_str(text)?;
        if let Value::Object(map) = &mut doc {
            if !map.contains_key("format") {
                let format = sniff_legacy_format(map);
                log::debug!("Level without format marker, treating as {format}");
                map.insert("format".to_string(), Value::from(format));
            }
        }
        serde_json::from_value(doc)
    }

    fn into_level(self, brick_types: &BrickTypeTable) -> Level {
        match self {
            LevelFile::Grid(file) => Level {
                name: file.name,
                ball_speed: effective_speed(file.ball_speed),
                layout: Layout::Grid(GridLayout {
                    brick_width: file.brick_width,
                    brick_height: file.brick_height,
                    spacing_x: file.brick_spacing_x,
                    spacing_y: file.brick_spacing_y,
                    bricks: file
                        .bricks
                        .into_iter()
                        .map(|b| {
                            let kind = BrickKind::from_name(&b.kind);
                            GridBrick {
                                column: b.x,
                                row: b.y,
                                kind,
                                hits: b.hits.unwrap_or_else(|| brick_types.default_hits(kind)),
                            }
                        })
                        .collect(),
                }),
            },
            LevelFile::Pixel(file) => Level {
                name: file.name,
                ball_speed: effective_speed(file.ball_speed),
                layout: Layout::Pixel(PixelLayout {
                    default_width: file
                        .default_brick_width
                        .filter(|w| *w > 0.0)
                        .unwrap_or(DEFAULT_PIXEL_BRICK_WIDTH),
                    default_height: file
                        .default_brick_height
                        .filter(|h| *h > 0.0)
                        .unwrap_or(DEFAULT_PIXEL_BRICK_HEIGHT),
                    bricks: file
                        .bricks
                        .into_iter()
                        .map(|b| {
                            let kind = BrickKind::from_name(&b.kind);
                            PixelBrick {
                                x: b.pixel_x,
                                y: b.pixel_y,
                                kind,
                                hits: b.hits.unwrap_or_else(|| brick_types.default_hits(kind)),
                                width: b.width,
                                height: b.height,
                            }
                        })
                        .collect(),
                }),
            },
        }
    }
}

/// Older level files carry no format marker; classify them the way they
/// were always classified.
fn sniff_legacy_format(map: &serde_json::Map<String, Value>) -> &'static str {
    let flagged = map
        .get("use_pixel_positioning")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let pixel_bricks = map
        .get("bricks")
        .and_then(Value::as_array)
        .is_some_and(|bricks| {
            bricks
                .iter()
                .any(|b| b.get("pixel_x").is_some() || b.get("pixel_y").is_some())
        });
    let no_grid_sizing = map.get("brick_width").is_none() && map.get("brick_height").is_none();

    if flagged || pixel_bricks || no_grid_sizing {
        "pixel"
    } else {
        "grid"
    }
}

fn effective_speed(speed: f32) -> f32 {
    if speed > 0.0 { speed } else { FALLBACK_BALL_SPEED }
}
