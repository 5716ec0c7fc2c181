//! Data-driven game balance
//!
//! Built once at startup and handed to the controller by value. Every field
//! has a default, so a tuning file only needs the values it changes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::level::BrickKind;

/// Points keyed by remaining lives, with a value for any count not listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsByLives {
    pub table: BTreeMap<u8, u32>,
    pub fallback: u32,
}

impl PointsByLives {
    pub fn flat(points: u32) -> Self {
        Self {
            table: BTreeMap::new(),
            fallback: points,
        }
    }

    pub fn points(&self, lives: u8) -> u32 {
        self.table.get(&lives).copied().unwrap_or(self.fallback)
    }
}

/// Scoring rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    /// Bonus for returning the ball with the paddle
    pub paddle_hit: PointsByLives,
    /// Points for destroying a brick; a damaging hit earns half
    pub brick_destroy: PointsByLives,
    /// Per-type replacements for `brick_destroy`
    pub brick_destroy_by_kind: BTreeMap<BrickKind, PointsByLives>,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            paddle_hit: PointsByLives::flat(10),
            brick_destroy: PointsByLives {
                table: BTreeMap::from([(3, 20), (2, 10), (1, 5)]),
                fallback: 5,
            },
            brick_destroy_by_kind: BTreeMap::new(),
        }
    }
}

impl ScoringTable {
    pub fn paddle_points(&self, lives: u8) -> u32 {
        self.paddle_hit.points(lives)
    }

    /// Points for a brick hit at the current lives count
    pub fn brick_points(&self, kind: BrickKind, lives: u8, destroyed: bool) -> u32 {
        let destroy = self
            .brick_destroy_by_kind
            .get(&kind)
            .unwrap_or(&self.brick_destroy)
            .points(lives);
        if destroyed { destroy } else { destroy / 2 }
    }
}

/// Per-type brick defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickTypeTable {
    /// Hits used when a level descriptor leaves `hits` out
    pub hits: BTreeMap<BrickKind, i32>,
}

impl BrickTypeTable {
    pub fn default_hits(&self, kind: BrickKind) -> i32 {
        self.hits.get(&kind).copied().unwrap_or(1)
    }
}

/// Paddle movement feel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum PaddleModel {
    /// Fixed speed while a direction is held
    Direct { speed: f32 },
    /// Acceleration, friction and a terminal velocity
    Inertial {
        accel: f32,
        friction: f32,
        max_speed: f32,
    },
}

impl PaddleModel {
    pub const DIRECT_DEFAULT: Self = PaddleModel::Direct { speed: 600.0 };
    pub const INERTIAL_DEFAULT: Self = PaddleModel::Inertial {
        accel: 2500.0,
        friction: 2400.0,
        max_speed: 450.0,
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleModel::Direct { .. } => "direct",
            PaddleModel::Inertial { .. } => "inertial",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Some(Self::DIRECT_DEFAULT),
            "inertial" | "inertia" => Some(Self::INERTIAL_DEFAULT),
            _ => None,
        }
    }
}

impl Default for PaddleModel {
    fn default() -> Self {
        Self::INERTIAL_DEFAULT
    }
}

/// Paddle bounce shaping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceTuning {
    /// Horizontal component cap as a fraction of speed
    pub max_horizontal: f32,
    /// Minimum upward component as a fraction of speed
    pub min_vertical: f32,
}

impl Default for BounceTuning {
    fn default() -> Self {
        Self {
            max_horizontal: 0.75,
            min_vertical: 0.5,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scoring: ScoringTable,
    pub bricks: BrickTypeTable,
    pub paddle: PaddleModel,
    pub bounce: BounceTuning,
    /// How far below the gameplay bottom the ball center must travel to be lost
    pub ball_lost_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scoring: ScoringTable::default(),
            bricks: BrickTypeTable::default(),
            paddle: PaddleModel::default(),
            bounce: BounceTuning::default(),
            ball_lost_margin: 50.0,
        }
    }
}

#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning: {e}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl Tuning {
    /// Create tuning with a different paddle model
    pub fn with_paddle(mut self, paddle: PaddleModel) -> Self {
        self.paddle = paddle;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, TuningError> {
        serde_json::from_str(text).map_err(TuningError::Parse)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path).map_err(TuningError::Io)?;
        Self::from_json(&text)
    }

    /// Load tuning from disk, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }
}
