//! Level loading error taxonomy

use std::fmt;
use std::path::PathBuf;

/// What made a level geometrically or semantically invalid
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    MissingName,
    NoBricks,
    ColumnOutOfRange { column: i32 },
    RowOutOfRange { row: i32 },
    NonPositiveHits { hits: i32 },
    NonPositiveSize { width: f32, height: f32 },
    FieldTooWide { width: f32, limit: f32 },
    OutsideHorizontal { start: f32, end: f32 },
    AboveArea { y: f32 },
    BelowArea { y: f32 },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "level must have a name"),
            Self::NoBricks => write!(f, "level must have at least one brick"),
            Self::ColumnOutOfRange { column } => write!(f, "invalid column {column}"),
            Self::RowOutOfRange { row } => write!(f, "invalid row {row}"),
            Self::NonPositiveHits { hits } => write!(f, "hits must be positive, got {hits}"),
            Self::NonPositiveSize { width, height } => {
                write!(f, "brick size must be positive, got {width}x{height}")
            }
            Self::FieldTooWide { width, limit } => write!(
                f,
                "brick field width ({width:.0} px) exceeds gameplay width ({limit:.0} px)"
            ),
            Self::OutsideHorizontal { start, end } => write!(
                f,
                "bricks outside horizontal gameplay bounds (start={start:.0}, end={end:.0})"
            ),
            Self::AboveArea { y } => {
                write!(f, "bricks would render above gameplay area (y={y:.0})")
            }
            Self::BelowArea { y } => {
                write!(f, "bricks would render below gameplay area (y={y:.0})")
            }
        }
    }
}

/// A validation failure, pointing at the offending brick when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub brick: Option<usize>,
    pub issue: ValidationIssue,
}

impl ValidationError {
    pub fn level(issue: ValidationIssue) -> Self {
        Self { brick: None, issue }
    }

    pub fn brick(index: usize, issue: ValidationIssue) -> Self {
        Self {
            brick: Some(index),
            issue,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.brick {
            Some(index) => write!(f, "brick {index}: {}", self.issue),
            None => write!(f, "{}", self.issue),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum LevelError {
    /// No descriptor exists for this level number (expected at end of content)
    NotFound { level: u32 },
    Io { path: PathBuf, source: std::io::Error },
    Parse { level: u32, message: String },
    Validation { level: u32, error: ValidationError },
}

impl LevelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { level } => write!(f, "level {level} not found"),
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse { level, message } => write!(f, "failed to parse level {level}: {message}"),
            Self::Validation { level, error } => {
                write!(f, "level {level} validation failed: {error}")
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Validation { error, .. } => Some(error),
            _ => None,
        }
    }
}
