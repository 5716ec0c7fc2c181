//! Grid geometry, auto-fit and validation
//!
//! Rows are centered independently: each row's own min/max occupied column
//! decides its horizontal offset. The same helpers place bricks at runtime,
//! so validation and rendering can never disagree.

use std::collections::BTreeMap;

use glam::Vec2;

use super::error::{ValidationError, ValidationIssue};
use super::{GridBrick, GridLayout, Layout, Level, PixelLayout};
use crate::consts::*;

/// Float slack for bounds checks on auto-fitted sizes
const BOUNDS_EPSILON: f32 = 0.01;

/// Width of `columns` adjacent bricks including the gaps between them
#[inline]
pub fn span_width(columns: i32, brick_width: f32, spacing_x: f32) -> f32 {
    columns as f32 * brick_width + (columns - 1).max(0) as f32 * spacing_x
}

/// Left edge of a row spanning `min_col..=max_col`, centered in the gameplay area
pub fn row_start_x(min_col: i32, max_col: i32, brick_width: f32, spacing_x: f32) -> f32 {
    let width = span_width(max_col - min_col + 1, brick_width, spacing_x);
    GAME_AREA_LEFT + (GAME_AREA_WIDTH - width) / 2.0
}

/// Top-left pixel position of a grid cell whose row spans `min_col..=max_col`
pub fn grid_cell_position(
    column: i32,
    row: i32,
    row_bounds: (i32, i32),
    brick_size: Vec2,
    spacing: Vec2,
) -> Vec2 {
    let (min_col, max_col) = row_bounds;
    let start = row_start_x(min_col, max_col, brick_size.x, spacing.x);
    Vec2::new(
        start + (column - min_col) as f32 * (brick_size.x + spacing.x),
        GAME_AREA_TOP + row as f32 * (brick_size.y + spacing.y),
    )
}

/// Min/max occupied column for every row
pub fn row_bounds(bricks: &[GridBrick]) -> BTreeMap<i32, (i32, i32)> {
    let mut bounds: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    for brick in bricks {
        bounds
            .entry(brick.row)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(brick.column);
                *hi = (*hi).max(brick.column);
            })
            .or_insert((brick.column, brick.column));
    }
    bounds
}

/// Shrink brick width (and height, keeping aspect ratio) so the whole
/// field's column span fits the gameplay width. Spacing is left untouched.
///
/// Returns true if the layout was changed.
pub fn auto_fit(grid: &mut GridLayout) -> bool {
    if grid.bricks.is_empty() || grid.brick_width <= 0.0 {
        return false;
    }

    let min_col = grid.bricks.iter().map(|b| b.column).min().unwrap_or(0);
    let max_col = grid.bricks.iter().map(|b| b.column).max().unwrap_or(0);
    // Columns off the grid are a validation error, not something to fit
    if min_col < 0 || max_col >= BRICK_COLS {
        return false;
    }
    let columns = max_col - min_col + 1;

    if span_width(columns, grid.brick_width, grid.spacing_x) <= GAME_AREA_WIDTH {
        return false;
    }

    let available = GAME_AREA_WIDTH - (columns - 1) as f32 * grid.spacing_x;
    if available <= 0.0 {
        // Spacing alone overflows; validation reports it
        return false;
    }
    let new_width = (available / columns as f32).floor();
    if new_width <= 0.0 {
        return false;
    }

    let ratio = grid.brick_height / grid.brick_width;
    grid.brick_width = new_width;
    grid.brick_height = (new_width * ratio).floor();
    true
}

/// Check a level against the gameplay area
pub fn validate(level: &Level) -> Result<(), ValidationError> {
    if level.name.trim().is_empty() {
        return Err(ValidationError::level(ValidationIssue::MissingName));
    }
    if level.brick_count() == 0 {
        return Err(ValidationError::level(ValidationIssue::NoBricks));
    }

    match &level.layout {
        Layout::Grid(grid) => validate_grid(grid),
        Layout::Pixel(pixel) => validate_pixel(pixel),
    }
}

/// Per-brick grid checks: cell inside the 12x10 grid and a positive hit count.
///
/// Runs before auto-fit so layout math only ever sees on-grid columns.
pub fn validate_cells(grid: &GridLayout) -> Result<(), ValidationError> {
    for (i, brick) in grid.bricks.iter().enumerate() {
        if brick.column < 0 || brick.column >= BRICK_COLS {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::ColumnOutOfRange {
                    column: brick.column,
                },
            ));
        }
        if brick.row < 0 || brick.row >= BRICK_ROWS {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::RowOutOfRange { row: brick.row },
            ));
        }
        if brick.hits <= 0 {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::NonPositiveHits { hits: brick.hits },
            ));
        }
    }
    Ok(())
}

fn validate_grid(grid: &GridLayout) -> Result<(), ValidationError> {
    validate_cells(grid)?;

    if grid.brick_width <= 0.0 || grid.brick_height <= 0.0 {
        return Err(ValidationError::level(ValidationIssue::NonPositiveSize {
            width: grid.brick_width,
            height: grid.brick_height,
        }));
    }

    let rows = row_bounds(&grid.bricks);
    let first_in_row = |row: i32| grid.bricks.iter().position(|b| b.row == row);

    for (&row, &(min_col, max_col)) in &rows {
        let width = span_width(max_col - min_col + 1, grid.brick_width, grid.spacing_x);
        let index = first_in_row(row).unwrap_or(0);
        if width > GAME_AREA_WIDTH + BOUNDS_EPSILON {
            return Err(ValidationError::brick(
                index,
                ValidationIssue::FieldTooWide {
                    width,
                    limit: GAME_AREA_WIDTH,
                },
            ));
        }
        let start = row_start_x(min_col, max_col, grid.brick_width, grid.spacing_x);
        let end = start + width;
        if start < GAME_AREA_LEFT - BOUNDS_EPSILON || end > GAME_AREA_RIGHT + BOUNDS_EPSILON {
            return Err(ValidationError::brick(
                index,
                ValidationIssue::OutsideHorizontal { start, end },
            ));
        }
    }

    for (i, brick) in grid.bricks.iter().enumerate() {
        let top = GAME_AREA_TOP + brick.row as f32 * (grid.brick_height + grid.spacing_y);
        let bottom = top + grid.brick_height;
        if top < GAME_AREA_TOP - BOUNDS_EPSILON {
            return Err(ValidationError::brick(i, ValidationIssue::AboveArea { y: top }));
        }
        if bottom > GAME_AREA_BOTTOM + BOUNDS_EPSILON {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::BelowArea { y: bottom },
            ));
        }
    }

    Ok(())
}

fn validate_pixel(pixel: &PixelLayout) -> Result<(), ValidationError> {
    for (i, brick) in pixel.bricks.iter().enumerate() {
        if brick.hits <= 0 {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::NonPositiveHits { hits: brick.hits },
            ));
        }

        let width = brick.width.unwrap_or(pixel.default_width);
        let height = brick.height.unwrap_or(pixel.default_height);
        if width <= 0.0 || height <= 0.0 {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::NonPositiveSize { width, height },
            ));
        }

        let start = GAME_AREA_LEFT + brick.x;
        let end = start + width;
        if start < GAME_AREA_LEFT || end > GAME_AREA_RIGHT {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::OutsideHorizontal { start, end },
            ));
        }

        let top = GAME_AREA_TOP + brick.y;
        if top < GAME_AREA_TOP {
            return Err(ValidationError::brick(i, ValidationIssue::AboveArea { y: top }));
        }
        if top + height > GAME_AREA_BOTTOM {
            return Err(ValidationError::brick(
                i,
                ValidationIssue::BelowArea { y: top + height },
            ));
        }
    }
    Ok(())
}
