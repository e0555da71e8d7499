//! Rendering: turns the live-cell set into an ordered list of draw commands.
//!
//! This module never touches a real drawing surface. [`render`] is a pure
//! function of the active cells and the viewport; [`execute`] replays the
//! resulting commands onto anything implementing [`Surface`]. Every call
//! repaints the full window, there is no dirty-region tracking.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashSet;

use crate::camera::{Cell, Viewport};
use crate::consts::{ALIVE_FILL, DEAD_FILL, GRID_DASH, GRID_LINE_WIDTH, GRID_STROKE};
use crate::surface::Surface;

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Outline style for a stroked rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub line_width: f64,
    pub dash: [f64; 2],
}

/// The grid's dashed cell outline.
pub const GRID_LINE: Stroke = Stroke { color: GRID_STROKE, line_width: GRID_LINE_WIDTH, dash: GRID_DASH };

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface.
    Clear { width: u32, height: u32 },
    /// Solid fill.
    FillRect { rect: Rect, color: &'static str },
    /// Outline.
    StrokeRect { rect: Rect, stroke: Stroke },
}

/// Produce the full repaint for `viewport`.
///
/// The first command is always [`DrawCommand::Clear`]. Then, column by column
/// (x outer, y inner) across the inclusive visible window, each cell gets a
/// fill followed by its grid outline.
#[must_use]
pub fn render(active: &HashSet<Cell>, viewport: &Viewport) -> Vec<DrawCommand> {
    let window = viewport.visible_window();
    let size = viewport.cell_size();
    let cells = usize::try_from(window.columns().saturating_mul(window.rows())).unwrap_or(0);

    let mut commands = Vec::with_capacity(cells.saturating_mul(2).saturating_add(1));
    commands.push(DrawCommand::Clear { width: viewport.width(), height: viewport.height() });

    for x in window.min_x..=window.max_x {
        for y in window.min_y..=window.max_y {
            let cell = Cell::new(x, y);
            let origin = viewport.grid_to_pixel(cell);
            let rect = Rect { x: origin.x, y: origin.y, width: size, height: size };
            let color = if active.contains(&cell) { ALIVE_FILL } else { DEAD_FILL };
            commands.push(DrawCommand::FillRect { rect, color });
            commands.push(DrawCommand::StrokeRect { rect, stroke: GRID_LINE });
        }
    }

    commands
}

/// Replay `commands` onto `surface` in order.
///
/// # Errors
///
/// Stops at and returns the first error reported by the surface.
pub fn execute<S: Surface>(commands: &[DrawCommand], surface: &mut S) -> Result<(), S::Error> {
    for command in commands {
        match command {
            DrawCommand::Clear { width, height } => surface.clear(*width, *height)?,
            DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, color)?,
            DrawCommand::StrokeRect { rect, stroke } => surface.stroke_rect(*rect, stroke)?,
        }
    }
    Ok(())
}
