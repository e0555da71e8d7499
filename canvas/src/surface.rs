//! Drawing surfaces that [`crate::render::execute`] can paint onto.
//!
//! A surface is the thin output adapter between draw commands and a concrete
//! target. [`TextSurface`] rasterises the grid into characters for terminals;
//! the browser adapter lives in [`crate::web`] behind the `web` feature.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::convert::Infallible;
use std::fmt;

use crate::consts::ALIVE_FILL;
use crate::render::{Rect, Stroke};

/// Fill / stroke / clear primitives.
pub trait Surface {
    type Error;

    /// Erase everything within `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Surface-specific.
    fn clear(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Fill `rect` with `color` (a CSS color string).
    ///
    /// # Errors
    ///
    /// Surface-specific.
    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error>;

    /// Outline `rect`.
    ///
    /// # Errors
    ///
    /// Surface-specific.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), Self::Error>;
}

/// Glyph for a filled live cell.
pub const ALIVE_GLYPH: char = '#';
/// Glyph for a filled dead cell.
pub const DEAD_GLYPH: char = '.';

/// One character per filled rectangle; outlines are ignored.
///
/// The character position is the rectangle origin divided by its size, so a
/// full repaint produces one row per grid row.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    rows: Vec<Vec<char>>,
}

impl TextSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered rows, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    fn put(&mut self, col: usize, row: usize, glyph: char) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.rows[row];
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
        line[col] = glyph;
    }
}

impl Surface for TextSurface {
    type Error = Infallible;

    fn clear(&mut self, _width: u32, _height: u32) -> Result<(), Infallible> {
        self.rows.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Infallible> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        let (Ok(x), Ok(y)) = (u64::try_from(rect.x), u64::try_from(rect.y)) else {
            return Ok(());
        };
        let col = x / u64::from(rect.width);
        let row = y / u64::from(rect.height);
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            return Ok(());
        };
        let glyph = if color == ALIVE_FILL { ALIVE_GLYPH } else { DEAD_GLYPH };
        self.put(col, row, glyph);
        Ok(())
    }

    fn stroke_rect(&mut self, _rect: Rect, _stroke: &Stroke) -> Result<(), Infallible> {
        Ok(())
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
