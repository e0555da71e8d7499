#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{CELL_SIZE_STEP, DEFAULT_CELL_SIZE, MAX_CELL_SIZE, MAX_VIEWPORT_SIZE, MIN_CELL_SIZE};

/// A cell on the unbounded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<[i64; 2]> for Cell {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for [i64; 2] {
    fn from(cell: Cell) -> Self {
        [cell.x, cell.y]
    }
}

/// A point in viewport pixel space. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Inclusive range of grid cells visible in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl GridWindow {
    /// Whether `cell` falls inside the window.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_y..=self.max_y).contains(&cell.y)
    }

    /// Number of columns in the window.
    #[must_use]
    pub fn columns(&self) -> u64 {
        self.max_x.abs_diff(self.min_x) + 1
    }

    /// Number of rows in the window.
    #[must_use]
    pub fn rows(&self) -> u64 {
        self.max_y.abs_diff(self.min_y) + 1
    }
}

/// Finite pixel region onto which the grid is projected, centred on cell (0, 0).
///
/// `cell_size` is the zoom level in pixels per cell. It always stays within
/// [`MIN_CELL_SIZE`]..=[`MAX_CELL_SIZE`] on a [`CELL_SIZE_STEP`] boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0, height: 0, cell_size: DEFAULT_CELL_SIZE }
    }
}

impl Viewport {
    /// Build a viewport. `cell_size` is clamped into range and snapped down to a zoom step.
    /// Dimensions are capped at [`MAX_VIEWPORT_SIZE`].
    #[must_use]
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width: width.min(MAX_VIEWPORT_SIZE),
            height: height.min(MAX_VIEWPORT_SIZE),
            cell_size: snap_cell_size(cell_size),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Change the pixel dimensions, capped at [`MAX_VIEWPORT_SIZE`]. Zoom is left alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.min(MAX_VIEWPORT_SIZE);
        self.height = height.min(MAX_VIEWPORT_SIZE);
    }

    /// Grow cells by one step. Returns `false` when already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.cell_size >= MAX_CELL_SIZE {
            return false;
        }
        self.cell_size = (self.cell_size + CELL_SIZE_STEP).min(MAX_CELL_SIZE);
        true
    }

    /// Shrink cells by one step. Returns `false` when already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        if self.cell_size <= MIN_CELL_SIZE {
            return false;
        }
        self.cell_size = self.cell_size.saturating_sub(CELL_SIZE_STEP).max(MIN_CELL_SIZE);
        true
    }

    /// Half the window size in cells along each axis, rounded down.
    ///
    /// When a dimension is not a multiple of `2 * cell_size` the leftover
    /// pixels sit on the right/bottom edge.
    #[must_use]
    pub fn half_extent(&self) -> (i64, i64) {
        let span = 2 * self.cell_size;
        (i64::from(self.width / span), i64::from(self.height / span))
    }

    /// Cells drawn by the renderer, bounds inclusive.
    #[must_use]
    pub fn visible_window(&self) -> GridWindow {
        let (hx, hy) = self.half_extent();
        GridWindow { min_x: -hx, max_x: hx, min_y: -hy, max_y: hy }
    }

    /// Top-left pixel of `cell`'s rectangle.
    #[must_use]
    pub fn grid_to_pixel(&self, cell: Cell) -> PixelPoint {
        let (hx, hy) = self.half_extent();
        let size = i64::from(self.cell_size);
        PixelPoint {
            x: cell.x.saturating_add(hx).saturating_mul(size),
            y: cell.y.saturating_add(hy).saturating_mul(size),
        }
    }

    /// Cell whose rectangle contains `pixel`.
    ///
    /// Uses floor division so pixels left of or above the surface still map to
    /// the neighbouring cells instead of collapsing onto column/row zero.
    #[must_use]
    pub fn pixel_to_grid(&self, pixel: PixelPoint) -> Cell {
        let (hx, hy) = self.half_extent();
        let size = i64::from(self.cell_size);
        Cell {
            x: pixel.x.div_euclid(size) - hx,
            y: pixel.y.div_euclid(size) - hy,
        }
    }
}

fn snap_cell_size(cell_size: u32) -> u32 {
    let clamped = cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
    clamped - clamped % CELL_SIZE_STEP
}
