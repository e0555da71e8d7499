//! Shared numeric and style constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest cell size in pixels.
pub const MIN_CELL_SIZE: u32 = 5;

/// Largest cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 50;

/// Pixels added or removed by one zoom step.
pub const CELL_SIZE_STEP: u32 = 5;

/// Cell size used when nothing else is configured.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Largest viewport width or height in pixels.
pub const MAX_VIEWPORT_SIZE: u32 = 4096;

// ── Palette ─────────────────────────────────────────────────────

/// Fill for a live cell.
pub const ALIVE_FILL: &str = "#000";

/// Fill for a dead cell.
pub const DEAD_FILL: &str = "#f0f0f0";

/// Grid line color.
pub const GRID_STROKE: &str = "#999";

/// Grid line width in pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Grid line dash pattern: 5px on, 3px off.
pub const GRID_DASH: [f64; 2] = [5.0, 3.0];
