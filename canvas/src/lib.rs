//! Grid viewport engine for the Life board client.
//!
//! The board is an unbounded grid of integer cells; the viewport is a finite
//! pixel surface centred on cell (0, 0). This crate owns the coordinate
//! mapping between the two, the zoom bounds, and the conversion of a live-cell
//! set into draw commands. It holds no session state: callers pass in the
//! cells and viewport they own.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Cells, viewport, zoom and grid/pixel conversions |
//! | [`render`] | Pure draw-command production and replay |
//! | [`surface`] | The [`surface::Surface`] adapter trait and a text surface |
//! | `web` | `CanvasRenderingContext2d` surface (feature `web`) |
//! | [`consts`] | Zoom limits and palette |

pub mod camera;
pub mod consts;
pub mod render;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;
