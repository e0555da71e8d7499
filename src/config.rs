//! Startup configuration from flags and `LIFEBOARD_*` environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use canvas::camera::Viewport;
use canvas::consts::{CELL_SIZE_STEP, MAX_CELL_SIZE, MAX_VIEWPORT_SIZE, MIN_CELL_SIZE};
use clap::Parser;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("server URL must start with ws:// or wss://, got `{0}`")]
    InvalidServerUrl(String),
    #[error("viewport must be at least one pixel wide and tall, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("viewport {width}x{height} is larger than {max}px per side", max = MAX_VIEWPORT_SIZE)]
    ViewportTooLarge { width: u32, height: u32 },
    #[error("cell size must be a multiple of 5 between 5 and 50, got {0}")]
    InvalidCellSize(u32),
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "lifeboard", about = "Terminal client for a shared Game of Life server")]
pub struct Config {
    /// Websocket endpoint of the game server.
    #[arg(long, env = "LIFEBOARD_SERVER_URL", default_value = "ws://127.0.0.1:8000/ws")]
    pub server_url: String,

    /// Viewport width in pixels.
    #[arg(long, env = "LIFEBOARD_WIDTH", default_value_t = 400)]
    pub width: u32,

    /// Viewport height in pixels.
    #[arg(long, env = "LIFEBOARD_HEIGHT", default_value_t = 300)]
    pub height: u32,

    /// Initial cell size in pixels.
    #[arg(long, env = "LIFEBOARD_CELL_SIZE", default_value_t = canvas::consts::DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Connection attempts after the server drops the link; 0 exits at once.
    #[arg(long, env = "LIFEBOARD_RECONNECT_ATTEMPTS", default_value_t = 5)]
    pub reconnect_attempts: u32,
}

impl Config {
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::InvalidServerUrl(self.server_url.clone()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport { width: self.width, height: self.height });
        }
        if self.width > MAX_VIEWPORT_SIZE || self.height > MAX_VIEWPORT_SIZE {
            return Err(ConfigError::ViewportTooLarge { width: self.width, height: self.height });
        }
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&self.cell_size) || self.cell_size % CELL_SIZE_STEP != 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.cell_size)
    }
}
