//! Scene configuration resource.
//!
//! Manages scheduler and surface settings loaded from an INI configuration
//! file. Provides defaults for safe startup and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [scheduler]
//! tick_rate_ms = 20
//! target_fps = 0
//! vsync_hz = 60
//!
//! [surface]
//! width = 640
//! height = 360
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::SceneError;

/// Default safe values for startup
const DEFAULT_TICK_RATE_MS: u64 = 20;
const DEFAULT_TARGET_FPS: u32 = 0;
const DEFAULT_VSYNC_HZ: u32 = 60;
const DEFAULT_SURFACE_WIDTH: u32 = 640;
const DEFAULT_SURFACE_HEIGHT: u32 = 360;
const DEFAULT_CONFIG_PATH: &str = "./scene.ini";

/// Scene configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Milliseconds between think ticks.
    pub tick_rate_ms: u64,
    /// Render frame cap. 0 renders on every vsync.
    pub target_fps: u32,
    /// Display refresh rate used to place vsync callbacks.
    pub vsync_hz: u32,
    /// Drawing surface width in pixels.
    pub surface_width: u32,
    /// Drawing surface height in pixels.
    pub surface_height: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            target_fps: DEFAULT_TARGET_FPS,
            vsync_hz: DEFAULT_VSYNC_HZ,
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), SceneError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| SceneError::Config(format!("failed to load config file: {}", e)))?;

        // [scheduler] section
        if let Some(rate) = config.getuint("scheduler", "tick_rate_ms").ok().flatten() {
            self.tick_rate_ms = rate.max(1);
        }
        if let Some(fps) = config.getuint("scheduler", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(hz) = config.getuint("scheduler", "vsync_hz").ok().flatten() {
            self.vsync_hz = hz as u32;
        }

        // [surface] section
        if let Some(width) = config.getuint("surface", "width").ok().flatten() {
            self.surface_width = width as u32;
        }
        if let Some(height) = config.getuint("surface", "height").ok().flatten() {
            self.surface_height = height as u32;
        }

        info!(
            "Loaded config: tick_rate={}ms, fps={}, vsync={}Hz, surface={}x{}",
            self.tick_rate_ms,
            self.target_fps,
            self.vsync_hz,
            self.surface_width,
            self.surface_height
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), SceneError> {
        let mut config = Ini::new();

        // [scheduler] section
        config.set("scheduler", "tick_rate_ms", Some(self.tick_rate_ms.to_string()));
        config.set("scheduler", "target_fps", Some(self.target_fps.to_string()));
        config.set("scheduler", "vsync_hz", Some(self.vsync_hz.to_string()));

        // [surface] section
        config.set("surface", "width", Some(self.surface_width.to_string()));
        config.set("surface", "height", Some(self.surface_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| SceneError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the think tick interval. Zero is bumped to one millisecond.
    pub fn set_tick_rate(&mut self, ms: u64) {
        self.tick_rate_ms = ms.max(1);
    }

    /// Set the frame cap. 0 means uncapped.
    pub fn set_fps(&mut self, fps: u32) {
        self.target_fps = fps;
    }

    /// Set surface size.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Get the surface size.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }
}
