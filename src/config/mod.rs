//! Configuration file support for inkboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/inkboard/config.toml`. Settings
//! cover the drawing defaults and the export destination.
//!
//! If no config file exists, sensible defaults are used automatically.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::draw::color::{self, Color};
use crate::draw::surface::{DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_brush_width = 5.0
/// background = "white"
///
/// [export]
/// directory = "~/Pictures/Inkboard"
/// filename_template = "drawing_%Y-%m-%d_%H%M%S"
/// format = "png"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing defaults (color, brush width, background)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Export destination settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Drawing-related settings.
///
/// Controls the appearance of the board when it first opens. Users change
/// color and brush width at runtime through the palette and slider.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initially selected palette color
    /// (black, red, orange, green, blue, purple, yellow, pink, white)
    #[serde(default = "default_color_name")]
    pub default_color: String,

    /// Initial brush width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_brush_width")]
    pub default_brush_width: f64,

    /// Board background color; the matching palette entry acts as the eraser
    #[serde(default = "default_background_name")]
    pub background: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color_name(),
            default_brush_width: default_brush_width(),
            background: default_background_name(),
        }
    }
}

impl DrawingConfig {
    /// Resolves the configured default color name.
    ///
    /// Unknown names were already reset during validation; the fallback here
    /// only guards hand-built configs that skipped [`Config::load`].
    pub fn default_color(&self) -> Color {
        color::name_to_color(&self.default_color).unwrap_or(color::BLACK)
    }

    /// Resolves the configured background color name.
    pub fn background_color(&self) -> Color {
        color::name_to_color(&self.background).unwrap_or(color::WHITE)
    }
}

/// Export destination settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported drawings are written to (supports a leading `~/`)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template (supports chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format extension (only "png" is supported)
    #[serde(default = "default_export_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            format: default_export_format(),
        }
    }
}

fn default_color_name() -> String {
    "black".to_string()
}

fn default_brush_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

fn default_background_name() -> String {
    "white".to_string()
}

fn default_export_directory() -> String {
    "~/Pictures/Inkboard".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}

fn default_export_format() -> String {
    "png".to_string()
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause
    /// rendering issues. Invalid values are clamped or reset to the nearest
    /// valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_brush_width`: 1.0 - 50.0
    /// - `default_color` / `background`: must be palette color names
    /// - `export.format`: must be "png"
    /// - `export.filename_template`: must be non-empty
    fn validate_and_clamp(&mut self) {
        if !(MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(&self.drawing.default_brush_width) {
            log::warn!(
                "Invalid default_brush_width {:.1}, clamping to {:.0}-{:.0} range",
                self.drawing.default_brush_width,
                MIN_STROKE_WIDTH,
                MAX_STROKE_WIDTH
            );
            self.drawing.default_brush_width = self
                .drawing
                .default_brush_width
                .clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        }

        if color::name_to_color(&self.drawing.default_color).is_none() {
            log::warn!(
                "Invalid default_color '{}', falling back to 'black'",
                self.drawing.default_color
            );
            self.drawing.default_color = default_color_name();
        }

        if color::name_to_color(&self.drawing.background).is_none() {
            log::warn!(
                "Invalid background '{}', falling back to 'white'",
                self.drawing.background
            );
            self.drawing.background = default_background_name();
        }

        if !self.export.format.eq_ignore_ascii_case("png") {
            log::warn!(
                "Unsupported export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = default_export_format();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, restoring default");
            self.export.filename_template = default_filename_template();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(config_str: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(config_str)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/inkboard/config.toml`. Creates the parent directory if it
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
