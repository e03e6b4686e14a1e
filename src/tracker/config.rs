//! Configuration types for the tracker and overlay.
//!
//! Loads settings from config.json at startup. Provides capture regions,
//! matching parameters, OCR tuning and window geometry.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::side::Side;

/// A rectangle in absolute screen coordinates (physical pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    /// X position of top-left corner
    pub x: i32,
    /// Y position of top-left corner
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Image preprocessing and Tesseract settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Pixels with R, G, B all above this become text (black)
    pub threshold: u8,
    /// Upscale factor applied before thresholding (small UI text OCRs poorly)
    pub scale: u32,
    /// Tesseract page segmentation mode (7 = single text line)
    pub psm: u8,
    /// Tesseract language
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            scale: 3,
            psm: 7,
            language: "eng".to_string(),
        }
    }
}

/// Overlay window geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    /// Left edge; anchored to the right side of the primary screen when absent
    pub x: Option<f32>,
    pub y: f32,
    /// Edge length of the square type icons
    pub icon_size: u32,
    pub always_on_top: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            x: None,
            y: 0.0,
            icon_size: 30,
            always_on_top: true,
        }
    }
}

/// Complete tracker configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Region showing your own Pokémon's name
    pub mine_region: ScreenRect,
    /// Region showing the rival Pokémon's name
    pub rival_region: ScreenRect,
    /// Time between refreshes (milliseconds)
    pub refresh_interval_ms: u64,
    /// Minimum similarity (0.0-1.0) for accepting a fuzzy name match
    pub match_cutoff: f64,
    /// Tokens that introduce a level indicator in OCR text
    pub level_prefixes: Vec<String>,
    /// Type chart file name inside the data directory
    pub type_chart_file: String,
    /// Species type table file name inside the data directory
    pub species_file: String,
    pub ocr: OcrConfig,
    pub window: WindowConfig,
    /// Save every captured region (raw and preprocessed) for inspection
    pub save_debug_captures: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            // Positions for a 1920x1080 client; adjust in config.json
            mine_region: ScreenRect {
                x: 1395,
                y: 530,
                width: 100,
                height: 20,
            },
            rival_region: ScreenRect {
                x: 335,
                y: 150,
                width: 100,
                height: 20,
            },
            refresh_interval_ms: 3000,
            match_cutoff: 0.8,
            level_prefixes: vec!["Lv".to_string(), "Nv".to_string()],
            type_chart_file: "type_chart.json".to_string(),
            species_file: "pokemon_types.json".to_string(),
            ocr: OcrConfig::default(),
            window: WindowConfig::default(),
            save_debug_captures: false,
        }
    }
}

impl TrackerConfig {
    /// Capture region for one side.
    pub fn region(&self, side: Side) -> &ScreenRect {
        match side {
            Side::Mine => &self.mine_region,
            Side::Rival => &self.rival_region,
        }
    }
}

/// Default location: config.json next to the executable.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
        .unwrap_or_else(|| Path::new("config.json").to_path_buf())
}

/// Loads configuration from `config_path` or returns defaults.
pub fn load_config(config_path: &Path) -> TrackerConfig {
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    TrackerConfig::default()
}
