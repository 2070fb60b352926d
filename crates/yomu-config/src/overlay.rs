use std::env;

use serde::{Deserialize, Serialize};

fn default_fps() -> u32 {
    30
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_font_file() -> String {
    "fonts/PressStart2P-Regular.ttf".to_string()
}

fn default_font_size() -> f32 {
    18.0
}

fn default_panel_font_size() -> f32 {
    24.0
}

fn default_stop_timeout_ms() -> u64 {
    500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    /// Frame loop target rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Directory holding the font and the nine-slice tile sets
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Font path relative to `assets_dir`
    #[serde(default = "default_font_file")]
    pub font_file: String,
    /// Tooltip text size, px
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Detail panel text size, px
    #[serde(default = "default_panel_font_size")]
    pub panel_font_size: f32,
    /// Bounded wait for the frame loop to exit on hide()
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl OverlayConfig {
    pub fn new() -> Self {
        let assets_dir = env::var("YOMU_ASSETS_DIR").unwrap_or_else(|_| default_assets_dir());
        let fps = env::var("OVERLAY_FPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_fps);

        Self {
            fps,
            assets_dir,
            ..Default::default()
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            assets_dir: default_assets_dir(),
            font_file: default_font_file(),
            font_size: default_font_size(),
            panel_font_size: default_panel_font_size(),
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}
