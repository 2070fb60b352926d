use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "ja".to_string()
}

fn default_min_script_chars() -> usize {
    2
}

fn default_min_script_ratio() -> f32 {
    0.5
}

/// Text detection and script filtering.
///
/// A detected string survives filtering only if it has at least
/// `min_script_chars` characters in the target script and the in-script
/// fraction of its characters is at least `min_script_ratio`.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectionConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_min_script_chars")]
    pub min_script_chars: usize,
    #[serde(default = "default_min_script_ratio")]
    pub min_script_ratio: f32,
}

impl DetectionConfig {
    pub fn new() -> Self {
        let language = env::var("OCR_LANGUAGE").unwrap_or_else(|_| default_language());

        Self {
            language,
            ..Default::default()
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            min_script_chars: default_min_script_chars(),
            min_script_ratio: default_min_script_ratio(),
        }
    }
}
