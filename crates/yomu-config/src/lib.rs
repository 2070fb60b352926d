use serde::{Deserialize, Serialize};

use self::detection::DetectionConfig;
use self::overlay::OverlayConfig;
use self::translator::TranslatorConfig;

pub mod detection;
pub mod overlay;
pub mod translator;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub detection: DetectionConfig,
    pub translator: TranslatorConfig,
    pub overlay: OverlayConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            detection: DetectionConfig::new(),
            translator: TranslatorConfig::new(),
            overlay: OverlayConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
