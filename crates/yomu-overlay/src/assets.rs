use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use image::RgbaImage;
use yomu_config::overlay::OverlayConfig;

use crate::OverlayError;

const TILE_NAMES: [&str; 9] = [
    "top_left.png",
    "top.png",
    "top_right.png",
    "left.png",
    "center.png",
    "right.png",
    "bottom_left.png",
    "bottom.png",
    "bottom_right.png",
];

/// One nine-slice tile set: corner, edge and center tiles used to draw
/// bordered boxes of arbitrary size with fixed-width borders
pub struct NineSlice {
    pub tl: RgbaImage,
    pub t: RgbaImage,
    pub tr: RgbaImage,
    pub l: RgbaImage,
    pub c: RgbaImage,
    pub r: RgbaImage,
    pub bl: RgbaImage,
    pub b: RgbaImage,
    pub br: RgbaImage,
}

impl NineSlice {
    pub fn load(dir: &Path) -> Result<Self, OverlayError> {
        let mut tiles = TILE_NAMES.iter().map(|name| load_tile(&dir.join(name)));
        // Order matches TILE_NAMES
        Ok(Self {
            tl: tiles.next().unwrap()?,
            t: tiles.next().unwrap()?,
            tr: tiles.next().unwrap()?,
            l: tiles.next().unwrap()?,
            c: tiles.next().unwrap()?,
            r: tiles.next().unwrap()?,
            bl: tiles.next().unwrap()?,
            b: tiles.next().unwrap()?,
            br: tiles.next().unwrap()?,
        })
    }

    /// Tile dimensions, taken from the center tile
    pub fn tile_size(&self) -> (i32, i32) {
        (self.c.width() as i32, self.c.height() as i32)
    }
}

fn load_tile(path: &PathBuf) -> Result<RgbaImage, OverlayError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| OverlayError::Asset {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Everything the renderer needs, loaded once before the frame loop starts.
///
/// Any missing file is fatal to overlay startup; there is no degraded
/// rendering mode without the font or the tile sets.
pub struct OverlayAssets {
    pub font: Font,
    pub font_size: f32,
    pub panel_font_size: f32,
    pub box_border: NineSlice,
    pub tooltip: NineSlice,
}

impl OverlayAssets {
    pub fn load(config: &OverlayConfig) -> Result<Self, OverlayError> {
        let assets_dir = Path::new(&config.assets_dir);

        let font_path = assets_dir.join(&config.font_file);
        let font_bytes = std::fs::read(&font_path).map_err(|e| OverlayError::Asset {
            path: font_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let font = Font::from_bytes(font_bytes.as_slice(), FontSettings::default()).map_err(
            |e| OverlayError::Asset {
                path: font_path.display().to_string(),
                reason: e.to_string(),
            },
        )?;

        let box_border = NineSlice::load(&assets_dir.join("box_border_small"))?;
        let tooltip = NineSlice::load(&assets_dir.join("tooltip_small"))?;

        Ok(Self {
            font,
            font_size: config.font_size,
            panel_font_size: config.panel_font_size,
            box_border,
            tooltip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assets_fail_startup() {
        let config = OverlayConfig {
            assets_dir: "/definitely/not/a/real/path".to_string(),
            ..Default::default()
        };
        match OverlayAssets::load(&config) {
            Err(OverlayError::Asset { path, .. }) => {
                assert!(path.contains("not/a/real/path"));
            }
            other => panic!("expected asset error, got {:?}", other.map(|_| ())),
        }
    }
}
