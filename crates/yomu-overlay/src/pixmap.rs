use image::RgbaImage;
use yomu_types::Rect;

/// RGBA color, straight alpha
pub type Color = [u8; 4];

/// Software frame buffer, straight-alpha RGBA, top-down rows.
///
/// All draw operations clip against the buffer bounds; out-of-range
/// coordinates are safe and simply draw less.
pub struct Pixmap {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl Pixmap {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(self.width);
        let y1 = (rect.y + rect.h).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_over(x, y, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let t = thickness.min(rect.w / 2 + 1).min(rect.h / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.h - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.x + rect.w - t, rect.y, t, rect.h), color);
    }

    /// Alpha-over blit of a loaded image tile
    pub fn blit_image(&mut self, img: &RgbaImage, dst_x: i32, dst_y: i32) {
        self.blit_image_clamped(img, dst_x, dst_y, img.width() as i32, img.height() as i32);
    }

    /// Blit at most `max_w` x `max_h` of the tile; used for partial edge tiles
    pub fn blit_image_clamped(
        &mut self,
        img: &RgbaImage,
        dst_x: i32,
        dst_y: i32,
        max_w: i32,
        max_h: i32,
    ) {
        let w = (img.width() as i32).min(max_w);
        let h = (img.height() as i32).min(max_h);

        for sy in 0..h {
            for sx in 0..w {
                let p = img.get_pixel(sx as u32, sy as u32).0;
                self.set_over(dst_x + sx, dst_y + sy, p);
            }
        }
    }

    /// Alpha-over blit of another pixmap, with its alpha scaled by
    /// `opacity` (0 = invisible, 255 = as-is). Drives the tooltip fade.
    pub fn blit_pixmap(&mut self, src: &Pixmap, dst_x: i32, dst_y: i32, opacity: u8) {
        if opacity == 0 {
            return;
        }
        for sy in 0..src.height {
            for sx in 0..src.width {
                let i = (sy as usize * src.width as usize + sx as usize) * 4;
                let mut p: Color = [
                    src.data[i],
                    src.data[i + 1],
                    src.data[i + 2],
                    src.data[i + 3],
                ];
                p[3] = ((p[3] as u32 * opacity as u32) / 255) as u8;
                self.set_over(dst_x + sx, dst_y + sy, p);
            }
        }
    }

    /// Blend a coverage mask (e.g. a rasterized glyph) in the given color
    pub fn blend_mask(
        &mut self,
        mask: &[u8],
        mask_w: usize,
        mask_h: usize,
        dst_x: i32,
        dst_y: i32,
        color: Color,
    ) {
        for sy in 0..mask_h {
            for sx in 0..mask_w {
                let coverage = mask[sy * mask_w + sx];
                if coverage == 0 {
                    continue;
                }
                let a = ((color[3] as u32 * coverage as u32) / 255) as u8;
                self.set_over(
                    dst_x + sx as i32,
                    dst_y + sy as i32,
                    [color[0], color[1], color[2], a],
                );
            }
        }
    }

    fn set_over(&mut self, x: i32, y: i32, src: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let sa = src[3] as u32;
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.data[i..i + 4].copy_from_slice(&src);
            return;
        }
        let inv = 255 - sa;
        for ch in 0..3 {
            let d = self.data[i + ch] as u32;
            self.data[i + ch] = ((src[ch] as u32 * sa + d * inv) / 255) as u8;
        }
        let da = self.data[i + 3] as u32;
        self.data[i + 3] = (sa + (da * inv) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const BLUE: Color = [0, 0, 255, 255];

    #[test]
    fn clear_fills_every_pixel() {
        let mut pix = Pixmap::new(4, 3);
        pix.clear(RED);
        assert_eq!(pix.pixel(0, 0), Some(RED));
        assert_eq!(pix.pixel(3, 2), Some(RED));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut pix = Pixmap::new(4, 4);
        pix.clear(BLUE);
        pix.fill_rect(Rect::new(2, 2, 100, 100), RED);
        assert_eq!(pix.pixel(1, 1), Some(BLUE));
        assert_eq!(pix.pixel(2, 2), Some(RED));
        assert_eq!(pix.pixel(3, 3), Some(RED));
    }

    #[test]
    fn negative_coordinates_are_safe() {
        let mut pix = Pixmap::new(4, 4);
        pix.fill_rect(Rect::new(-10, -10, 5, 5), RED);
        // Nothing panics; pixels outside stay untouched, overlap is drawn
        assert!(pix.pixel(-1, -1).is_none());
    }

    #[test]
    fn opaque_blit_replaces_transparent_blend_mixes() {
        let mut pix = Pixmap::new(2, 1);
        pix.clear([0, 0, 0, 255]);

        let mut src = Pixmap::new(2, 1);
        src.clear([255, 255, 255, 255]);
        pix.blit_pixmap(&src, 0, 0, 255);
        assert_eq!(pix.pixel(0, 0), Some([255, 255, 255, 255]));

        let mut pix2 = Pixmap::new(1, 1);
        pix2.clear([0, 0, 0, 255]);
        let mut half = Pixmap::new(1, 1);
        half.clear([255, 255, 255, 255]);
        pix2.blit_pixmap(&half, 0, 0, 128);
        let p = pix2.pixel(0, 0).unwrap();
        // Roughly half-bright gray over black
        assert!(p[0] > 100 && p[0] < 140, "got {:?}", p);
    }

    #[test]
    fn zero_opacity_blit_is_a_noop() {
        let mut pix = Pixmap::new(1, 1);
        pix.clear(BLUE);
        let mut src = Pixmap::new(1, 1);
        src.clear(RED);
        pix.blit_pixmap(&src, 0, 0, 0);
        assert_eq!(pix.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn mask_blend_scales_with_coverage() {
        let mut pix = Pixmap::new(2, 1);
        pix.clear([0, 0, 0, 255]);
        let mask = [255u8, 0u8];
        pix.blend_mask(&mask, 2, 1, 0, 0, [255, 255, 255, 255]);
        assert_eq!(pix.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(pix.pixel(1, 0), Some([0, 0, 0, 255]));
    }
}
