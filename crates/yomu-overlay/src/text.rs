use fontdue::Font;

use crate::pixmap::{Color, Pixmap};

/// Advance-sum width and line height of a single line
pub fn measure_text(font: &Font, px: f32, text: &str) -> (i32, i32) {
    let width: f32 = text
        .chars()
        .map(|c| font.metrics(c, px).advance_width)
        .sum();
    (width.ceil() as i32, line_height(font, px))
}

pub fn line_height(font: &Font, px: f32) -> i32 {
    font.horizontal_line_metrics(px)
        .map(|m| m.new_line_size.ceil() as i32)
        .unwrap_or_else(|| px.ceil() as i32)
}

/// Draw one line with its top-left corner at (x, y)
pub fn draw_text(pix: &mut Pixmap, font: &Font, px: f32, text: &str, x: i32, y: i32, color: Color) {
    let ascent = font
        .horizontal_line_metrics(px)
        .map(|m| m.ascent)
        .unwrap_or(px);
    let baseline = y + ascent.ceil() as i32;

    let mut pen_x = x as f32;
    for c in text.chars() {
        let (metrics, bitmap) = font.rasterize(c, px);
        let gx = pen_x as i32 + metrics.xmin;
        let gy = baseline - metrics.ymin - metrics.height as i32;
        pix.blend_mask(&bitmap, metrics.width, metrics.height, gx, gy, color);
        pen_x += metrics.advance_width;
    }
}

/// Fill text over a 1 px outline in all eight directions
pub fn draw_text_outlined(
    pix: &mut Pixmap,
    font: &Font,
    px: f32,
    text: &str,
    x: i32,
    y: i32,
    fill: Color,
    outline: Color,
) {
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx != 0 || dy != 0 {
                draw_text(pix, font, px, text, x + dx, y + dy, outline);
            }
        }
    }
    draw_text(pix, font, px, text, x, y, fill);
}

/// Greedy word wrap, breaking on whitespace only.
///
/// Takes a width-measuring closure rather than a font so layout stays
/// testable without font assets. A single word wider than `max_width` gets
/// its own line; it is never split mid-word.
pub fn wrap_text(measure: impl Fn(&str) -> i32, text: &str, max_width: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10 px per character, like a fixed-width font
    fn measure(s: &str) -> i32 {
        s.chars().count() as i32 * 10
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text(measure, "hello world", 200), vec!["hello world"]);
    }

    #[test]
    fn wraps_only_on_whitespace() {
        let lines = wrap_text(measure, "one two three four", 80);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        for line in &lines {
            assert!(measure(line) <= 80);
        }
    }

    #[test]
    fn overlong_word_gets_its_own_line_unsplit() {
        let lines = wrap_text(measure, "a extraordinarily b", 50);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn empty_text_produces_no_lines() {
        assert!(wrap_text(measure, "", 100).is_empty());
        assert!(wrap_text(measure, "   ", 100).is_empty());
    }
}
