use yomu_types::Rect;

/// Minimum gap kept between a tooltip and the display edges
pub const TOOLTIP_EDGE_MARGIN: i32 = 5;
/// Vertical offset when the tooltip flips below the pointer
pub const TOOLTIP_BELOW_OFFSET: i32 = 20;

pub const PANEL_WIDTH: i32 = 400;
pub const PANEL_PADDING: i32 = 10;
pub const PANEL_BOTTOM_MARGIN: i32 = 40;

/// Tooltip position for a pointer, clamped and flipped so the tooltip never
/// leaves the display.
///
/// Default anchor is above-and-right of the pointer. The right edge clamps
/// flush with the display minus a margin, the left edge clamps at the margin,
/// and when "above" would go past the top edge the tooltip flips below the
/// pointer instead.
pub fn place_tooltip(
    pointer: (i32, i32),
    tooltip: (i32, i32),
    display: (i32, i32),
) -> (i32, i32) {
    let (px, py) = pointer;
    let (tw, th) = tooltip;
    let (dw, _dh) = display;

    let mut x = px;
    let mut y = py - th;

    if x + tw > dw {
        x = dw - tw - TOOLTIP_EDGE_MARGIN;
    }
    if x < TOOLTIP_EDGE_MARGIN {
        x = TOOLTIP_EDGE_MARGIN;
    }
    if y < 0 {
        y = py + TOOLTIP_BELOW_OFFSET;
    }

    (x, y)
}

/// Detail panel rectangle: fixed width, sized to the wrapped text, anchored
/// near the bottom-center of the display
pub fn detail_panel_rect(display: (i32, i32), text_height: i32) -> Rect {
    let (dw, dh) = display;
    let h = PANEL_PADDING * 2 + text_height;
    Rect::new(
        (dw - PANEL_WIDTH) / 2,
        dh - h - PANEL_BOTTOM_MARGIN,
        PANEL_WIDTH,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY: (i32, i32) = (1920, 1080);

    #[test]
    fn default_anchor_is_above_right_of_pointer() {
        let pos = place_tooltip((500, 500), (200, 80), DISPLAY);
        assert_eq!(pos, (500, 420));
    }

    #[test]
    fn near_top_edge_flips_below_pointer() {
        // Above would put y at 10 - 80 = -70
        let pos = place_tooltip((10, 10), (200, 80), DISPLAY);
        assert_eq!(pos.1, 10 + TOOLTIP_BELOW_OFFSET);
        assert!(pos.1 > 10);
    }

    #[test]
    fn right_edge_clamps_to_margin() {
        let pos = place_tooltip((1910, 500), (200, 80), DISPLAY);
        assert_eq!(pos.0, 1920 - 200 - TOOLTIP_EDGE_MARGIN);
        assert_eq!(pos.0, 1715);
    }

    #[test]
    fn left_edge_clamps_to_margin() {
        // Wide tooltip on a narrow display: right clamp pushes x negative,
        // left clamp catches it
        let pos = place_tooltip((0, 500), (700, 80), (640, 480));
        assert_eq!(pos.0, TOOLTIP_EDGE_MARGIN);
    }

    #[test]
    fn corner_case_applies_both_axes() {
        let pos = place_tooltip((1915, 5), (200, 80), DISPLAY);
        assert_eq!(pos, (1715, 5 + TOOLTIP_BELOW_OFFSET));
    }

    #[test]
    fn panel_is_bottom_centered_and_sized_to_text() {
        let r = detail_panel_rect(DISPLAY, 100);
        assert_eq!(r.w, PANEL_WIDTH);
        assert_eq!(r.h, 100 + 2 * PANEL_PADDING);
        assert_eq!(r.x, (1920 - PANEL_WIDTH) / 2);
        assert_eq!(r.y + r.h, 1080 - PANEL_BOTTOM_MARGIN);
    }
}
