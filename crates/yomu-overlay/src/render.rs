use yomu_types::Rect;

use crate::assets::{NineSlice, OverlayAssets};
use crate::layout;
use crate::pixmap::{Color, Pixmap};
use crate::state::SessionState;
use crate::text;

/// Magenta transparency key; every pixel left at this color is see-through
/// and click-through on the layered window
pub const KEY_COLOR: Color = [255, 0, 255, 255];

const TOOLTIP_PADDING: i32 = 6;
const TOOLTIP_FILL: Color = [255, 255, 255, 255];
const TOOLTIP_OUTLINE: Color = [150, 100, 200, 255];
const PANEL_BG: Color = [0, 0, 0, 255];
const PANEL_BORDER: Color = [255, 255, 255, 255];
const PANEL_TEXT: Color = [255, 255, 255, 255];
const BOX_FALLBACK: Color = [255, 255, 255, 255];

/// Draw one complete frame of the overlay into `canvas`
pub fn render_frame(canvas: &mut Pixmap, assets: &OverlayAssets, state: &SessionState) {
    canvas.clear(KEY_COLOR);

    // Box decorations are constant, not hover-dependent
    for region in state.regions() {
        let rect = region.quad.bounding_rect();
        if rect.is_degenerate() {
            continue;
        }
        draw_nine_slice_frame(canvas, rect, &assets.box_border);
    }

    let tooltip = state.tooltip();
    if tooltip.visible() {
        let sprite = build_tooltip(assets, &tooltip.text);
        canvas.blit_pixmap(&sprite, tooltip.pos.0, tooltip.pos.1, tooltip.alpha);
    }

    if let Some(tx) = state.clicked_translation() {
        draw_detail_panel(canvas, assets, tx);
    }
}

/// Total size of the tooltip sprite for `text`, used for placement before
/// the sprite is built
pub fn tooltip_size(assets: &OverlayAssets, text: &str) -> (i32, i32) {
    let (text_w, text_h) = text::measure_text(&assets.font, assets.font_size, text);
    let (tile_w, tile_h) = assets.tooltip.tile_size();
    // +2 on both axes for the outline pass
    (
        text_w + 2 + TOOLTIP_PADDING * 2 + tile_w * 2,
        text_h + 2 + TOOLTIP_PADDING * 2 + tile_h * 2,
    )
}

/// Hollow nine-slice border around a rectangle: four corners plus tiled
/// edges, no center fill. Rects too small for the tiles fall back to a
/// plain stroke so degenerate detector output still gets a visible box.
fn draw_nine_slice_frame(canvas: &mut Pixmap, rect: Rect, slices: &NineSlice) {
    let (tile_w, tile_h) = slices.tile_size();
    if rect.w < tile_w * 2 || rect.h < tile_h * 2 {
        canvas.stroke_rect(rect, 1, BOX_FALLBACK);
        return;
    }

    let Rect { x, y, w, h } = rect;

    canvas.blit_image(&slices.tl, x, y);
    canvas.blit_image(&slices.tr, x + w - tile_w, y);
    canvas.blit_image(&slices.bl, x, y + h - tile_h);
    canvas.blit_image(&slices.br, x + w - tile_w, y + h - tile_h);

    let mut i = x + tile_w;
    while i < x + w - tile_w {
        let span = (x + w - tile_w - i).min(tile_w);
        canvas.blit_image_clamped(&slices.t, i, y, span, tile_h);
        canvas.blit_image_clamped(&slices.b, i, y + h - tile_h, span, tile_h);
        i += tile_w;
    }

    let mut j = y + tile_h;
    while j < y + h - tile_h {
        let span = (y + h - tile_h - j).min(tile_h);
        canvas.blit_image_clamped(&slices.l, x, j, tile_w, span);
        canvas.blit_image_clamped(&slices.r, x + w - tile_w, j, tile_w, span);
        j += tile_h;
    }
}

/// Compose the tooltip as its own sprite (full nine-slice panel with center
/// fill, plus outlined text) so the whole thing can fade as one unit
fn build_tooltip(assets: &OverlayAssets, text: &str) -> Pixmap {
    let (total_w, total_h) = tooltip_size(assets, text);
    let (tile_w, tile_h) = assets.tooltip.tile_size();
    let slices = &assets.tooltip;

    let mut sprite = Pixmap::new(total_w, total_h);

    let mut j = tile_h;
    while j < total_h - tile_h {
        let span_h = (total_h - tile_h - j).min(tile_h);
        let mut i = tile_w;
        while i < total_w - tile_w {
            let span_w = (total_w - tile_w - i).min(tile_w);
            sprite.blit_image_clamped(&slices.c, i, j, span_w, span_h);
            i += tile_w;
        }
        j += tile_h;
    }

    let mut i = tile_w;
    while i < total_w - tile_w {
        let span = (total_w - tile_w - i).min(tile_w);
        sprite.blit_image_clamped(&slices.t, i, 0, span, tile_h);
        sprite.blit_image_clamped(&slices.b, i, total_h - tile_h, span, tile_h);
        i += tile_w;
    }
    let mut j = tile_h;
    while j < total_h - tile_h {
        let span = (total_h - tile_h - j).min(tile_h);
        sprite.blit_image_clamped(&slices.l, 0, j, tile_w, span);
        sprite.blit_image_clamped(&slices.r, total_w - tile_w, j, tile_w, span);
        j += tile_h;
    }

    sprite.blit_image(&slices.tl, 0, 0);
    sprite.blit_image(&slices.tr, total_w - tile_w, 0);
    sprite.blit_image(&slices.bl, 0, total_h - tile_h);
    sprite.blit_image(&slices.br, total_w - tile_w, total_h - tile_h);

    text::draw_text_outlined(
        &mut sprite,
        &assets.font,
        assets.font_size,
        text,
        tile_w + TOOLTIP_PADDING + 1,
        tile_h + TOOLTIP_PADDING + 1,
        TOOLTIP_FILL,
        TOOLTIP_OUTLINE,
    );

    sprite
}

/// Enlarged word-wrapped panel for the clicked region, bottom-center
fn draw_detail_panel(canvas: &mut Pixmap, assets: &OverlayAssets, translation: &str) {
    let font = &assets.font;
    let px = assets.panel_font_size;
    let content_w = layout::PANEL_WIDTH - layout::PANEL_PADDING * 2;

    let lines = text::wrap_text(
        |s| text::measure_text(font, px, s).0,
        translation,
        content_w,
    );
    if lines.is_empty() {
        return;
    }

    let line_h = text::line_height(font, px);
    let rect = layout::detail_panel_rect(
        (canvas.width(), canvas.height()),
        lines.len() as i32 * line_h,
    );

    canvas.fill_rect(rect, PANEL_BG);
    canvas.stroke_rect(rect, 2, PANEL_BORDER);

    for (i, line) in lines.iter().enumerate() {
        text::draw_text(
            canvas,
            font,
            px,
            line,
            rect.x + layout::PANEL_PADDING,
            rect.y + layout::PANEL_PADDING + i as i32 * line_h,
            PANEL_TEXT,
        );
    }
}
