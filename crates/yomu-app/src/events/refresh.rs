use yomu_capture::{capture_display_png, cursor_position, resolve_display_at};
use yomu_detect::{ComGuard, detect_regions};
use yomu_lang_japanese::{JapaneseTranslator, ScriptFilter};
use yomu_overlay::OverlaySurface;
use yomu_translate::translate_all;
use yomu_types::TextRegion;

use crate::state::AppState;

/// One full refresh: locate the pointer's display, capture it, detect and
/// filter Japanese text, translate, and hand the regions to the overlay
pub async fn handle_refresh(
    state: &AppState,
    translator: Option<&JapaneseTranslator>,
    filter: &ScriptFilter,
    overlay: &mut OverlaySurface,
) -> anyhow::Result<()> {
    let Some(_permit) = state.refresh_gate.try_acquire() else {
        tracing::debug!("Refresh already in flight, dropping this one");
        return Ok(());
    };

    let (x, y) = cursor_position().unwrap_or_else(|e| {
        tracing::warn!("Failed to read cursor position: {e:#}");
        (0, 0)
    });
    let geometry = resolve_display_at(x, y);

    let engine = state.ocr_engine.clone();
    let regions = tokio::task::spawn_blocking(move || {
        let _com = ComGuard::initialize()?;
        let image = capture_display_png(geometry)?;
        detect_regions(&engine, &image)
    })
    .await??;

    let detected = regions.len();
    let mut regions: Vec<TextRegion> = regions
        .into_iter()
        .filter(|r| filter.matches(&r.text))
        .collect();
    tracing::debug!(detected, kept = regions.len(), "detection filtered");

    if regions.is_empty() {
        tracing::info!("No Japanese text found on screen");
        return Ok(());
    }

    if let Some(t) = translator {
        let (from, to) = {
            let config = state.config.read().await;
            (
                config.translator.from_lang.clone(),
                config.translator.to_lang.clone(),
            )
        };

        let texts: Vec<String> = regions.iter().map(|r| r.text.clone()).collect();
        let translations = translate_all(t, &texts, &from, &to).await;
        for (region, translation) in regions.iter_mut().zip(translations) {
            region.translation = Some(translation);
        }
    }

    let shown = regions.len();
    overlay.show(geometry, regions)?;
    tracing::info!(regions = shown, "Overlay refreshed");

    Ok(())
}
