use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yomu_lang_japanese::{JapaneseTranslator, ScriptFilter};
use yomu_overlay::OverlaySurface;
use yomu_types::AppEvent;

use crate::state::AppState;

pub mod refresh;

use refresh::handle_refresh;

/// App's main loop: owns the overlay surface and reacts to hotkey events
/// until cancelled
pub async fn event_loop(
    state: Arc<AppState>,
    event_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    // Initialize translator
    let translator = {
        let config = state.config.read().await;
        if config.translator.enabled && !config.translator.api_key.is_empty() {
            Some(JapaneseTranslator::new(
                config.translator.api_key.clone(),
                config.translator.api_url.clone(),
            ))
        } else {
            tracing::warn!("Translator disabled or missing API key; boxes only, no tooltips");
            None
        }
    };

    let (filter, mut overlay) = {
        let config = state.config.read().await;
        (
            ScriptFilter::new(
                config.detection.min_script_chars,
                config.detection.min_script_ratio,
            ),
            OverlaySurface::new(config.overlay.clone()),
        )
    };

    tracing::info!("Event loop started, waiting for hotkeys");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                if let Err(e) = overlay.hide() {
                    tracing::warn!("Failed to hide overlay on shutdown: {e}");
                }
                return Ok(());
            }
            event = event_rx.recv() => event?,
        };

        handle_event(&state, translator.as_ref(), &filter, &mut overlay, event).await;
    }
}

/// A failed refresh or hide must not take the loop down; log and wait for
/// the next hotkey
async fn handle_event(
    state: &AppState,
    translator: Option<&JapaneseTranslator>,
    filter: &ScriptFilter,
    overlay: &mut OverlaySurface,
    event: AppEvent,
) {
    match event {
        AppEvent::RefreshOverlay => {
            if let Err(e) = handle_refresh(state, translator, filter, overlay).await {
                tracing::error!("Refresh failed: {e:#}");
            }
        }
        AppEvent::HideOverlay => {
            if let Err(e) = overlay.hide() {
                tracing::error!("Hide failed: {e}");
            }
        }
    }
}
