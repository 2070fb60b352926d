use std::time::Duration;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use yomu_capture::{HotkeyAction, HotkeyManager};
use yomu_types::AppEvent;

/// Polls the global hotkeys on a blocking thread and forwards presses to the
/// event loop as [`AppEvent`]s
pub async fn watcher_io(
    poll_interval: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let listener = tokio::task::spawn_blocking(move || {
        let hotkey_manager = match HotkeyManager::new() {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to register hotkeys: {e:#}");
                return;
            }
        };

        tracing::info!("Hotkeys registered (F8 show/refresh, F9 hide)");

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if let Some(action) = hotkey_manager.poll() {
                let event = match action {
                    HotkeyAction::Refresh => AppEvent::RefreshOverlay,
                    HotkeyAction::Hide => AppEvent::HideOverlay,
                };
                tracing::info!("Hotkey pressed: {action:?}");

                let tx = event_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = tx.send(event).await {
                        tracing::error!("Failed to forward hotkey event: {e}");
                    }
                });
            }

            std::thread::sleep(poll_interval);
        }

        tracing::info!("Hotkey listener stopping");
    });

    listener.await?;
    Ok(())
}
