use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use yomu_config::overlay::OverlayConfig;
use yomu_types::{Geometry, TextRegion};

use crate::assets::OverlayAssets;
use crate::pixmap::Pixmap;
use crate::state::{FrameInput, SessionState};
use crate::window::OverlayWindow;
use crate::{OverlayError, OverlayResult, layout, render};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Commands the frame loop accepts between frames
pub enum OverlayCommand {
    /// Replace the displayed regions, repositioning the window when the
    /// target display changed
    Refresh {
        geometry: Geometry,
        regions: Vec<TextRegion>,
    },
    /// Tear the window down and exit the loop
    Hide,
}

struct RunningLoop {
    tx: kanal::Sender<OverlayCommand>,
    stop: Arc<AtomicBool>,
    exit_rx: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

/// Handle to the overlay actor.
///
/// `show` spawns the frame loop thread on first use and reuses it for
/// subsequent refreshes; `hide` requests a stop and waits (bounded) for the
/// loop to acknowledge its exit. All methods are safe to call in any state;
/// hiding a hidden overlay is a no-op.
pub struct OverlaySurface {
    config: OverlayConfig,
    inner: Option<RunningLoop>,
}

impl OverlaySurface {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            inner: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Show the overlay on `geometry` with `regions`, starting the frame
    /// loop if it is not already running
    pub fn show(&mut self, geometry: Geometry, regions: Vec<TextRegion>) -> OverlayResult<()> {
        // A finished loop (window destroyed externally, panic) leaves a
        // stale handle behind; reap it so we start fresh
        if self
            .inner
            .as_ref()
            .is_some_and(|running| running.handle.is_finished())
        {
            debug!("reaping finished overlay loop before restart");
            self.teardown();
        }

        if let Some(running) = &self.inner {
            return running
                .tx
                .send(OverlayCommand::Refresh { geometry, regions })
                .map_err(|_| OverlayError::ChannelClosed);
        }

        // Load assets on the caller's thread so a missing font or tile set
        // fails the show() call directly instead of a startup ack
        let assets = OverlayAssets::load(&self.config)?;

        let (tx, rx) = kanal::bounded::<OverlayCommand>(4);
        // Acks go over std mpsc for its bounded recv_timeout
        let (ready_tx, ready_rx) = mpsc::sync_channel::<OverlayResult<()>>(1);
        let (exit_tx, exit_rx) = mpsc::sync_channel::<()>(1);
        let stop = Arc::new(AtomicBool::new(false));

        let fps = self.config.fps.max(1);
        let loop_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            run_loop(
                fps, assets, geometry, regions, rx, loop_stop, ready_tx, exit_tx,
            );
        });

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => {
                info!(
                    left = geometry.left,
                    top = geometry.top,
                    width = geometry.width,
                    height = geometry.height,
                    "overlay loop started"
                );
                self.inner = Some(RunningLoop {
                    tx,
                    stop,
                    exit_rx,
                    handle,
                });
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                stop.store(true, Ordering::Relaxed);
                Err(OverlayError::StartupTimeout(STARTUP_TIMEOUT))
            }
        }
    }

    /// Replace the displayed regions. Same as [`show`](Self::show): starting
    /// and refreshing share one idempotent entry point.
    pub fn update_data(
        &mut self,
        geometry: Geometry,
        regions: Vec<TextRegion>,
    ) -> OverlayResult<()> {
        self.show(geometry, regions)
    }

    /// Stop the frame loop and destroy the window. Idempotent.
    pub fn hide(&mut self) -> OverlayResult<()> {
        let Some(running) = self.inner.take() else {
            return Ok(());
        };

        running.stop.store(true, Ordering::Relaxed);
        // Best-effort wakeup; the stop flag alone suffices within a frame
        let _ = running.tx.try_send(OverlayCommand::Hide);

        let timeout = Duration::from_millis(self.config.stop_timeout_ms);
        match running.exit_rx.recv_timeout(timeout) {
            Ok(()) => {
                let _ = running.handle.join();
                info!("overlay loop stopped");
                Ok(())
            }
            Err(_) => {
                warn!(?timeout, "overlay loop did not acknowledge stop");
                Err(OverlayError::StopTimeout(timeout))
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(running) = self.inner.take() {
            running.stop.store(true, Ordering::Relaxed);
            let _ = running.handle.join();
        }
    }
}

impl Drop for OverlaySurface {
    fn drop(&mut self) {
        if self.inner.is_some() {
            let _ = self.hide();
        }
    }
}

/// The frame loop body, run on its own thread which exclusively owns the
/// window, the canvas and the session state
#[allow(clippy::too_many_arguments)]
fn run_loop(
    fps: u32,
    assets: OverlayAssets,
    geometry: Geometry,
    regions: Vec<TextRegion>,
    rx: kanal::Receiver<OverlayCommand>,
    stop: Arc<AtomicBool>,
    ready_tx: mpsc::SyncSender<OverlayResult<()>>,
    exit_tx: mpsc::SyncSender<()>,
) {
    let mut window = match OverlayWindow::new(geometry) {
        Ok(w) => {
            let _ = ready_tx.send(Ok(()));
            w
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    let mut state = SessionState::new(regions);
    let mut canvas = Pixmap::new(geometry.width.max(1), geometry.height.max(1));
    window.set_click_through(state.region_count() == 0);
    let frame_budget = Duration::from_millis(1000 / fps as u64);

    'frames: while !stop.load(Ordering::Relaxed) {
        let frame_start = Instant::now();

        loop {
            match rx.try_recv() {
                Ok(Some(OverlayCommand::Refresh { geometry, regions })) => {
                    if geometry != window.geometry() {
                        if let Err(e) = window.reposition(geometry) {
                            warn!(error = %e, "failed to reposition overlay window");
                        }
                        canvas = Pixmap::new(geometry.width.max(1), geometry.height.max(1));
                    }
                    debug!(regions = regions.len(), "overlay regions replaced");
                    state.replace_regions(regions);
                    // With nothing to hover or click, let input fall through
                    window.set_click_through(state.region_count() == 0);
                }
                Ok(Some(OverlayCommand::Hide)) => break 'frames,
                Ok(None) => break,
                // All senders dropped: treat as hide
                Err(_) => break 'frames,
            }
        }

        let outcome = window.pump();
        if outcome.quit {
            debug!("overlay window received quit");
            break;
        }

        let input = FrameInput {
            pointer: window.cursor_pos(),
            presses: outcome.presses,
        };
        let display = (canvas.width(), canvas.height());
        state.advance(&input, |text, pointer| {
            layout::place_tooltip(pointer, render::tooltip_size(&assets, text), display)
        });

        render::render_frame(&mut canvas, &assets, &state);
        window.present(&canvas);

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    drop(window);
    let _ = exit_tx.send(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hide_without_show_is_ok_and_idempotent() {
        let mut surface = OverlaySurface::new(OverlayConfig::default());
        assert!(!surface.is_running());
        assert!(surface.hide().is_ok());
        assert!(surface.hide().is_ok());
        assert!(!surface.is_running());
    }
}
