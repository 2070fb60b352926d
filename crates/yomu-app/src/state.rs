use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use windows::Media::Ocr::OcrEngine;
use yomu_config::Config;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub ocr_engine: OcrEngine,
    pub refresh_gate: RefreshGate,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ocr_engine = yomu_detect::init_ocr_engine(&config.detection.language)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            ocr_engine,
            refresh_gate: RefreshGate::new(),
        })
    }
}

/// Single-flight gate for overlay refreshes.
///
/// A refresh that arrives while a previous one is still capturing or
/// translating is dropped rather than queued; the in-flight refresh already
/// reflects a newer screen than any queued one would.
pub struct RefreshGate(AtomicBool);

impl RefreshGate {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Returns a permit if no refresh is in flight; the permit releases the
    /// gate when dropped, on success and error paths alike
    pub fn try_acquire(&self) -> Option<RefreshPermit<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RefreshPermit(&self.0))
    }
}

pub struct RefreshPermit<'a>(&'a AtomicBool);

impl Drop for RefreshPermit<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
