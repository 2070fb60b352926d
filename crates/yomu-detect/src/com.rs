use anyhow::{Context, Result};

/// RAII guard for COM initialization on blocking threads.
///
/// The OCR pipeline runs on `spawn_blocking` threads that are not guaranteed
/// to have COM initialized; the guard pairs every `CoInitializeEx` with a
/// `CoUninitialize`, panic or not.
pub struct ComGuard;

impl ComGuard {
    pub fn initialize() -> Result<Self> {
        unsafe {
            windows::Win32::System::Com::CoInitializeEx(
                Some(std::ptr::null()),
                windows::Win32::System::Com::COINIT_MULTITHREADED,
            )
            .ok()
            .context("Failed to initialize COM")?;
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            windows::Win32::System::Com::CoUninitialize();
        }
    }
}
