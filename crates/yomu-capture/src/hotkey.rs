use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey},
};

/// What a hotkey press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// F8: show the overlay, or refresh it if already visible
    Refresh,
    /// F9: hide the overlay
    Hide,
}

/// Registers the two global hotkeys and maps incoming events back to actions
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    refresh: HotKey,
    hide: HotKey,
}

impl HotkeyManager {
    /// F8 = show/refresh, F9 = hide
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        let refresh = HotKey::new(None, Code::F8);
        let hide = HotKey::new(None, Code::F9);

        manager
            .register(refresh)
            .context("Failed to register refresh hotkey")?;
        manager
            .register(hide)
            .context("Failed to register hide hotkey")?;

        Ok(Self {
            manager,
            refresh,
            hide,
        })
    }

    /// Check for a pending hotkey press (non-blocking)
    pub fn poll(&self) -> Option<HotkeyAction> {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            // Key-up events arrive too; only presses act
            if event.state != HotKeyState::Pressed {
                continue;
            }
            if event.id == self.refresh.id() {
                return Some(HotkeyAction::Refresh);
            }
            if event.id == self.hide.id() {
                return Some(HotkeyAction::Hide);
            }
        }
        None
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.refresh);
        let _ = self.manager.unregister(self.hide);
    }
}
