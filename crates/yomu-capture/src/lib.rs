mod capture;
mod display;
mod hotkey;

pub use capture::capture_display_png;
pub use display::{cursor_position, pick_display, resolve_display_at, FALLBACK_GEOMETRY};
pub use hotkey::{HotkeyAction, HotkeyManager};
