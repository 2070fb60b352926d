use anyhow::{Context, Result};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;
use xcap::Monitor;
use yomu_types::Geometry;

/// Used when no enumerated display contains the pointer (multi-monitor edge
/// cases, stale enumeration). A refresh degrades to this instead of aborting.
pub const FALLBACK_GEOMETRY: Geometry = Geometry {
    left: 0,
    top: 0,
    width: 1920,
    height: 1080,
};

/// Current pointer position in screen coordinates
pub fn cursor_position() -> Result<(i32, i32)> {
    let mut point = POINT::default();
    unsafe {
        GetCursorPos(&mut point).context("Failed to query cursor position")?;
    }
    Ok((point.x, point.y))
}

/// Geometry of the display under the given point.
///
/// First display whose rectangle contains the point (inclusive bounds) wins;
/// enumeration failure or a point on no display falls back to
/// [`FALLBACK_GEOMETRY`] so the refresh pipeline never aborts here.
pub fn resolve_display_at(x: i32, y: i32) -> Geometry {
    let displays = match Monitor::all() {
        Ok(monitors) => monitors
            .iter()
            .map(|m| Geometry {
                left: m.x(),
                top: m.y(),
                width: m.width() as i32,
                height: m.height() as i32,
            })
            .collect::<Vec<_>>(),
        Err(e) => {
            tracing::warn!("monitor enumeration failed: {e}");
            Vec::new()
        }
    };

    pick_display(&displays, x, y)
}

/// Pure selection half of [`resolve_display_at`]
pub fn pick_display(displays: &[Geometry], x: i32, y: i32) -> Geometry {
    match displays.iter().find(|g| g.contains(x, y)) {
        Some(geometry) => *geometry,
        None => {
            tracing::warn!(x, y, "no display contains pointer, using fallback geometry");
            FALLBACK_GEOMETRY
        }
    }
}
