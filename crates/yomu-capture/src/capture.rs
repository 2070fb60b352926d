use anyhow::{Context, Result};
use xcap::Monitor;
use yomu_types::Geometry;

/// Capture the display described by `geometry`, returning PNG bytes.
///
/// The monitor is matched by its origin; a geometry that no longer matches any
/// monitor (hotplug between resolve and capture) is an error, which aborts the
/// current refresh cycle and leaves any existing overlay untouched.
pub fn capture_display_png(geometry: Geometry) -> Result<Vec<u8>> {
    let monitors = Monitor::all().context("Failed to enumerate monitors")?;

    let monitor = monitors
        .into_iter()
        .find(|m| m.x() == geometry.left && m.y() == geometry.top)
        .context("No monitor matches the resolved geometry")?;

    let image = monitor
        .capture_image()
        .context("Failed to capture display")?;

    encode_png(&image)
}

fn encode_png(image: &xcap::image::RgbaImage) -> Result<Vec<u8>> {
    use xcap::image::ImageEncoder;
    let mut buffer = Vec::new();
    xcap::image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            xcap::image::ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}
