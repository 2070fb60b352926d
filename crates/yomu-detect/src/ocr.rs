use anyhow::{Context, Result};
use windows::{
    Globalization::Language,
    Graphics::Imaging::BitmapDecoder,
    Media::Ocr::OcrEngine,
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    core::HSTRING,
};
use yomu_types::{Quad, TextRegion};

/// Create an OCR engine for the given BCP-47 language tag (e.g. "ja").
///
/// Fails when the language pack is not installed; that is startup-fatal for
/// the app, there is nothing to degrade to.
pub fn init_ocr_engine(language_code: &str) -> Result<OcrEngine> {
    let language = Language::CreateLanguage(&HSTRING::from(language_code))
        .context("Failed to create language")?;

    OcrEngine::TryCreateFromLanguage(&language)
        .context("Failed to create OCR engine for language")
}

/// Recognize text in a PNG image, one region per recognized line.
///
/// The quad of each region is the axis-aligned union of the line's word
/// bounding boxes, expressed as four corner points. Windows.Media.Ocr does
/// not report per-line confidence, so every region carries 1.0. An empty
/// result is a valid "nothing found", not an error.
///
/// Blocking; run on a `spawn_blocking` thread with COM initialized.
pub fn detect_regions(engine: &OcrEngine, image_bytes: &[u8]) -> Result<Vec<TextRegion>> {
    let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
    let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

    writer
        .WriteBytes(image_bytes)
        .context("Failed to write image bytes")?;
    writer
        .StoreAsync()
        .context("Failed to store async")?
        .get()
        .context("Failed to store data")?;
    writer.FlushAsync().context("Failed to flush")?.get()?;

    stream.Seek(0).context("Failed to seek")?;

    let decoder = BitmapDecoder::CreateAsync(&stream)
        .context("Failed to create decoder")?
        .get()
        .context("Failed to decode image")?;

    let bitmap = decoder
        .GetSoftwareBitmapAsync()
        .context("Failed to get bitmap")?
        .get()
        .context("Failed to get software bitmap")?;

    let result = engine
        .RecognizeAsync(&bitmap)
        .context("Failed to start recognition")?
        .get()
        .context("Failed to get OCR result")?;

    let mut regions = Vec::new();
    for line in result.Lines().context("Failed to get OCR lines")? {
        let text = line.Text().context("Failed to get line text")?.to_string();
        if text.trim().is_empty() {
            continue;
        }

        let Some(quad) = line_quad(&line)? else {
            tracing::trace!("skipping OCR line without word geometry");
            continue;
        };

        regions.push(TextRegion::new(quad, text, 1.0));
    }

    tracing::debug!(lines = regions.len(), "OCR recognition finished");
    Ok(regions)
}

fn line_quad(line: &windows::Media::Ocr::OcrLine) -> Result<Option<Quad>> {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    let mut any = false;

    for word in line.Words().context("Failed to get line words")? {
        let rect = word.BoundingRect().context("Failed to get word rect")?;
        min_x = min_x.min(rect.X);
        min_y = min_y.min(rect.Y);
        max_x = max_x.max(rect.X + rect.Width);
        max_y = max_y.max(rect.Y + rect.Height);
        any = true;
    }

    if !any {
        return Ok(None);
    }

    Ok(Some(Quad::from_rect(
        min_x,
        min_y,
        max_x - min_x,
        max_y - min_y,
    )))
}
