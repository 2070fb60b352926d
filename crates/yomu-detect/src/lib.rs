mod com;
mod ocr;

pub use com::ComGuard;
pub use ocr::{detect_regions, init_ocr_engine};
