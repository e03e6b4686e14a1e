pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{recognize_image, OcrLine};
pub use preprocess::prepare_for_ocr;
pub use setup::{ensure_tesseract, locate_tesseract, TesseractPaths};

use anyhow::Result;
use image::{ImageBuffer, Luma};

use crate::tracker::config::OcrConfig;

/// Lines below this mean confidence are logged
const LOW_CONFIDENCE: f32 = 50.0;

/// High-level function: preprocessed region → raw text.
///
/// Runs OCR and joins every recognized line with spaces. Confidences only
/// reach the log.
pub fn recognize_text(
    preprocessed: &ImageBuffer<Luma<u8>, Vec<u8>>,
    tesseract: &TesseractPaths,
    config: &OcrConfig,
) -> Result<String> {
    let lines = recognize_image(preprocessed, tesseract, config)?;
    for line in lines.iter().filter(|l| l.confidence < LOW_CONFIDENCE) {
        crate::log(&format!(
            "OCR: low confidence {:.1} for '{}'",
            line.confidence, line.text
        ));
    }
    Ok(join_lines(&lines))
}

fn join_lines(lines: &[OcrLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
