//! On-screen text source: GDI capture → preprocessing → Tesseract.

use anyhow::{Context, Result};
use chrono::Local;
use image::{ImageBuffer, Luma, Rgba};
use std::path::{Path, PathBuf};

use crate::capture::capture_region;
use crate::ocr::{locate_tesseract, prepare_for_ocr, recognize_text, TesseractPaths};
use crate::tracker::config::{OcrConfig, ScreenRect};
use crate::tracker::side::Side;

/// Reads a species name plate straight from the screen.
pub struct ScreenOcr {
    config: OcrConfig,
    tesseract: Option<TesseractPaths>,
    debug_dir: Option<PathBuf>,
}

impl ScreenOcr {
    /// `tesseract` may be `None` when setup failed at startup; the source
    /// then retries locating it on each capture.
    pub fn new(config: OcrConfig, tesseract: Option<TesseractPaths>) -> Self {
        Self {
            config,
            tesseract,
            debug_dir: None,
        }
    }

    /// Saves raw and preprocessed captures into `dir` on every capture.
    pub fn with_debug_captures(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    fn tesseract(&mut self) -> Result<&TesseractPaths> {
        if self.tesseract.is_none() {
            let paths = locate_tesseract(&self.config.language)
                .context("Tesseract is not available")?;
            crate::log(&format!(
                "Tesseract located: {}",
                paths.executable.display()
            ));
            self.tesseract = Some(paths);
        }
        self.tesseract
            .as_ref()
            .context("Tesseract is not available")
    }
}

impl super::pipeline::TextSource for ScreenOcr {
    fn capture_text(&mut self, side: Side, region: &ScreenRect) -> Result<String> {
        let captured = capture_region(region)
            .with_context(|| format!("Failed to capture {} region", side))?;
        let preprocessed = prepare_for_ocr(&captured, self.config.scale, self.config.threshold);

        if let Some(dir) = &self.debug_dir {
            if let Err(e) = save_debug_pair(dir, side, &captured, &preprocessed) {
                crate::log(&format!("Failed to save debug capture: {}", e));
            }
        }

        let config = self.config.clone();
        let tesseract = self.tesseract()?;
        recognize_text(&preprocessed, tesseract, &config)
    }
}

/// Writes `<timestamp>_<side>_raw.png` and `<timestamp>_<side>_ocr.png`.
fn save_debug_pair(
    dir: &Path,
    side: Side,
    raw: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    preprocessed: &ImageBuffer<Luma<u8>, Vec<u8>>,
) -> Result<()> {
    let stem = format!("{}_{}", Local::now().format("%Y%m%d_%H%M%S%.3f"), side.key());
    let raw_path = dir.join(format!("{}_raw.png", stem));
    let ocr_path = dir.join(format!("{}_ocr.png", stem));

    raw.save(&raw_path)
        .with_context(|| format!("Failed to save {}", raw_path.display()))?;
    preprocessed
        .save(&ocr_path)
        .with_context(|| format!("Failed to save {}", ocr_path.display()))?;
    Ok(())
}
