use anyhow::{anyhow, Result};
use image::{ImageBuffer, Luma};
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::TesseractPaths;
use crate::tracker::config::OcrConfig;

/// Represents a line of OCR text with its mean word confidence
#[derive(Debug, Clone)]
pub struct OcrLine {
    pub text: String,
    pub confidence: f32,
}

struct OcrWord {
    text: String,
    confidence: f32,
}

/// Runs Tesseract on a preprocessed grayscale image.
/// Returns structured output with lines and confidence scores.
pub fn recognize_image(
    img: &ImageBuffer<Luma<u8>, Vec<u8>>,
    tesseract: &TesseractPaths,
    config: &OcrConfig,
) -> Result<Vec<OcrLine>> {
    // Save image to temporary file
    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())?;

    // Create temporary output file (Tesseract adds .tsv extension)
    let temp_output = NamedTempFile::new()?;
    let output_base = temp_output.path().to_string_lossy().to_string();

    let mut command = Command::new(&tesseract.executable);
    command.arg(temp_input.path()).arg(&output_base);
    if let Some(tessdata) = &tesseract.tessdata {
        command.arg("--tessdata-dir").arg(tessdata);
    }
    let output = command
        .arg("-l")
        .arg(&config.language)
        .arg("--psm")
        .arg(config.psm.to_string())
        .arg("tsv")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr));
    }

    let tsv_path = format!("{}.tsv", output_base);
    let tsv_content = std::fs::read_to_string(&tsv_path)
        .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;

    let _ = std::fs::remove_file(&tsv_path);

    Ok(parse_tsv_output(&tsv_content))
}

fn finish_line(words: Vec<OcrWord>, lines: &mut Vec<OcrLine>) {
    if words.is_empty() {
        return;
    }
    let confidence = words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;
    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(OcrLine { text, confidence });
}

/// Parses Tesseract TSV output into structured OcrLine data
fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut lines: Vec<OcrLine> = Vec::new();
    let mut current_line: Option<(i32, i32, i32)> = None;
    let mut current_words: Vec<OcrWord> = Vec::new();

    // Skip header
    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let level: i32 = fields[0].parse().unwrap_or(-1);
        let block_num: i32 = fields[2].parse().unwrap_or(-1);
        let par_num: i32 = fields[3].parse().unwrap_or(-1);
        let line_num: i32 = fields[4].parse().unwrap_or(-1);
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        let text = fields[11].trim();

        // Level 5 = word
        if level != 5 || text.is_empty() || conf < 0.0 {
            continue;
        }

        let key = (block_num, par_num, line_num);
        if current_line != Some(key) {
            finish_line(std::mem::take(&mut current_words), &mut lines);
            current_line = Some(key);
        }

        current_words.push(OcrWord {
            text: text.to_string(),
            confidence: conf,
        });
    }

    finish_line(current_words, &mut lines);

    lines
}
