//! PokeMMO PVP Helper
//!
//! An always-on-top overlay that reads both Pokémon names off the battle
//! screen with OCR and shows which attacking types each one is weak to,
//! resists, or is immune to.

// Hide console window on Windows for GUI mode
#![windows_subsystem = "windows"]

mod capture;
mod engine;
mod gui;
mod ocr;
mod paths;
mod reference;
mod tracker;

use anyhow::{anyhow, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use reference::ReferenceData;
use tracker::{Pipeline, ScreenOcr};

const LOG_FILE_NAME: &str = "pokemmo_overlay.log";

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join(LOG_FILE_NAME);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join(LOG_FILE_NAME);
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));
}

fn main() -> Result<()> {
    install_panic_hook();

    // Ensure output directories exist
    paths::ensure_directories()?;

    // Regions in config.json are physical pixels
    capture::enable_dpi_awareness();

    let config = tracker::load_config(&tracker::default_config_path());

    // Bad reference data is fatal: the tracker never starts
    let reference = match ReferenceData::load(
        &paths::get_data_dir(),
        &config.type_chart_file,
        &config.species_file,
    ) {
        Ok(reference) => Arc::new(reference),
        Err(e) => {
            log(&format!("Failed to load reference data: {:#}", e));
            return Err(e);
        }
    };

    // Ensure Tesseract is available (downloads language data if needed)
    let tesseract = match ocr::ensure_tesseract(&config.ocr.language) {
        Ok(paths) => Some(paths),
        Err(e) => {
            log(&format!("Warning: Failed to setup Tesseract: {:#}", e));
            log("Name recognition will fail until Tesseract is installed.");
            None
        }
    };

    let pipeline = Pipeline::new(reference.clone(), &config)?;

    let mut source = ScreenOcr::new(config.ocr.clone(), tesseract);
    if config.save_debug_captures {
        log(&format!(
            "Saving debug captures to {}",
            paths::get_captures_dir().display()
        ));
        source = source.with_debug_captures(paths::get_captures_dir());
    }

    let type_names: Vec<String> = reference
        .chart
        .type_names()
        .into_iter()
        .map(String::from)
        .collect();

    log("Starting overlay...");
    match gui::run_gui(pipeline, source, config, type_names) {
        Ok(()) => {
            log("Overlay exited normally");
            Ok(())
        }
        Err(e) => {
            log(&format!("GUI error: {}", e));
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
