//! The refresh cycle that ties capture, OCR, and the engine together.
//!
//! This module provides:
//! - Configuration loaded from config.json (`TrackerConfig`)
//! - The per-side pipeline and its collaborator traits (`TextSource`, `SideSink`)
//! - The on-screen OCR text source (`ScreenOcr`)
//! - The background refresh loop (`start_tracker`)

pub mod config;
pub mod pipeline;
pub mod runner;
pub mod side;
pub mod source;

pub use config::{default_config_path, load_config, TrackerConfig};
pub use pipeline::{Pipeline, SideSink, TextSource};
pub use runner::{start_tracker, TrackerHandle};
pub use side::{Side, SideUpdate};
pub use source::ScreenOcr;
