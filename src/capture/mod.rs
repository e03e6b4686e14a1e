//! Screen capture for the fixed name regions.
//!
//! This module provides:
//! - Region capture (`capture_region`)
//! - Primary screen size lookup for window placement (`primary_screen_size`)
//! - Process DPI awareness (`enable_dpi_awareness`)

pub mod screen;

pub use screen::{capture_region, enable_dpi_awareness, primary_screen_size};
