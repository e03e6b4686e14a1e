//! Pure computations over the reference tables.
//!
//! This module provides:
//! - Combined type effectiveness (`effectiveness`)
//! - OCR name cleanup and fuzzy matching (`NameResolver`)
//! - The string similarity ratio used for matching (`similarity`)

pub mod effectiveness;
pub mod resolver;
pub mod similarity;

pub use effectiveness::{effectiveness, Effectiveness};
pub use resolver::NameResolver;
