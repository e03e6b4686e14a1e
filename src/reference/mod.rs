//! Static reference tables loaded once at startup.
//!
//! This module provides:
//! - The type chart (`TypeChart`)
//! - The species type table (`SpeciesTable`)
//! - `ReferenceData`, the immutable context both are threaded through

pub mod species;
pub mod type_chart;

pub use species::SpeciesTable;
pub use type_chart::{TypeChart, TypeRelations};

use anyhow::Result;
use std::path::Path;

/// Both reference tables, validated against each other.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub chart: TypeChart,
    pub species: SpeciesTable,
}

impl ReferenceData {
    /// Loads the chart and species table from `data_dir`.
    ///
    /// Any failure here is fatal: the tracker must not start without tables.
    pub fn load(data_dir: &Path, chart_file: &str, species_file: &str) -> Result<Self> {
        let chart = TypeChart::load(&data_dir.join(chart_file))?;
        let species = SpeciesTable::load(&data_dir.join(species_file), &chart)?;

        crate::log(&format!(
            "Reference data loaded: {} types, {} species",
            chart.len(),
            species.len()
        ));

        Ok(Self { chart, species })
    }
}
