//! Species type table: species name → its 1-2 types.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;

use super::type_chart::TypeChart;

/// Maximum number of types a species can carry.
const MAX_TYPES: usize = 2;

#[derive(Clone, Debug, Default)]
pub struct SpeciesTable {
    species: HashMap<String, Vec<String>>,
}

impl SpeciesTable {
    /// Builds a table and checks every entry against the type chart.
    pub fn new(species: HashMap<String, Vec<String>>, chart: &TypeChart) -> Result<Self> {
        let table = Self { species };
        table.validate(chart)?;
        Ok(table)
    }

    pub fn from_json_str(json: &str, chart: &TypeChart) -> Result<Self> {
        let species: HashMap<String, Vec<String>> =
            serde_json::from_str(json).context("Malformed species table JSON")?;
        Self::new(species, chart)
    }

    pub fn load(path: &Path, chart: &TypeChart) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read species table {}", path.display()))?;
        Self::from_json_str(&contents, chart)
            .with_context(|| format!("Invalid species table {}", path.display()))
    }

    fn validate(&self, chart: &TypeChart) -> Result<()> {
        let mut names: Vec<&String> = self.species.keys().collect();
        names.sort();

        for name in names {
            let types = &self.species[name];
            if types.len() > MAX_TYPES {
                return Err(anyhow!(
                    "Species '{}' has {} types (at most {} allowed)",
                    name,
                    types.len(),
                    MAX_TYPES
                ));
            }
            if types.is_empty() {
                crate::log(&format!(
                    "Warning: species '{}' has no types and will show no effectiveness",
                    name
                ));
            }
            for type_name in types {
                if !chart.contains(type_name) {
                    return Err(anyhow!(
                        "Species '{}' has unknown type '{}'",
                        name,
                        type_name
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns the types of a species, or an empty slice if it is unknown.
    pub fn types_of(&self, name: &str) -> &[String] {
        self.species.get(name).map(|t| t.as_slice()).unwrap_or(&[])
    }

    /// The recognized name set, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.species.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> TypeChart {
        TypeChart::from_json_str(
            r#"{ "Fire": {}, "Flying": {}, "Electric": {}, "Normal": {} }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_types_of_known_and_unknown() {
        let table = SpeciesTable::from_json_str(
            r#"{ "Charizard": ["Fire", "Flying"], "Pikachu": ["Electric"] }"#,
            &chart(),
        )
        .unwrap();

        assert_eq!(table.types_of("Charizard"), ["Fire", "Flying"]);
        assert_eq!(table.types_of("Pikachu"), ["Electric"]);
        assert!(table.types_of("Missingno").is_empty());
        assert_eq!(table.names(), vec!["Charizard", "Pikachu"]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = SpeciesTable::from_json_str(r#"{ "Bulbasaur": ["Grass"] }"#, &chart())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("'Grass'"));
    }

    #[test]
    fn test_three_types_is_rejected() {
        let result = SpeciesTable::from_json_str(
            r#"{ "Oddity": ["Fire", "Flying", "Normal"] }"#,
            &chart(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_type_list_is_accepted() {
        let table = SpeciesTable::from_json_str(r#"{ "Unown": [] }"#, &chart()).unwrap();
        assert_eq!(table.names(), vec!["Unown".to_string()]);
        assert!(table.types_of("Unown").is_empty());
    }

    #[test]
    fn test_bundled_table_is_valid() {
        let chart = TypeChart::from_json_str(include_str!("../../data/type_chart.json")).unwrap();
        let table =
            SpeciesTable::from_json_str(include_str!("../../data/pokemon_types.json"), &chart)
                .unwrap();
        assert_eq!(table.len(), 649);
        assert_eq!(table.types_of("Charizard"), ["Fire", "Flying"]);
        assert_eq!(table.types_of("Pikachu"), ["Electric"]);

        // Neighbours that differ by a few letters keep their own typings
        assert_eq!(table.types_of("Azurill"), ["Normal", "Fairy"]);
        assert_eq!(table.types_of("Azumarill"), ["Water", "Fairy"]);
        assert_eq!(table.types_of("Scrafty"), ["Dark", "Fighting"]);
        assert_eq!(table.types_of("Scraggy"), ["Dark", "Fighting"]);
        assert_eq!(table.types_of("Heatran"), ["Fire", "Steel"]);
        assert_eq!(table.types_of("Heatmor"), ["Fire"]);
        assert_eq!(table.types_of("Amoonguss"), ["Grass", "Poison"]);
        assert_eq!(table.types_of("Foongus"), ["Grass", "Poison"]);
        assert_eq!(table.types_of("Genesect"), ["Bug", "Steel"]);
    }
}
