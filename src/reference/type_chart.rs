//! Type chart: per defending type, which attacking types deal double, half,
//! or no damage.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Damage relations for one defending type.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TypeRelations {
    /// Attacking types that deal double damage
    #[serde(default)]
    pub weak: Vec<String>,
    /// Attacking types that deal half damage
    #[serde(default)]
    pub resist: Vec<String>,
    /// Attacking types that deal no damage
    #[serde(default)]
    pub immune: Vec<String>,
}

impl TypeRelations {
    /// Iterates every attacking type mentioned in any of the three lists.
    pub fn referenced(&self) -> impl Iterator<Item = &String> {
        self.weak
            .iter()
            .chain(self.resist.iter())
            .chain(self.immune.iter())
    }
}

/// The full type chart, keyed by canonical type name ("Fire", "Water", ...).
#[derive(Clone, Debug, Default)]
pub struct TypeChart {
    types: HashMap<String, TypeRelations>,
}

impl TypeChart {
    /// Builds a chart from already-parsed entries and validates it.
    pub fn new(types: HashMap<String, TypeRelations>) -> Result<Self> {
        let chart = Self { types };
        chart.validate()?;
        Ok(chart)
    }

    /// Parses and validates a chart from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let types: HashMap<String, TypeRelations> =
            serde_json::from_str(json).context("Malformed type chart JSON")?;
        Self::new(types)
    }

    /// Loads a chart from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read type chart {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid type chart {}", path.display()))
    }

    /// Every name referenced inside an entry must itself be a chart key,
    /// otherwise the multiplier computation would hit an unknown type.
    fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            return Err(anyhow!("Type chart is empty"));
        }

        let mut defenders: Vec<&String> = self.types.keys().collect();
        defenders.sort();

        for defender in defenders {
            let relations = &self.types[defender];
            for attacker in relations.referenced() {
                if !self.types.contains_key(attacker) {
                    return Err(anyhow!(
                        "Type chart entry '{}' references unknown type '{}'",
                        defender,
                        attacker
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns the relations of a defending type.
    pub fn relations(&self, type_name: &str) -> Option<&TypeRelations> {
        self.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// All type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}
