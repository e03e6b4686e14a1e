//! Combined type effectiveness for a defending type combination.

use anyhow::{anyhow, Result};
use std::collections::BTreeSet;

use crate::reference::{TypeChart, TypeRelations};

const SUPER_EFFECTIVE: f64 = 2.0;
const NOT_VERY_EFFECTIVE: f64 = 0.5;
const NO_EFFECT: f64 = 0.0;

/// Attacking types grouped by their combined multiplier against a defender.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effectiveness {
    /// Multiplier > 1
    pub weak_to: BTreeSet<String>,
    /// 0 < multiplier < 1
    pub resists: BTreeSet<String>,
    /// Multiplier == 0
    pub immune_to: BTreeSet<String>,
}

fn lookup<'a>(chart: &'a TypeChart, type_name: &str) -> Result<&'a TypeRelations> {
    chart
        .relations(type_name)
        .ok_or_else(|| anyhow!("Type '{}' is not in the type chart", type_name))
}

fn contains(list: &[String], type_name: &str) -> bool {
    list.iter().any(|t| t == type_name)
}

/// Damage multiplier of `attacker` against a defender with `defender_types`.
///
/// The three lists are checked independently, so an attacker listed twice for
/// the same defending type compounds.
pub fn multiplier<S: AsRef<str>>(
    chart: &TypeChart,
    attacker: &str,
    defender_types: &[S],
) -> Result<f64> {
    let mut mult = 1.0;
    for defender in defender_types {
        let relations = lookup(chart, defender.as_ref())?;
        if contains(&relations.weak, attacker) {
            mult *= SUPER_EFFECTIVE;
        }
        if contains(&relations.resist, attacker) {
            mult *= NOT_VERY_EFFECTIVE;
        }
        if contains(&relations.immune, attacker) {
            mult *= NO_EFFECT;
        }
    }
    Ok(mult)
}

/// Computes what a defender with `types` is weak to, resists, and is immune to.
///
/// Only attacking types mentioned by one of the defender's types are
/// considered. A candidate whose effects cancel out to exactly 1.0 lands in
/// none of the three sets. An empty type list returns empty sets without
/// touching the chart.
pub fn effectiveness<S: AsRef<str>>(chart: &TypeChart, types: &[S]) -> Result<Effectiveness> {
    let mut result = Effectiveness::default();
    if types.is_empty() {
        return Ok(result);
    }

    let mut candidates: BTreeSet<&str> = BTreeSet::new();
    for defender in types {
        let relations = lookup(chart, defender.as_ref())?;
        candidates.extend(relations.referenced().map(|s| s.as_str()));
    }

    for attacker in candidates {
        let mult = multiplier(chart, attacker, types)?;
        if mult == 0.0 {
            result.immune_to.insert(attacker.to_string());
        } else if mult > 1.0 {
            result.weak_to.insert(attacker.to_string());
        } else if mult < 1.0 {
            result.resists.insert(attacker.to_string());
        }
    }

    Ok(result)
}
