use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, XattenError};
use crate::sample::Component;

/// How component percentages are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionType {
    Mole,
    Weight,
}

impl FromStr for FractionType {
    type Err = XattenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mole" | "mol" | "mol%" => Ok(FractionType::Mole),
            "weight" | "wt" | "wt%" => Ok(FractionType::Weight),
            _ => Err(XattenError::InvalidFractionType(s.to_string())),
        }
    }
}

impl fmt::Display for FractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractionType::Mole => f.write_str("mole"),
            FractionType::Weight => f.write_str("weight"),
        }
    }
}

/// Normalized weight fractions in component order; they sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightFractions {
    entries: Vec<(String, f64)>,
}

impl WeightFractions {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, w)| w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Convert mole or weight percentages into weight fractions summing to 1.
///
/// Percentages need not add up to 100; the result is renormalized either
/// way. For mole percentages each component is weighted by its molar mass
/// before normalizing.
pub fn normalize_weight_fractions(
    components: &[Component],
    fraction_type: FractionType,
) -> Result<WeightFractions> {
    let unnormalized: Vec<f64> = components
        .iter()
        .map(|c| match fraction_type {
            FractionType::Mole => c.percent / 100.0 * c.molar_mass,
            FractionType::Weight => c.percent / 100.0,
        })
        .collect();

    let total: f64 = unnormalized.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(XattenError::DegenerateMixture);
    }

    let entries = components
        .iter()
        .zip(unnormalized)
        .map(|(c, w)| (c.name.clone(), w / total))
        .collect();
    Ok(WeightFractions { entries })
}
