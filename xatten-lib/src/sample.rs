use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, XattenError};
use crate::fractions::FractionType;

/// Number of grid points used when the caller does not choose one.
pub const DEFAULT_GRID_POINTS: usize = 201;

/// One constituent of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Chemical formula or tabulated material name.
    pub name: String,
    /// Mole or weight percentage, depending on the sample's fraction type.
    pub percent: f64,
    /// g/mol
    pub molar_mass: f64,
}

impl Component {
    pub fn new(name: impl Into<String>, percent: f64, molar_mass: f64) -> Self {
        Component {
            name: name.into(),
            percent,
            molar_mass,
        }
    }
}

/// Validated description of the sample: composition, bulk density and
/// thickness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSpec {
    components: Vec<Component>,
    fraction_type: FractionType,
    density: f64,
    thickness_um: f64,
}

impl SampleSpec {
    /// Build a sample, rejecting duplicate or empty names, negative
    /// percentages, and non-positive molar mass, density or thickness.
    ///
    /// # Arguments
    /// * `components` - Constituents in input order
    /// * `fraction_type` - Whether percentages are mole% or weight%
    /// * `density` - Bulk density in g/cm³
    /// * `thickness_um` - Sample thickness in µm
    pub fn new(
        components: Vec<Component>,
        fraction_type: FractionType,
        density: f64,
        thickness_um: f64,
    ) -> Result<Self> {
        if components.is_empty() {
            return Err(XattenError::InvalidSample(
                "at least one component is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for c in &components {
            if c.name.trim().is_empty() {
                return Err(XattenError::InvalidSample(
                    "component name is empty".to_string(),
                ));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(XattenError::InvalidSample(format!(
                    "duplicate component '{}'",
                    c.name
                )));
            }
            if !c.percent.is_finite() || c.percent < 0.0 {
                return Err(XattenError::InvalidSample(format!(
                    "percentage of '{}' must be non-negative, got {}",
                    c.name, c.percent
                )));
            }
            require_positive(&format!("molar mass of '{}'", c.name), c.molar_mass)?;
        }
        require_positive("density", density)?;
        require_positive("thickness", thickness_um)?;

        Ok(SampleSpec {
            components,
            fraction_type,
            density,
            thickness_um,
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn fraction_type(&self) -> FractionType {
        self.fraction_type
    }

    /// Bulk density in g/cm³.
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn thickness_um(&self) -> f64 {
        self.thickness_um
    }

    pub fn is_single_component(&self) -> bool {
        self.components.len() == 1
    }
}

/// Strictly increasing photon energies in eV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyGrid {
    values: Vec<f64>,
}

impl EnergyGrid {
    /// `points` evenly spaced energies from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self> {
        require_positive("start energy", start)?;
        require_positive("end energy", end)?;
        if end <= start {
            return Err(XattenError::InvalidSample(format!(
                "end energy {end} eV must exceed start energy {start} eV"
            )));
        }
        if points < 2 {
            return Err(XattenError::InvalidSample(format!(
                "energy grid needs at least 2 points, got {points}"
            )));
        }

        let step = (end - start) / (points - 1) as f64;
        let mut values: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
        // pin the endpoint against accumulated rounding
        values[points - 1] = end;
        Ok(EnergyGrid { values })
    }

    /// Wrap explicit energies, which must be positive and strictly increasing.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(XattenError::InvalidSample("energy grid is empty".to_string()));
        }
        if values.iter().any(|&e| !e.is_finite() || e <= 0.0) {
            return Err(XattenError::InvalidSample(
                "energies must be positive and finite".to_string(),
            ));
        }
        if values.windows(2).any(|w| w[1] <= w[0]) {
            return Err(XattenError::InvalidSample(
                "energies must be strictly increasing".to_string(),
            ));
        }
        Ok(EnergyGrid { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn start(&self) -> f64 {
        self.values[0]
    }

    pub fn end(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything one attenuation run needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttenuationRequest {
    pub sample: SampleSpec,
    pub grid: EnergyGrid,
    /// eV
    pub target_energy: f64,
}

impl AttenuationRequest {
    pub fn new(sample: SampleSpec, grid: EnergyGrid, target_energy: f64) -> Result<Self> {
        require_positive("target energy", target_energy)?;
        Ok(AttenuationRequest {
            sample,
            grid,
            target_energy,
        })
    }
}

fn require_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(XattenError::InvalidSample(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe() -> Vec<Component> {
        vec![Component::new("Fe", 100.0, 55.85)]
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = EnergyGrid::linspace(5000.0, 20000.0, DEFAULT_GRID_POINTS).unwrap();
        assert_eq!(grid.len(), 201);
        assert_eq!(grid.start(), 5000.0);
        assert_eq!(grid.end(), 20000.0);
        assert_eq!(grid.values()[100], 12500.0);
        assert!(grid.values().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_linspace_rejects_reversed_bounds() {
        assert!(EnergyGrid::linspace(20000.0, 5000.0, 201).is_err());
        assert!(EnergyGrid::linspace(5000.0, 20000.0, 1).is_err());
    }

    #[test]
    fn test_from_values_requires_increasing() {
        assert!(EnergyGrid::from_values(vec![1000.0, 1000.0]).is_err());
        assert!(EnergyGrid::from_values(vec![1000.0, 2000.0]).is_ok());
    }

    #[test]
    fn test_sample_validation() {
        assert!(SampleSpec::new(fe(), FractionType::Mole, 7.87, 50.0).is_ok());
        assert!(SampleSpec::new(vec![], FractionType::Mole, 7.87, 50.0).is_err());
        assert!(SampleSpec::new(fe(), FractionType::Mole, 0.0, 50.0).is_err());
        assert!(SampleSpec::new(fe(), FractionType::Mole, 7.87, -1.0).is_err());

        let dup = vec![
            Component::new("Fe", 50.0, 55.85),
            Component::new("Fe", 50.0, 55.85),
        ];
        let err = SampleSpec::new(dup, FractionType::Weight, 7.87, 50.0).unwrap_err();
        assert!(matches!(err, XattenError::InvalidSample(_)));

        let negative = vec![Component::new("Fe", -1.0, 55.85)];
        assert!(SampleSpec::new(negative, FractionType::Weight, 7.87, 50.0).is_err());
    }

    #[test]
    fn test_zero_percent_is_allowed() {
        let zeros = vec![Component::new("A", 0.0, 10.0)];
        assert!(SampleSpec::new(zeros, FractionType::Weight, 1.0, 1.0).is_ok());
    }
}
