#![allow(dead_code)]

use std::collections::HashMap;

use xatten::xatten_data::{AttenuationDatabase, ElementRecord, MassAttenuationRecord};
use xatten::{AttenuationTables, MuLookup, Result, XattenError};

/// µ/ρ = coefficient × (1 keV / E)³, cm²/g.
pub struct PowerLawLookup {
    coefficients: HashMap<String, f64>,
}

impl PowerLawLookup {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        PowerLawLookup {
            coefficients: entries
                .iter()
                .map(|&(name, k)| (name.to_string(), k))
                .collect(),
        }
    }

    pub fn mass_mu(&self, material: &str, energy: f64) -> f64 {
        self.coefficients[material] * (1000.0 / energy).powi(3)
    }
}

impl MuLookup for PowerLawLookup {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        let k = self
            .coefficients
            .get(material)
            .ok_or_else(|| XattenError::UnknownMaterial(material.to_string()))?;
        if let Some(&energy) = energies.iter().find(|&&e| e > 500_000.0) {
            return Err(XattenError::EnergyOutOfRange {
                energy,
                min: 0.0,
                max: 500_000.0,
            });
        }
        Ok(energies
            .iter()
            .map(|e| density * k * (1000.0 / e).powi(3))
            .collect())
    }
}

/// Always reports zero attenuation.
pub struct TransparentLookup;

impl MuLookup for TransparentLookup {
    fn linear_mu(&self, _material: &str, energies: &[f64], _density: f64) -> Result<Vec<f64>> {
        Ok(vec![0.0; energies.len()])
    }
}

/// Iron and oxygen tables with an iron K edge at 7112 eV.
pub fn fe_o_tables() -> AttenuationTables {
    let fe = MassAttenuationRecord {
        material: "Fe".to_string(),
        energy: vec![1000.0, 5000.0, 7111.9, 7112.0, 10000.0, 20000.0, 100000.0],
        mu_rho: vec![9085.0, 138.0, 53.0, 410.0, 171.0, 25.7, 0.37],
    };
    let o = MassAttenuationRecord {
        material: "O".to_string(),
        energy: vec![1000.0, 5000.0, 10000.0, 20000.0, 100000.0],
        mu_rho: vec![4590.0, 46.0, 5.95, 0.84, 0.155],
    };
    AttenuationTables::from_database(AttenuationDatabase {
        version: vec![],
        elements: vec![
            ElementRecord {
                atomic_number: 8,
                symbol: "O".to_string(),
                name: "oxygen".to_string(),
                molar_mass: 15.999,
                density: 0.001429,
            },
            ElementRecord {
                atomic_number: 26,
                symbol: "Fe".to_string(),
                name: "iron".to_string(),
                molar_mass: 55.845,
                density: 7.874,
            },
        ],
        mass_attenuation: vec![fe, o],
        ..Default::default()
    })
    .expect("test tables are well formed")
}
