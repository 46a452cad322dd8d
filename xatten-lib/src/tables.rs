use std::collections::HashMap;
use std::path::Path;

use log::debug;
use xatten_data::{
    AttenuationDatabase, ElamRecord, ElementRecord, LogSpline, MassAttenuationRecord,
    MaterialRecord,
};

use crate::chemparser::chemparse;
use crate::error::{Result, XattenError};
use crate::interp::{interp_loglog, interp_spline};
use crate::lookup::MuLookup;

/// Energy span (eV) over which the Elam cross sections are valid.
pub const ELAM_MIN_EV: f64 = 100.0;
pub const ELAM_MAX_EV: f64 = 800_000.0;

/// Tabulated mass-attenuation coefficients with element and material indices.
///
/// A material with its own µ/ρ table is looked up directly. A name from the
/// materials list ("water", "kapton") resolves to its formula; anything else
/// is parsed as a chemical formula. A formula's µ/ρ is the
/// mass-fraction-weighted sum of its elements, each taken from a direct
/// table when present and from the Elam total cross section otherwise.
#[derive(Debug)]
pub struct AttenuationTables {
    data: AttenuationDatabase,
    symbol_to_element: HashMap<String, usize>,
    material_to_table: HashMap<String, usize>,
    symbol_to_elam: HashMap<String, usize>,
    name_to_material: HashMap<String, usize>,
}

impl AttenuationTables {
    /// Decode a zstd-compressed postcard bundle.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| XattenError::DataError(format!("zstd header: {e}")))?;
        let mut decompressed = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decompressed)
            .map_err(|e| XattenError::DataError(format!("zstd stream: {e}")))?;

        let data: AttenuationDatabase = postcard::from_bytes(&decompressed)
            .map_err(|e| XattenError::DataError(format!("postcard: {e}")))?;
        Self::from_database(data)
    }

    /// Read and decode a bundle file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| XattenError::DataError(format!("{}: {e}", path.display())))?;
        Self::from_compressed(&bytes)
    }

    /// Index an in-memory database, checking every table for shape.
    pub fn from_database(data: AttenuationDatabase) -> Result<Self> {
        for table in &data.mass_attenuation {
            check_table(table)?;
        }
        for rec in &data.elam {
            check_elam(rec)?;
        }

        let symbol_to_element = index(&data.elements, |e| e.symbol.clone());
        let material_to_table = index(&data.mass_attenuation, |t| t.material.clone());
        let symbol_to_elam = index(&data.elam, |r| r.element.clone());
        let name_to_material = index(&data.materials, |m| m.name.to_lowercase());
        debug!(
            "indexed {} elements, {} attenuation tables, {} Elam elements and {} named materials",
            data.elements.len(),
            data.mass_attenuation.len(),
            data.elam.len(),
            data.materials.len()
        );

        Ok(AttenuationTables {
            data,
            symbol_to_element,
            material_to_table,
            symbol_to_elam,
            name_to_material,
        })
    }

    pub fn raw(&self) -> &AttenuationDatabase {
        &self.data
    }

    pub fn element(&self, symbol: &str) -> Result<&ElementRecord> {
        self.symbol_to_element
            .get(symbol)
            .map(|&i| &self.data.elements[i])
            .ok_or_else(|| XattenError::UnknownMaterial(symbol.to_string()))
    }

    pub fn table(&self, material: &str) -> Option<&MassAttenuationRecord> {
        self.material_to_table
            .get(material)
            .map(|&i| &self.data.mass_attenuation[i])
    }

    /// Named material, matched case-insensitively.
    pub fn material(&self, name: &str) -> Option<&MaterialRecord> {
        self.name_to_material
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.data.materials[i])
    }

    /// Energy span (eV) covered by a material's own table.
    pub fn energy_range(&self, material: &str) -> Option<(f64, f64)> {
        let table = self.table(material)?;
        Some((*table.energy.first()?, *table.energy.last()?))
    }

    /// Formula for `material`: the named material's formula, or the input.
    fn formula_of<'a>(&'a self, material: &'a str) -> &'a str {
        match self.material(material) {
            Some(m) => &m.formula,
            None => material,
        }
    }

    /// Molar mass of a formula or named material in g/mol.
    pub fn formula_weight(&self, formula: &str) -> Result<f64> {
        let formula = self.formula_of(formula);
        let atoms = chemparse(formula)?;
        let mut total = 0.0;
        for (sym, count) in &atoms {
            total += count * self.element(sym)?.molar_mass;
        }
        if total <= 0.0 {
            return Err(XattenError::InvalidFormula(format!(
                "zero weight formula: {formula}"
            )));
        }
        Ok(total)
    }

    /// Mass attenuation coefficient µ/ρ in cm²/g.
    pub fn mass_mu(&self, material: &str, energies: &[f64]) -> Result<Vec<f64>> {
        if let Some(table) = self.table(material) {
            return interpolate_table(table, energies);
        }

        let formula = self.formula_of(material);
        if formula != material {
            debug!("{material} resolved to formula {formula}");
        }
        let atoms = chemparse(formula)?;
        let total_weight = self.formula_weight(formula)?;

        let mut mu = vec![0.0_f64; energies.len()];
        for (sym, count) in &atoms {
            let frac = count * self.element(sym)?.molar_mass / total_weight;
            for (acc, val) in mu.iter_mut().zip(self.element_mass_mu(sym, energies)?) {
                *acc += frac * val;
            }
        }
        Ok(mu)
    }

    /// µ/ρ of one element: its direct table if present, else the Elam total.
    fn element_mass_mu(&self, symbol: &str, energies: &[f64]) -> Result<Vec<f64>> {
        if let Some(table) = self.table(symbol) {
            return interpolate_table(table, energies);
        }
        let rec = self
            .symbol_to_elam
            .get(symbol)
            .map(|&i| &self.data.elam[i])
            .ok_or_else(|| XattenError::UnknownMaterial(symbol.to_string()))?;
        elam_total(rec, energies)
    }
}

impl MuLookup for AttenuationTables {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        let mut mu = self.mass_mu(material, energies)?;
        for val in &mut mu {
            *val *= density;
        }
        Ok(mu)
    }
}

fn check_table(table: &MassAttenuationRecord) -> Result<()> {
    let bad = |why: &str| XattenError::DataError(format!("table '{}': {why}", table.material));
    if table.energy.len() < 2 {
        return Err(bad("fewer than two points"));
    }
    if table.energy.len() != table.mu_rho.len() {
        return Err(bad("energy and mu_rho lengths differ"));
    }
    if table.energy[0] <= 0.0 || table.energy.windows(2).any(|w| w[1] <= w[0]) {
        return Err(bad("energies must be positive and strictly increasing"));
    }
    if table.mu_rho.iter().any(|&v| v < 0.0 || !v.is_finite()) {
        return Err(bad("negative or non-finite coefficient"));
    }
    Ok(())
}

fn check_elam(rec: &ElamRecord) -> Result<()> {
    for (kind, spline) in [
        ("photo", &rec.photo),
        ("coherent", &rec.coherent),
        ("incoherent", &rec.incoherent),
    ] {
        let n = spline.log_energy.len();
        if n < 2 || spline.log_value.len() != n || spline.second_derivative.len() != n {
            return Err(XattenError::DataError(format!(
                "Elam {kind} spline for '{}' is malformed",
                rec.element
            )));
        }
        if spline.log_energy.windows(2).any(|w| w[1] < w[0]) {
            return Err(XattenError::DataError(format!(
                "Elam {kind} energies for '{}' are not sorted",
                rec.element
            )));
        }
    }
    Ok(())
}

fn index<T>(items: &[T], key: impl Fn(&T) -> String) -> HashMap<String, usize> {
    items.iter().enumerate().map(|(i, item)| (key(item), i)).collect()
}

fn eval_log_spline(spline: &LogSpline, log_e: f64) -> Option<f64> {
    interp_spline(
        log_e,
        &spline.log_energy,
        &spline.log_value,
        &spline.second_derivative,
    )
    .map(f64::exp)
}

/// Photoabsorption plus coherent plus incoherent µ/ρ in cm²/g.
fn elam_total(rec: &ElamRecord, energies: &[f64]) -> Result<Vec<f64>> {
    energies
        .iter()
        .map(|&energy| {
            if !(ELAM_MIN_EV..=ELAM_MAX_EV).contains(&energy) {
                return Err(XattenError::EnergyOutOfRange {
                    energy,
                    min: ELAM_MIN_EV,
                    max: ELAM_MAX_EV,
                });
            }
            let log_e = energy.ln();
            [&rec.photo, &rec.coherent, &rec.incoherent]
                .into_iter()
                .map(|s| eval_log_spline(s, log_e))
                .sum::<Option<f64>>()
                .ok_or_else(|| XattenError::DataError(format!("Elam tables for '{}'", rec.element)))
        })
        .collect()
}

fn interpolate_table(table: &MassAttenuationRecord, energies: &[f64]) -> Result<Vec<f64>> {
    let min = table.energy[0];
    let max = table.energy[table.energy.len() - 1];
    if let Some(&energy) = energies.iter().find(|&&e| !(min..=max).contains(&e)) {
        return Err(XattenError::EnergyOutOfRange { energy, min, max });
    }
    interp_loglog(energies, &table.energy, &table.mu_rho)
        .ok_or_else(|| XattenError::DataError(format!("table '{}' is empty", table.material)))
}
