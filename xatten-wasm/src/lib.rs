//! WASM bindings for xatten.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p xatten-wasm
//! ```

use wasm_bindgen::prelude::*;

use xatten::{
    AttenuationRequest, AttenuationTables, Component, EnergyGrid, FractionType, SampleSpec,
    XattenError,
};

fn to_js(e: XattenError) -> JsError {
    JsError::new(&e.to_string())
}

fn components(
    names: Vec<String>,
    percents: &[f64],
    molar_masses: &[f64],
) -> Result<Vec<Component>, JsError> {
    if names.len() != percents.len() || names.len() != molar_masses.len() {
        return Err(JsError::new(
            "names, percents and molar_masses must have the same length",
        ));
    }
    Ok(names
        .into_iter()
        .zip(percents)
        .zip(molar_masses)
        .map(|((name, &p), &m)| Component::new(name, p, m))
        .collect())
}

// ── Composition ──

/// Returns normalized weight fractions in the order of `names`.
///
/// `fraction_type` is one of: "mole", "mol", "weight", "wt".
#[wasm_bindgen]
pub fn weight_fractions(
    names: Vec<String>,
    percents: &[f64],
    molar_masses: &[f64],
    fraction_type: &str,
) -> Result<Vec<f64>, JsError> {
    let kind: FractionType = fraction_type.parse().map_err(to_js)?;
    let comps = components(names, percents, molar_masses)?;
    let wf = xatten::normalize_weight_fractions(&comps, kind).map_err(to_js)?;
    Ok(wf.iter().map(|(_, w)| w).collect())
}

// ── Beer–Lambert ──

/// Returns transmission for each µ (1/cm) through `thickness_um` µm.
#[wasm_bindgen]
pub fn transmission(mu: &[f64], thickness_um: f64) -> Vec<f64> {
    mu.iter()
        .map(|&m| xatten::transmission(m, thickness_um))
        .collect()
}

/// Returns [mu_at_target, depth_cm, depth_mm, depth_um].
#[wasm_bindgen]
pub fn characteristic_depth(
    energies: &[f64],
    mu: &[f64],
    target_energy: f64,
) -> Result<Vec<f64>, JsError> {
    let d = xatten::characteristic_depth(energies, mu, target_energy).map_err(to_js)?;
    Ok(vec![d.mu, d.cm, d.mm(), d.um()])
}

// ── Tabulated lookup ──

/// Attenuation tables decoded from a bundle produced by `xatten-generate`.
#[wasm_bindgen]
pub struct Tables {
    inner: AttenuationTables,
}

#[wasm_bindgen]
impl Tables {
    #[wasm_bindgen(constructor)]
    pub fn new(bundle: &[u8]) -> Result<Tables, JsError> {
        let inner = AttenuationTables::from_compressed(bundle).map_err(to_js)?;
        Ok(Tables { inner })
    }

    /// Returns the linear attenuation coefficient (1/cm) of one material.
    pub fn material_mu(
        &self,
        material: &str,
        energies: &[f64],
        density: f64,
    ) -> Result<Vec<f64>, JsError> {
        xatten::MuLookup::linear_mu(&self.inner, material, energies, density).map_err(to_js)
    }

    /// Returns the formula weight in g/mol.
    pub fn formula_weight(&self, formula: &str) -> Result<f64, JsError> {
        self.inner.formula_weight(formula).map_err(to_js)
    }

    /// Returns the named materials and the materials with their own µ/ρ table.
    pub fn materials(&self) -> js_sys::Array {
        let raw = self.inner.raw();
        raw.materials
            .iter()
            .map(|m| m.name.as_str())
            .chain(raw.mass_attenuation.iter().map(|t| t.material.as_str()))
            .map(JsValue::from_str)
            .collect()
    }

    /// Runs the full calculation and returns
    /// `{ energies, mu, transmission, attenuation, weightFractions, depthMm }`.
    ///
    /// `depthMm` is `null` when the 1/e depth is undefined.
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        &self,
        names: Vec<String>,
        percents: &[f64],
        molar_masses: &[f64],
        fraction_type: &str,
        density: f64,
        thickness_um: f64,
        e_start: f64,
        e_end: f64,
        points: usize,
        target_energy: f64,
    ) -> Result<js_sys::Object, JsError> {
        let kind: FractionType = fraction_type.parse().map_err(to_js)?;
        let comps = components(names, percents, molar_masses)?;
        let sample = SampleSpec::new(comps, kind, density, thickness_um).map_err(to_js)?;
        let grid = EnergyGrid::linspace(e_start, e_end, points).map_err(to_js)?;
        let request = AttenuationRequest::new(sample, grid, target_energy).map_err(to_js)?;
        let report = xatten::compute(&request, &self.inner).map_err(to_js)?;

        let out = js_sys::Object::new();
        let profile = &report.profile;
        set(&out, "energies", floats(&profile.energies))?;
        set(&out, "mu", floats(&profile.mu))?;
        set(&out, "transmission", floats(&profile.transmission))?;
        set(&out, "attenuation", floats(&profile.attenuation))?;
        let weights: Vec<f64> = report.weight_fractions.iter().map(|(_, w)| w).collect();
        set(&out, "weightFractions", floats(&weights))?;
        let depth = match &report.depth {
            Ok(d) => JsValue::from_f64(d.mm()),
            Err(_) => JsValue::NULL,
        };
        set(&out, "depthMm", depth)?;
        Ok(out)
    }
}

fn floats(values: &[f64]) -> JsValue {
    js_sys::Float64Array::from(values).into()
}

fn set(obj: &js_sys::Object, key: &str, value: JsValue) -> Result<(), JsError> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|_| JsError::new(&format!("failed to set '{key}'")))
}
