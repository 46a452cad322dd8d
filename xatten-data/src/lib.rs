#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Tabulated mass-attenuation data, deserialized from a compressed bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttenuationDatabase {
    pub version: Vec<VersionRecord>,
    pub elements: Vec<ElementRecord>,
    pub mass_attenuation: Vec<MassAttenuationRecord>,
    pub elam: Vec<ElamRecord>,
    pub materials: Vec<MaterialRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRecord {
    pub tag: String,
    pub date: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: u16,
    pub symbol: String,
    pub name: String,
    /// g/mol
    pub molar_mass: f64,
    /// g/cm³
    pub density: f64,
}

/// Total mass attenuation coefficient µ/ρ for one material.
///
/// `material` is an element symbol or a compound identifier. Energies are
/// in eV, strictly increasing; `mu_rho` is in cm²/g and aligned with `energy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassAttenuationRecord {
    pub material: String,
    pub energy: Vec<f64>,
    pub mu_rho: Vec<f64>,
}

/// Elam, Ravel and Sieber cross sections for one element.
///
/// The total µ/ρ is photoabsorption plus coherent plus incoherent
/// scattering, each evaluated on its own spline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElamRecord {
    pub element: String,
    pub photo: LogSpline,
    pub coherent: LogSpline,
    pub incoherent: LogSpline,
}

/// Cubic spline in log-log space: `ln E` knots, `ln σ` values and the
/// precomputed second derivatives of `ln σ`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogSpline {
    pub log_energy: Vec<f64>,
    pub log_value: Vec<f64>,
    pub second_derivative: Vec<f64>,
}

/// Named material from XrayDB's `materials.dat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Lowercase name, e.g. "water" or "kapton".
    pub name: String,
    pub formula: String,
    /// g/cm³
    pub density: f64,
}
