use log::debug;

use crate::error::{Result, XattenError};
use crate::fractions::WeightFractions;
use crate::lookup::MuLookup;

/// Mixture linear attenuation coefficient (1/cm) at each energy.
///
/// Each component is looked up at its partial density, `bulk_density`
/// times its weight fraction, and contributes its coefficient scaled by
/// that same weight fraction:
///
/// µ_mix(E) = Σ w_c · µ_c(E, ρ · w_c)
///
/// Any lookup error is reported as [`XattenError::LookupFailure`] naming the
/// component.
pub fn mixture_mu<L: MuLookup + ?Sized>(
    weights: &WeightFractions,
    energies: &[f64],
    bulk_density: f64,
    lookup: &L,
) -> Result<Vec<f64>> {
    let mut mu = vec![0.0_f64; energies.len()];

    for (material, weight) in weights.iter() {
        let partial_density = bulk_density * weight;
        debug!("{material}: weight fraction {weight:.6}, partial density {partial_density:.6} g/cm³");

        let component_mu = lookup
            .linear_mu(material, energies, partial_density)
            .map_err(|e| match e {
                XattenError::LookupFailure { .. } => e,
                other => XattenError::LookupFailure {
                    material: material.to_string(),
                    reason: other.to_string(),
                },
            })?;

        if component_mu.len() != energies.len() {
            return Err(XattenError::LookupFailure {
                material: material.to_string(),
                reason: format!(
                    "returned {} values for {} energies",
                    component_mu.len(),
                    energies.len()
                ),
            });
        }

        for (acc, val) in mu.iter_mut().zip(component_mu) {
            *acc += weight * val;
        }
    }

    Ok(mu)
}
