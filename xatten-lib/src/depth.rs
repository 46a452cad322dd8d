use serde::Serialize;

use crate::error::{Result, XattenError};
use crate::interp::interp_linear;

/// Path length over which intensity falls to 1/e at one energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacteristicDepth {
    /// eV
    pub energy: f64,
    /// Interpolated linear attenuation coefficient, 1/cm.
    pub mu: f64,
    pub cm: f64,
}

impl CharacteristicDepth {
    pub fn mm(&self) -> f64 {
        self.cm * 10.0
    }

    pub fn um(&self) -> f64 {
        self.cm * 1.0e4
    }
}

/// 1/e attenuation depth at `target_energy`.
///
/// µ is linearly interpolated on `energies`; targets outside the grid use
/// the nearest end value. A non-positive µ has no finite depth and yields
/// [`XattenError::ZeroAttenuation`]. A non-finite target is rejected as
/// [`XattenError::InvalidSample`].
pub fn characteristic_depth(
    energies: &[f64],
    mu: &[f64],
    target_energy: f64,
) -> Result<CharacteristicDepth> {
    if !target_energy.is_finite() {
        return Err(XattenError::InvalidSample(format!(
            "target energy must be finite, got {target_energy}"
        )));
    }
    let mu_at = interp_linear(target_energy, energies, mu).ok_or_else(|| {
        XattenError::DataError(format!(
            "cannot interpolate {} coefficients on {} energies",
            mu.len(),
            energies.len()
        ))
    })?;

    if !(mu_at > 0.0) {
        return Err(XattenError::ZeroAttenuation {
            energy: target_energy,
            mu: mu_at,
        });
    }

    Ok(CharacteristicDepth {
        energy: target_energy,
        mu: mu_at,
        cm: 1.0 / mu_at,
    })
}
