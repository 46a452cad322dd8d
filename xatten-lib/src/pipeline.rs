use log::{debug, warn};

use crate::depth::{CharacteristicDepth, characteristic_depth};
use crate::error::Result;
use crate::fractions::{WeightFractions, normalize_weight_fractions};
use crate::lookup::MuLookup;
use crate::mixture::mixture_mu;
use crate::sample::{AttenuationRequest, Component};
use crate::transmission::AttenuationProfile;

/// Result of one run, shaped for the presentation layer.
#[derive(Debug, Clone)]
pub struct AttenuationReport {
    /// Components as supplied, with their raw percentages.
    pub components: Vec<Component>,
    pub weight_fractions: WeightFractions,
    pub profile: AttenuationProfile,
    /// eV
    pub target_energy: f64,
    /// Depth at the target energy. A failure here does not invalidate the
    /// profile.
    pub depth: Result<CharacteristicDepth>,
}

impl AttenuationReport {
    pub fn thickness_um(&self) -> f64 {
        self.profile.thickness_um
    }

    /// (start, end) of the energy grid in eV.
    pub fn energy_bounds(&self) -> (f64, f64) {
        let e = &self.profile.energies;
        (e[0], e[e.len() - 1])
    }

    pub fn attenuation_at_target(&self) -> Option<f64> {
        self.profile.attenuation_at(self.target_energy)
    }
}

/// Run the whole calculation: normalize the composition, evaluate the
/// mixture coefficient, apply Beer–Lambert and derive the 1/e depth.
///
/// Composition and lookup errors abort the run; a depth error is stored in
/// the report instead.
pub fn compute<L: MuLookup + ?Sized>(
    request: &AttenuationRequest,
    lookup: &L,
) -> Result<AttenuationReport> {
    let sample = &request.sample;
    let weights = normalize_weight_fractions(sample.components(), sample.fraction_type())?;
    debug!(
        "normalized {} components ({} fractions)",
        weights.len(),
        sample.fraction_type()
    );

    let energies = request.grid.values();
    let mu = mixture_mu(&weights, energies, sample.density(), lookup)?;
    debug!("evaluated mixture coefficient on {} energies", energies.len());

    let depth = characteristic_depth(energies, &mu, request.target_energy);
    if let Err(e) = &depth {
        warn!("{e}");
    }

    let profile = AttenuationProfile::new(energies.to_vec(), mu, sample.thickness_um());

    Ok(AttenuationReport {
        components: sample.components().to_vec(),
        weight_fractions: weights,
        profile,
        target_energy: request.target_energy,
        depth,
    })
}
