use serde::Serialize;

use crate::interp::interp_linear;

/// µm per cm
pub const UM_PER_CM: f64 = 10_000.0;

/// Beer–Lambert transmission through `thickness_um` of material with
/// linear attenuation `mu` (1/cm).
pub fn transmission(mu: f64, thickness_um: f64) -> f64 {
    (-(thickness_um / UM_PER_CM) * mu).exp()
}

/// Energy-resolved attenuation of a sample of fixed thickness.
///
/// All four sequences have the same length and index the same energies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttenuationProfile {
    pub energies: Vec<f64>,
    /// Mixture linear attenuation coefficient, 1/cm.
    pub mu: Vec<f64>,
    pub transmission: Vec<f64>,
    pub attenuation: Vec<f64>,
    pub thickness_um: f64,
}

impl AttenuationProfile {
    /// Apply Beer–Lambert at every energy. No clamping is done; µ ≥ 0 and
    /// a non-negative thickness keep transmission within (0, 1].
    pub fn new(energies: Vec<f64>, mu: Vec<f64>, thickness_um: f64) -> Self {
        let transmission: Vec<f64> = mu.iter().map(|&m| transmission(m, thickness_um)).collect();
        let attenuation = transmission.iter().map(|t| 1.0 - t).collect();
        AttenuationProfile {
            energies,
            mu,
            transmission,
            attenuation,
            thickness_um,
        }
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Transmission at `energy`, linearly interpolated and clamped to the
    /// grid ends.
    pub fn transmission_at(&self, energy: f64) -> Option<f64> {
        interp_linear(energy, &self.energies, &self.transmission)
    }

    pub fn attenuation_at(&self, energy: f64) -> Option<f64> {
        self.transmission_at(energy).map(|t| 1.0 - t)
    }

    /// Rows of (energy, µ, transmission, attenuation).
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.energies
            .iter()
            .zip(&self.mu)
            .zip(&self.transmission)
            .zip(&self.attenuation)
            .map(|(((&e, &m), &t), &a)| (e, m, t, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        // 10000 µm = 1 cm, so exp(-µ)
        assert!((transmission(2.0, 10_000.0) - (-2.0_f64).exp()).abs() < 1e-15);
        assert_eq!(transmission(0.0, 50.0), 1.0);
        assert_eq!(transmission(123.0, 0.0), 1.0);
    }

    #[test]
    fn test_profile_at_target() {
        let p = AttenuationProfile::new(vec![1.0, 3.0], vec![100.0, 300.0], 50.0);
        let t1 = transmission(100.0, 50.0);
        let t3 = transmission(300.0, 50.0);
        let mid = p.transmission_at(2.0).unwrap();
        assert!((mid - 0.5 * (t1 + t3)).abs() < 1e-12);
        assert!((p.attenuation_at(3.0).unwrap() - (1.0 - t3)).abs() < 1e-15);
        assert_eq!(p.rows().count(), 2);
    }
}
