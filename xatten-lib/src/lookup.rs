use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;

use crate::error::Result;

/// Source of linear attenuation coefficients for a single material.
///
/// Implementations return µ in 1/cm for `material` at `density` (g/cm³),
/// one value per entry of `energies` (eV), in the same order. Unknown
/// materials and unsupported energies are errors.
pub trait MuLookup {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>>;
}

impl<T: MuLookup + ?Sized> MuLookup for &T {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        (**self).linear_mu(material, energies, density)
    }
}

impl<T: MuLookup + ?Sized> MuLookup for Box<T> {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        (**self).linear_mu(material, energies, density)
    }
}

type CacheEntry = (Vec<f64>, Vec<f64>);

/// Memoizes an inner lookup per (material, density) for the lifetime of
/// the wrapper. A cached entry is reused only for the same energy grid.
pub struct CachedLookup<L> {
    inner: L,
    entries: RefCell<HashMap<(String, u64), CacheEntry>>,
    hits: Cell<usize>,
}

impl<L: MuLookup> CachedLookup<L> {
    pub fn new(inner: L) -> Self {
        CachedLookup {
            inner,
            entries: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
        }
    }

    /// Number of calls answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: MuLookup> MuLookup for CachedLookup<L> {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        let key = (material.to_string(), density.to_bits());
        if let Some((grid, mu)) = self.entries.borrow().get(&key) {
            if grid.as_slice() == energies {
                debug!("cache hit for {material} at {density} g/cm³");
                self.hits.set(self.hits.get() + 1);
                return Ok(mu.clone());
            }
        }

        let mu = self.inner.linear_mu(material, energies, density)?;
        self.entries
            .borrow_mut()
            .insert(key, (energies.to_vec(), mu.clone()));
        Ok(mu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        calls: Cell<usize>,
    }

    impl MuLookup for Counting {
        fn linear_mu(&self, _material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
            self.calls.set(self.calls.get() + 1);
            Ok(energies.iter().map(|e| density * 1e4 / e).collect())
        }
    }

    #[test]
    fn test_cache_reuses_same_grid() {
        let cached = CachedLookup::new(Counting { calls: Cell::new(0) });
        let grid = [5000.0, 10000.0];
        let a = cached.linear_mu("Fe", &grid, 7.87).unwrap();
        let b = cached.linear_mu("Fe", &grid, 7.87).unwrap();
        assert_eq!(a, b);
        assert_eq!(cached.hits(), 1);
        assert_eq!(cached.into_inner().calls.get(), 1);
    }

    #[test]
    fn test_cache_misses_on_new_density_or_grid() {
        let cached = CachedLookup::new(Counting { calls: Cell::new(0) });
        cached.linear_mu("Fe", &[5000.0], 7.87).unwrap();
        cached.linear_mu("Fe", &[5000.0], 3.9).unwrap();
        cached.linear_mu("Fe", &[6000.0], 3.9).unwrap();
        assert_eq!(cached.hits(), 0);
        assert_eq!(cached.into_inner().calls.get(), 3);
    }
}
