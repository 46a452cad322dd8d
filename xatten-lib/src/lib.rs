//! X-ray transmission through samples made of several components.
//!
//! A [`SampleSpec`] lists the components with their mole or weight
//! percentages. [`compute`] normalizes them to weight fractions, combines
//! per-component attenuation from a [`MuLookup`] into a mixture
//! coefficient, applies Beer–Lambert over the sample thickness, and
//! reports the 1/e attenuation depth at a target energy.

pub mod chemparser;
pub mod depth;
pub mod error;
pub mod fractions;
pub mod interp;
pub mod lookup;
pub mod mixture;
pub mod pipeline;
pub mod sample;
pub mod tables;
pub mod transmission;

pub use depth::{CharacteristicDepth, characteristic_depth};
pub use error::{Result, XattenError};
pub use fractions::{FractionType, WeightFractions, normalize_weight_fractions};
pub use lookup::{CachedLookup, MuLookup};
pub use mixture::mixture_mu;
pub use pipeline::{AttenuationReport, compute};
pub use sample::{AttenuationRequest, Component, DEFAULT_GRID_POINTS, EnergyGrid, SampleSpec};
pub use tables::AttenuationTables;
pub use transmission::{AttenuationProfile, transmission};
pub use xatten_data;
