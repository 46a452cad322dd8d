use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum XattenError {
    InvalidFractionType(String),
    DegenerateMixture,
    LookupFailure { material: String, reason: String },
    ZeroAttenuation { energy: f64, mu: f64 },
    InvalidSample(String),
    UnknownMaterial(String),
    EnergyOutOfRange { energy: f64, min: f64, max: f64 },
    InvalidFormula(String),
    DataError(String),
}

pub type Result<T> = std::result::Result<T, XattenError>;

impl XattenError {
    /// True for errors raised by a material lookup rather than by the
    /// composition or depth calculation.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::LookupFailure { .. }
                | Self::UnknownMaterial(_)
                | Self::EnergyOutOfRange { .. }
                | Self::InvalidFormula(_)
        )
    }
}

impl fmt::Display for XattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFractionType(tag) => {
                write!(f, "fraction type must be 'mole' or 'weight', got '{tag}'")
            }
            Self::DegenerateMixture => {
                write!(f, "total weight of the mixture is zero; cannot normalize fractions")
            }
            Self::LookupFailure { material, reason } => {
                write!(f, "attenuation lookup failed for '{material}': {reason}")
            }
            Self::ZeroAttenuation { energy, mu } => write!(
                f,
                "attenuation coefficient at {energy} eV is {mu} 1/cm; 1/e depth is undefined"
            ),
            Self::InvalidSample(msg) => write!(f, "invalid sample: {msg}"),
            Self::UnknownMaterial(m) => write!(f, "unknown material: {m}"),
            Self::EnergyOutOfRange { energy, min, max } => {
                write!(f, "energy {energy} eV out of range [{min}, {max}]")
            }
            Self::InvalidFormula(formula) => write!(f, "invalid chemical formula: {formula}"),
            Self::DataError(msg) => write!(f, "data error: {msg}"),
        }
    }
}

impl std::error::Error for XattenError {}
