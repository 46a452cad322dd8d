//! TOML run files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xatten::{
    AttenuationRequest, AttenuationTables, Component, DEFAULT_GRID_POINTS, EnergyGrid,
    FractionType, SampleSpec, XattenError,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read run file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse run file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write run file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize run file")]
    Serialize(#[from] toml::ser::Error),

    #[error(
        "molar mass of '{component}' is not given and no attenuation tables are loaded to derive it"
    )]
    MissingMolarMass { component: String },

    #[error(transparent)]
    Invalid(#[from] XattenError),
}

/// One run: sample, energy range and output options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    /// "mole" or "weight" ("mol" and "wt" are accepted too).
    pub fraction_type: String,
    /// Bulk density in g/cm³.
    pub density: f64,
    /// Sample thickness in µm.
    pub thickness: f64,
    /// Attenuation bundle; the command line and `XATTEN_TABLES` take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<PathBuf>,
    pub energy: EnergyConfig,
    #[serde(rename = "component")]
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Energy range in eV.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnergyConfig {
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_points")]
    pub points: usize,
    pub target: f64,
}

fn default_points() -> usize {
    DEFAULT_GRID_POINTS
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComponentConfig {
    pub name: String,
    pub percent: f64,
    /// g/mol; derived from the formula when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub plot: bool,
    #[serde(default)]
    pub svg: bool,
    #[serde(default = "default_true")]
    pub csv: bool,
    #[serde(default)]
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            plot: true,
            svg: false,
            csv: true,
            json: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl RunConfig {
    pub fn needs_tables_for_molar_mass(&self) -> bool {
        self.components.iter().any(|c| c.molar_mass.is_none())
    }

    /// Validate and convert into a library request, filling in missing
    /// molar masses from `tables`.
    pub fn to_request(
        &self,
        tables: Option<&AttenuationTables>,
    ) -> Result<AttenuationRequest, ConfigError> {
        let fraction_type: FractionType = self.fraction_type.parse()?;

        let mut components = Vec::with_capacity(self.components.len());
        for c in &self.components {
            let molar_mass = match (c.molar_mass, tables) {
                (Some(m), _) => m,
                (None, Some(t)) => {
                    let m = t.formula_weight(&c.name)?;
                    log::info!("molar mass of {} derived from formula: {m:.4} g/mol", c.name);
                    m
                }
                (None, None) => {
                    return Err(ConfigError::MissingMolarMass {
                        component: c.name.clone(),
                    });
                }
            };
            components.push(Component::new(c.name.clone(), c.percent, molar_mass));
        }

        let sample = SampleSpec::new(components, fraction_type, self.density, self.thickness)?;
        let grid = EnergyGrid::linspace(self.energy.start, self.energy.end, self.energy.points)?;
        Ok(AttenuationRequest::new(sample, grid, self.energy.target)?)
    }
}

/// Load and parse a TOML run file.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_config(path: &Path, config: &RunConfig) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
