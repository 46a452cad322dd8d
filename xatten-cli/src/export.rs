//! Profile export to CSV and JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use xatten::{AttenuationProfile, AttenuationReport, CharacteristicDepth, WeightFractions};

pub fn write_profile_csv(profile: &AttenuationProfile, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    wtr.write_record(["energy_ev", "mu_per_cm", "transmission", "attenuation"])?;
    for (energy, mu, t, a) in profile.rows() {
        wtr.write_record(&[
            format!("{energy:.3}"),
            format!("{mu:.6e}"),
            format!("{t:.8}"),
            format!("{a:.8}"),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    weight_fractions: &'a WeightFractions,
    target_energy: f64,
    depth: Option<&'a CharacteristicDepth>,
    depth_error: Option<String>,
    profile: &'a AttenuationProfile,
}

pub fn write_report_json(report: &AttenuationReport, path: &Path) -> Result<()> {
    let json = JsonReport {
        weight_fractions: &report.weight_fractions,
        target_energy: report.target_energy,
        depth: report.depth.as_ref().ok(),
        depth_error: report.depth.as_ref().err().map(|e| e.to_string()),
        profile: &report.profile,
    };
    let text = serde_json::to_string_pretty(&json).context("failed to serialize report")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
