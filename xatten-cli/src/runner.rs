use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use xatten::{AttenuationReport, AttenuationTables};

use crate::config::RunConfig;
use crate::export::{write_profile_csv, write_report_json};
use crate::format::subscript_digits;
use crate::plot::generate_plot;

/// Output switches after command-line overrides.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    pub plot: bool,
    pub svg: bool,
    pub csv: bool,
    pub json: bool,
}

impl RunOptions {
    pub fn from_config(config: &RunConfig) -> Self {
        RunOptions {
            out_dir: config.output.directory.clone(),
            plot: config.output.plot,
            svg: config.output.svg,
            csv: config.output.csv,
            json: config.output.json,
        }
    }
}

/// Resolve the attenuation bundle: command line / environment first, then
/// the run file.
pub fn load_tables(cli_path: Option<&Path>, config: Option<&RunConfig>) -> Result<AttenuationTables> {
    let Some(path) = cli_path.or_else(|| config.and_then(|c| c.tables.as_deref())) else {
        bail!("no attenuation tables given; pass --tables, set XATTEN_TABLES or add `tables` to the run file");
    };
    info!("loading attenuation tables from {}", path.display());
    AttenuationTables::from_path(path)
        .with_context(|| format!("failed to load attenuation tables from {}", path.display()))
}

/// Compute one run, print the report and write the requested outputs.
pub fn run(config: &RunConfig, tables: &AttenuationTables, options: &RunOptions) -> Result<AttenuationReport> {
    let request = config.to_request(Some(tables))?;
    let report = xatten::compute(&request, tables)?;

    println!();
    println!("Normalized weight fractions:");
    for line in weight_fraction_lines(&report) {
        println!("{line}");
    }

    if options.plot || options.csv || options.json {
        std::fs::create_dir_all(&options.out_dir)
            .with_context(|| format!("failed to create {}", options.out_dir.display()))?;
    }

    if options.csv {
        let path = options.out_dir.join("profile.csv");
        write_profile_csv(&report.profile, &path)?;
        println!("Profile written to: {}", path.display());
    }

    if options.json {
        let path = options.out_dir.join("report.json");
        write_report_json(&report, &path)?;
        println!("Report written to: {}", path.display());
    }

    if options.plot {
        let ext = if options.svg { "svg" } else { "png" };
        let path = options.out_dir.join(format!("transmission.{ext}"));
        generate_plot(&report, &path, options.svg)?;
        println!("Plot written to: {}", path.display());
    }

    println!("{}", depth_line(&report));
    Ok(report)
}

pub fn weight_fraction_lines(report: &AttenuationReport) -> Vec<String> {
    report
        .weight_fractions
        .iter()
        .map(|(name, w)| format!("{}: {w:.4}", subscript_digits(name)))
        .collect()
}

pub fn depth_line(report: &AttenuationReport) -> String {
    let kev = report.target_energy / 1000.0;
    match &report.depth {
        Ok(d) => format!(
            "1/e attenuation depth at {kev:.1} keV: {:.4} mm ({:.1} µm)",
            d.mm(),
            d.um()
        ),
        Err(e) => format!("1/e attenuation depth at {kev:.1} keV is undefined: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xatten::{
        AttenuationRequest, Component, EnergyGrid, FractionType, MuLookup, SampleSpec,
    };

    struct Flat(f64);

    impl MuLookup for Flat {
        fn linear_mu(&self, _m: &str, energies: &[f64], density: f64) -> xatten::Result<Vec<f64>> {
            Ok(vec![self.0 * density; energies.len()])
        }
    }

    fn report(mu_rho: f64) -> AttenuationReport {
        let sample = SampleSpec::new(
            vec![Component::new("Fe2O3", 100.0, 159.69)],
            FractionType::Weight,
            5.0,
            50.0,
        )
        .unwrap();
        let grid = EnergyGrid::linspace(5000.0, 20000.0, 11).unwrap();
        let request = AttenuationRequest::new(sample, grid, 10000.0).unwrap();
        xatten::compute(&request, &Flat(mu_rho)).unwrap()
    }

    #[test]
    fn test_depth_line() {
        // µ = 20 cm²/g × 5 g/cm³ = 100 1/cm → 0.1 mm
        let r = report(20.0);
        assert_eq!(
            depth_line(&r),
            "1/e attenuation depth at 10.0 keV: 0.1000 mm (100.0 µm)"
        );
    }

    #[test]
    fn test_depth_line_undefined() {
        let r = report(0.0);
        assert!(depth_line(&r).contains("is undefined"));
    }

    #[test]
    fn test_weight_fraction_lines() {
        assert_eq!(weight_fraction_lines(&report(1.0)), ["Fe₂O₃: 1.0000"]);
    }
}
