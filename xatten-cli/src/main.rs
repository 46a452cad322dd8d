//! xatten command-line interface.
//!
//! ```sh
//! xatten run sample.toml --tables attenuation.bin.zst
//! xatten validate sample.toml
//! xatten prompt --save sample.toml
//! xatten tables attenuation.bin.zst
//! ```

mod config;
mod export;
mod format;
mod plot;
mod prompt;
mod runner;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::runner::RunOptions;

#[derive(Parser)]
#[command(name = "xatten")]
#[command(about = "X-ray transmission through multi-component samples")]
#[command(version)]
struct Cli {
    /// Attenuation bundle produced by xatten-generate.
    #[arg(long, global = true, env = "XATTEN_TABLES")]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and report the attenuation profile described by a run file.
    Run {
        /// Path to the TOML run file.
        config: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate a run file without computing anything.
    Validate {
        /// Path to the TOML run file.
        config: PathBuf,
    },
    /// Ask for each field interactively, then compute.
    Prompt {
        /// Also save the answers as a run file.
        #[arg(long)]
        save: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Summarize an attenuation bundle.
    Tables {
        /// Bundle to inspect; defaults to --tables.
        bundle: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output directory (overrides the run file).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write the plot as SVG instead of PNG.
    #[arg(long)]
    svg: bool,
    /// Skip the plot.
    #[arg(long)]
    no_plot: bool,
    /// Also write the report as JSON.
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    fn apply(&self, mut options: RunOptions) -> RunOptions {
        if let Some(dir) = &self.output {
            options.out_dir = dir.clone();
        }
        options.svg |= self.svg;
        options.json |= self.json;
        if self.no_plot {
            options.plot = false;
        }
        options
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { config, output } => {
            let job = config::load_config(config)?;
            println!("Run file: {}", config.display());
            let tables = runner::load_tables(cli.tables.as_deref(), Some(&job))?;
            let options = output.apply(RunOptions::from_config(&job));
            runner::run(&job, &tables, &options)?;
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(config)?;
            let tables = if job.needs_tables_for_molar_mass() {
                Some(runner::load_tables(cli.tables.as_deref(), Some(&job))?)
            } else {
                None
            };
            let request = job.to_request(tables.as_ref())?;
            println!("Run file is valid: {}", config.display());
            println!(
                "  {} component(s), {} fractions, {} energies from {} to {} eV",
                request.sample.components().len(),
                request.sample.fraction_type(),
                request.grid.len(),
                request.grid.start(),
                request.grid.end()
            );
            Ok(())
        }
        Commands::Prompt { save, output } => {
            let stdin = std::io::stdin();
            let job = prompt::collect_run_config(stdin.lock(), std::io::stdout())?;
            if let Some(path) = save {
                config::save_config(path, &job)?;
                println!("Run file saved to: {}", path.display());
            }
            let tables = runner::load_tables(cli.tables.as_deref(), Some(&job))?;
            let options = output.apply(RunOptions::from_config(&job));
            runner::run(&job, &tables, &options)?;
            Ok(())
        }
        Commands::Tables { bundle } => {
            let tables = runner::load_tables(bundle.as_deref().or(cli.tables.as_deref()), None)?;
            let raw = tables.raw();
            for v in &raw.version {
                println!("{} ({}): {}", v.tag, v.date, v.notes);
            }
            println!("{} elements", raw.elements.len());
            println!(
                "{} elements with Elam cross sections ({:.0} – {:.0} eV)",
                raw.elam.len(),
                xatten::tables::ELAM_MIN_EV,
                xatten::tables::ELAM_MAX_EV
            );
            println!("{} named materials", raw.materials.len());
            for m in &raw.materials {
                println!("  {:<24} {:<28} {:>10.4} g/cm³", m.name, m.formula, m.density);
            }
            println!("{} tabulated materials", raw.mass_attenuation.len());
            for t in &raw.mass_attenuation {
                if let Some((lo, hi)) = tables.energy_range(&t.material) {
                    println!("  {:<24} {:>10.1} – {:>12.1} eV  ({} points)", t.material, lo, hi, t.energy.len());
                }
            }
            Ok(())
        }
    }
}
