//! Interactive collection of a run, one question per field.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};

use crate::config::{ComponentConfig, EnergyConfig, OutputConfig, RunConfig};
use crate::format::ordinal;

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for: {}", question.trim_end());
        }
        Ok(line.trim().to_string())
    }

    fn ask_number<T: std::str::FromStr>(&mut self, question: &str) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "'{answer}' is not a number, try again.")?,
            }
        }
    }

    fn ask_optional_number(&mut self, question: &str) -> Result<Option<f64>> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => writeln!(self.output, "'{answer}' is not a number, try again.")?,
            }
        }
    }
}

/// Ask for every field of a run on `output`, reading answers from `input`.
///
/// A blank molar mass leaves it to be derived from the formula.
pub fn collect_run_config<R: BufRead, W: Write>(input: R, output: W) -> Result<RunConfig> {
    let mut p = Prompter { input, output };

    let n: usize = p.ask_number("Enter number of components: ")?;
    if n == 0 {
        bail!("at least one component is required");
    }

    let mut components = Vec::with_capacity(n);
    for i in 1..=n {
        let name = if n == 1 {
            p.ask("Enter the component name: ")?
        } else {
            p.ask(&format!("Enter {} component name: ", ordinal(i)))?
        };
        let percent = p.ask_number(&format!("Enter percentage of {name}: "))?;
        let molar_mass = p.ask_optional_number(&format!(
            "Enter molar mass of {name} in g/mol (blank to derive from formula): "
        ))?;
        components.push(ComponentConfig {
            name,
            percent,
            molar_mass,
        });
    }

    let fraction_type =
        p.ask("Are these fractions in mol% or weight%? (type only: mol/wt): ")?.to_lowercase();
    let density = p.ask_number("Enter system bulk density (in g/cm^3): ")?;
    let thickness = p.ask_number("Enter sample thickness (µm): ")?;
    let start = p.ask_number("Enter starting energy (eV): ")?;
    let end = p.ask_number("Enter ending energy (eV): ")?;
    let target = p.ask_number("Enter target energy (eV): ")?;

    Ok(RunConfig {
        fraction_type,
        density,
        thickness,
        tables: None,
        energy: EnergyConfig {
            start,
            end,
            points: xatten::DEFAULT_GRID_POINTS,
            target,
        },
        components,
        output: OutputConfig::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_two_components() {
        let answers = "2\nSiO2\n60\n60.08\nAl2O3\n40\n\nwt\n2.9\n100\n5000\n30000\n12000\n";
        let mut shown = Vec::new();
        let cfg = collect_run_config(Cursor::new(answers), &mut shown).unwrap();

        let text = String::from_utf8(shown).unwrap();
        assert!(text.contains("Enter 1st component name: "));
        assert!(text.contains("Enter 2nd component name: "));
        assert_eq!(cfg.components.len(), 2);
        assert_eq!(cfg.components[0].molar_mass, Some(60.08));
        assert_eq!(cfg.components[1].molar_mass, None);
        assert_eq!(cfg.fraction_type, "wt");
        assert_eq!(cfg.energy.target, 12000.0);
        assert_eq!(cfg.energy.points, 201);
    }

    #[test]
    fn test_single_component_wording_and_retry() {
        let answers = "one\n1\nFe\n100\n55.85\nmol\n7.87\n50\n5000\n20000\n10000\n";
        let mut shown = Vec::new();
        let cfg = collect_run_config(Cursor::new(answers), &mut shown).unwrap();
        let text = String::from_utf8(shown).unwrap();
        assert!(text.contains("'one' is not a number"));
        assert!(text.contains("Enter the component name: "));
        assert_eq!(cfg.components[0].name, "Fe");
        assert_eq!(cfg.thickness, 50.0);
    }

    #[test]
    fn test_eof_is_error() {
        let mut shown = Vec::new();
        assert!(collect_run_config(Cursor::new("1\nFe\n"), &mut shown).is_err());
    }
}
