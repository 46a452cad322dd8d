use std::path::Path;

use xatten_data::{ElamRecord, LogSpline};

/// Read the photoabsorption and scattering splines from `elam.dat`.
///
/// Each element opens with `Element <sym> <Z> <mw> <rho>`. A `Photo` line
/// is followed by indented rows of `lnE lnσ spline`, a `Scatter` line by
/// rows of `lnE lnσ_coh spline_coh lnσ_incoh spline_incoh`.
pub fn parse_elam(path: &Path) -> Vec<ElamRecord> {
    let content = std::fs::read_to_string(path).expect("failed to read elam.dat");
    if !content
        .lines()
        .next()
        .is_some_and(|l| l.contains("Elam, Ravel, Sieber"))
    {
        panic!("{path:?} is not an Elam data file");
    }
    parse_elam_text(&content)
}

fn parse_elam_text(content: &str) -> Vec<ElamRecord> {
    let mut records: Vec<ElamRecord> = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if line.starts_with("Element") {
            let symbol = line.split_whitespace().nth(1).unwrap_or_default();
            records.push(ElamRecord {
                element: symbol.to_string(),
                photo: LogSpline::default(),
                coherent: LogSpline::default(),
                incoherent: LogSpline::default(),
            });
            continue;
        }

        let is_photo = line.starts_with("Photo");
        if !is_photo && !line.starts_with("Scatter") {
            continue;
        }
        let Some(current) = records.last_mut() else {
            panic!("{} block before any Element line", line.trim());
        };

        while let Some(row) = lines.next_if(|l| l.starts_with("    ")) {
            let v: Vec<f64> = row
                .split_whitespace()
                .filter_map(|w| w.parse().ok())
                .collect();
            if is_photo && v.len() >= 3 {
                push_knot(&mut current.photo, v[0], v[1], v[2]);
            } else if !is_photo && v.len() >= 5 {
                push_knot(&mut current.coherent, v[0], v[1], v[2]);
                push_knot(&mut current.incoherent, v[0], v[3], v[4]);
            }
        }
    }

    records
}

fn push_knot(spline: &mut LogSpline, log_energy: f64, log_value: f64, second_derivative: f64) {
    spline.log_energy.push(log_energy);
    spline.log_value.push(log_value);
    spline.second_derivative.push(second_derivative);
}
