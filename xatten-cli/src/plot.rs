//! Transmission / attenuation chart.

use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use xatten::AttenuationReport;

use crate::format::subscript_digits;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

/// Chart title: names the material for a single component. The thickness
/// always shows a decimal point ("50.0 µm").
pub fn title(report: &AttenuationReport) -> String {
    let t = report.thickness_um();
    match report.components.as_slice() {
        [only] => format!(
            "X-ray Absorption through {t:?} µm thick {} (single-component system)",
            subscript_digits(&only.name)
        ),
        _ => format!("X-ray Absorption through {t:?} µm thick material (multi-component system)"),
    }
}

/// Draw the profile to `output_path` as PNG or SVG.
pub fn generate_plot(report: &AttenuationReport, output_path: &Path, use_svg: bool) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
        draw_chart(&root, report)?;
        root.present().map_err(|e| anyhow!("{e:?}"))?;
    } else {
        let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
        draw_chart(&root, report)?;
        root.present().map_err(|e| anyhow!("{e:?}"))?;
    }
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, report: &AttenuationReport) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{e:?}"))?;

    let (e_start, e_end) = report.energy_bounds();
    let profile = &report.profile;
    let target = report.target_energy;

    let mut chart = ChartBuilder::on(root)
        .caption(title(report), ("sans-serif", 24).into_font().style(FontStyle::Bold))
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(e_start..e_end, 0.0..1.05)
        .map_err(|e| anyhow!("{e:?}"))?;

    chart
        .configure_mesh()
        .x_desc("Energy (eV)")
        .y_desc("Transmitted / Attenuated fraction")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18).into_font().style(FontStyle::Bold))
        .axis_style(BLACK.stroke_width(2))
        .draw()
        .map_err(|e| anyhow!("{e:?}"))?;

    let blue = RGBColor(31, 119, 180);
    let orange = RGBColor(255, 127, 14);
    let purple = RGBColor(128, 0, 128);

    chart
        .draw_series(LineSeries::new(
            profile.energies.iter().copied().zip(profile.transmission.iter().copied()),
            blue.stroke_width(2),
        ))
        .map_err(|e| anyhow!("{e:?}"))?
        .label("Transmission")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], blue.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            profile.energies.iter().copied().zip(profile.attenuation.iter().copied()),
            orange.stroke_width(2),
        ))
        .map_err(|e| anyhow!("{e:?}"))?
        .label("Attenuation")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], orange.stroke_width(2)));

    let kev = target / 1000.0;
    chart
        .draw_series(dashed((target, 0.0), (target, 1.05), purple))
        .map_err(|e| anyhow!("{e:?}"))?
        .label(format!("Reference at {kev:.0} keV"))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], purple.stroke_width(2)));

    if let Some(att) = report.attenuation_at_target() {
        chart
            .draw_series(dashed((e_start, att), (e_end, att), RED))
            .map_err(|e| anyhow!("{e:?}"))?
            .label(format!("Attenuation at {kev:.0} keV: {att:.2}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        let label_x = (target + 0.013 * (e_end - e_start)).min(e_end);
        chart
            .draw_series(std::iter::once(Text::new(
                format!("Attenuation: {att:.2}"),
                (label_x, (att + 0.02).min(1.03)),
                ("sans-serif", 16).into_font().style(FontStyle::Bold).color(&BLACK),
            )))
            .map_err(|e| anyhow!("{e:?}"))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 16))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("{e:?}"))?;

    Ok(())
}

/// Dash segments between two points in data coordinates.
fn dashed(from: (f64, f64), to: (f64, f64), color: RGBColor) -> Vec<PathElement<(f64, f64)>> {
    const DASHES: usize = 40;
    let step = |i: f64| {
        (
            from.0 + (to.0 - from.0) * i / DASHES as f64,
            from.1 + (to.1 - from.1) * i / DASHES as f64,
        )
    };
    (0..DASHES)
        .map(|i| {
            let i = i as f64;
            PathElement::new(vec![step(i), step(i + 0.6)], color.stroke_width(2))
        })
        .collect()
}
