use std::path::Path;

use xatten_data::{ElementRecord, MassAttenuationRecord, MaterialRecord, VersionRecord};

pub fn parse_version(path: &Path) -> Vec<VersionRecord> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|line| !line.starts_with('#') && line.trim().len() >= 3)
        .filter_map(|line| {
            let parts: Vec<&str> = line.splitn(3, "//").collect();
            (parts.len() == 3).then(|| VersionRecord {
                tag: parts[0].trim().to_string(),
                date: parts[1].trim().to_string(),
                notes: parts[2].trim().to_string(),
            })
        })
        .collect()
}

/// `elemental_data.txt`: `Z  symbol  name  molar_mass  density` per line.
pub fn parse_elements(path: &Path) -> Vec<ElementRecord> {
    let content = std::fs::read_to_string(path).expect("failed to read elemental_data.txt");
    parse_element_lines(&content)
}

fn parse_element_lines(content: &str) -> Vec<ElementRecord> {
    let mut records = Vec::new();
    for line in content.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 5 {
            records.push(ElementRecord {
                atomic_number: parts[0].parse().expect("atomic number"),
                symbol: parts[1].to_string(),
                name: parts[2].to_string(),
                molar_mass: parts[3].parse().expect("molar mass"),
                density: parts[4].parse().expect("density"),
            });
        }
    }
    records
}

/// Every `<material>.dat` in `dir`: two columns, energy (eV) and µ/ρ (cm²/g).
pub fn parse_compound_tables(dir: &Path) -> Vec<MassAttenuationRecord> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .expect("failed to list compound tables")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "dat"))
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let material = path
                .file_stem()
                .and_then(|s| s.to_str())
                .expect("utf-8 file name")
                .to_string();
            let content = std::fs::read_to_string(path)
                .unwrap_or_else(|_| panic!("failed to read {:?}", path));
            parse_two_column_table(material, &content)
        })
        .collect()
}

fn parse_two_column_table(material: String, content: &str) -> MassAttenuationRecord {
    let mut energy = Vec::new();
    let mut mu_rho = Vec::new();
    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let words: Vec<f64> = line
            .split_whitespace()
            .filter_map(|w| w.parse().ok())
            .collect();
        if words.len() >= 2 {
            energy.push(words[0]);
            mu_rho.push(words[1]);
        }
    }
    MassAttenuationRecord {
        material,
        energy,
        mu_rho,
    }
}

/// `materials.dat`: `name | density | categories | formula`, or the older
/// three-field `name | formula | density` layout.
pub fn parse_materials(path: &Path) -> Vec<MaterialRecord> {
    let content = std::fs::read_to_string(path).expect("failed to read materials.dat");
    parse_material_lines(&content)
}

fn parse_material_lines(content: &str) -> Vec<MaterialRecord> {
    let mut records = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.len() <= 2 || line.starts_with('#') {
            continue;
        }
        let words: Vec<&str> = line.split('|').map(str::trim).collect();
        let (density, formula) = match words.as_slice() {
            [_, density, _, formula] => (density.parse().ok(), *formula),
            [_, a, b] => match a.parse::<f64>() {
                Ok(d) => (Some(d), *b),
                Err(_) => (b.parse().ok(), *a),
            },
            _ => continue,
        };
        let Some(density) = density else {
            eprintln!("  skipping material line: {line}");
            continue;
        };
        records.push(MaterialRecord {
            name: words[0].to_lowercase(),
            formula: formula.to_string(),
            density,
        });
    }
    records
}
