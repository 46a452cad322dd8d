mod elam;
mod parsers;

use std::io::Write;
use std::path::{Path, PathBuf};

use xatten_data::AttenuationDatabase;

/// Usage: `xatten-generate [DATA_SOURCES_DIR] [OUTPUT_FILE] [MATERIALS_FILE]`
///
/// Defaults to `../XrayDB/data_sources`, `../attenuation.bin.zst` and the
/// `materials.dat` shipped in the XrayDB python package, relative to this
/// crate.
fn main() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crate lives inside the workspace")
        .to_path_buf();
    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace.join("XrayDB").join("data_sources"));
    let out_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace.join("attenuation.bin.zst"));
    let materials_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("..").join("python").join("xraydb").join("materials.dat"));

    if !data_dir.exists() {
        eprintln!(
            "Error: XrayDB data_sources directory not found at {:?}",
            data_dir
        );
        eprintln!("Clone the upstream repo: git clone https://github.com/xraypy/XrayDB.git XrayDB");
        std::process::exit(1);
    }

    println!("Parsing raw data files from {:?}...", data_dir);

    let version = parsers::parse_version(&data_dir.join("Version.dat"));
    println!("  Version: {} entries", version.len());

    let elements = parsers::parse_elements(&data_dir.join("elemental_data.txt"));
    println!("  Elements: {} entries", elements.len());

    let elam = elam::parse_elam(&data_dir.join("elam.dat"));
    println!("  Elam cross sections: {} elements", elam.len());

    if !materials_path.exists() {
        eprintln!("Error: materials.dat not found at {:?}", materials_path);
        eprintln!("Pass its path as the third argument.");
        std::process::exit(1);
    }
    let materials = parsers::parse_materials(&materials_path);
    println!("  Named materials: {} entries", materials.len());

    // measured tables that override the Elam sum for a named material
    let compound_dir = data_dir.join("compounds");
    let mass_attenuation = if compound_dir.is_dir() {
        parsers::parse_compound_tables(&compound_dir)
    } else {
        Vec::new()
    };
    println!("  Tabulated µ/ρ: {} materials", mass_attenuation.len());

    let db = AttenuationDatabase {
        version,
        elements,
        mass_attenuation,
        elam,
        materials,
    };

    println!("\nSerializing with postcard...");
    let serialized = postcard::to_allocvec(&db).expect("postcard serialization failed");
    println!(
        "  Serialized size: {} bytes ({:.2} MB)",
        serialized.len(),
        serialized.len() as f64 / 1_048_576.0
    );

    println!("Compressing with zstd (level 19)...");
    let compressed = zstd::encode_all(&serialized[..], 19).expect("zstd compression failed");
    println!(
        "  Compressed size: {} bytes ({:.2} MB)",
        compressed.len(),
        compressed.len() as f64 / 1_048_576.0
    );

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create output directory");
    }
    let mut f = std::fs::File::create(&out_path).expect("failed to create output file");
    f.write_all(&compressed)
        .expect("failed to write compressed data");
    println!("\nWrote {:?}", out_path);

    println!("Verifying round-trip deserialization...");
    let decompressed = zstd::decode_all(&compressed[..]).expect("zstd decompression failed");
    assert_eq!(decompressed.len(), serialized.len());
    let db2: AttenuationDatabase =
        postcard::from_bytes(&decompressed).expect("postcard deserialization failed");
    assert_eq!(db2.elam.len(), db.elam.len());
    assert_eq!(db2.materials.len(), db.materials.len());
    println!("  Round-trip OK!");
}
