//! Material files loaded from disk and wired through the configuration
use std::fs;

use clap::Parser;
use gcode_cost::config::{Args, Config};
use gcode_cost::{EstimateParams, MaterialTable};
use tempfile::TempDir;

fn write_materials(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("materials.toml");
    fs::write(&path, content).expect("write materials file");
    path
}

#[test]
fn test_load_material_file() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_materials(
        &dir,
        r#"
[[materials]]
name = "ABS"
density = 1.04

[[materials]]
name = "ASA"
density = 1.07
"#,
    );

    let mut table = MaterialTable::builtin();
    let count = table.load_file(&path).expect("load materials");

    assert_eq!(count, 2);
    assert_eq!(table.density("abs"), 1.04);
    assert_eq!(table.density("ASA"), 1.07);
    assert_eq!(table.density("PLA"), 1.24);
}

#[test]
fn test_invalid_material_file_names_the_path() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_materials(&dir, "[[materials]]\nname = \"ABS\"\n");

    let err = MaterialTable::builtin().load_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("materials.toml"));
}

#[test]
fn test_missing_material_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let result = MaterialTable::builtin().load_file(&dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_estimator_uses_custom_density() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_materials(
        &dir,
        "[[materials]]\nname = \"HEAVY\"\ndensity = 2.48\n",
    );

    let args = Args::try_parse_from([
        "gcode-cost",
        "part.gcode",
        "--materials-file",
        path.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");
    let config = Config::from_args(args).expect("create config");
    let estimator = config.estimator().expect("create estimator");

    let doc = "; filament used [mm] = 1000\n; estimated printing time = 1m\n";
    let pla = estimator
        .estimate(doc, &EstimateParams::new("PLA", 1))
        .expect("estimate PLA");
    let heavy = estimator
        .estimate(doc, &EstimateParams::new("heavy", 1))
        .expect("estimate HEAVY");

    // Twice the density of PLA
    assert!((heavy.filament_grams - 2.0 * pla.filament_grams).abs() <= 0.02);
}

#[test]
fn test_filament_diameter_option_changes_mass() {
    let args = Args::try_parse_from(["gcode-cost", "part.gcode", "--filament-diameter", "2.85"])
        .expect("parse args");
    let estimator = Config::from_args(args)
        .expect("create config")
        .estimator()
        .expect("create estimator");

    let doc = "; filament used [mm] = 1000\n; estimated printing time = 1m\n";
    let result = estimator
        .estimate(doc, &EstimateParams::default())
        .expect("estimate");

    // pi * 1.425^2 * 1000 / 1000 * 1.24
    assert!((result.filament_grams - 7.91).abs() <= 0.01);
}
