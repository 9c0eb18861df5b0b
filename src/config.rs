//! Configuration management for the estimator binary.
//!
//! Handles:
//! - Command-line argument parsing
//! - Input selection (G-code on disk, or a model request to slice)
//! - Material table assembly (built-ins, user config, explicit file)
//! - Slicer location and profile directory

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::estimate::{EstimateParams, Estimator};
use crate::mass::MassEstimator;
use crate::material::{FilamentGeometry, MaterialTable};
use crate::request::EstimateRequest;

/// Command-line arguments for the estimator
#[derive(Debug, Parser)]
#[command(name = "gcode-cost")]
#[command(about = "Estimate filament mass and print time from G-code")]
#[command(version)]
pub struct Args {
    /// G-code file, or an STL/3MF model (path or URL) to slice first
    #[arg(required_unless_present = "request", conflicts_with = "request")]
    pub input: Option<String>,

    #[arg(long, help = "JSON estimation request (object or bare URL string)")]
    pub request: Option<String>,

    #[arg(long, default_value = "PLA", help = "Filament material (e.g., 'PLA', 'PETG')")]
    pub material: String,

    #[arg(long, default_value = "standard", help = "Quality profile used when slicing")]
    pub quality: String,

    #[arg(long, help = "Enable support material when slicing")]
    pub supports: bool,

    #[arg(long, default_value_t = 1, allow_negative_numbers = true, help = "Number of copies")]
    pub copies: i64,

    #[arg(long, default_value = "profiles", help = "Directory containing slicer profiles")]
    pub profiles_dir: PathBuf,

    #[arg(long, default_value = "prusa-slicer", help = "Slicer executable")]
    pub slicer: PathBuf,

    #[arg(long, help = "TOML file with additional material densities")]
    pub materials_file: Option<PathBuf>,

    #[arg(long, default_value_t = FilamentGeometry::DEFAULT_DIAMETER_MM, help = "Filament diameter in mm")]
    pub filament_diameter: f64,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// What the binary was asked to estimate
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// G-code on disk, estimated with [`Config::params`]
    GCode(PathBuf),
    /// A model to fetch, slice and estimate
    Model(EstimateRequest),
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub source: InputSource,
    pub params: EstimateParams,
    pub profiles_dir: PathBuf,
    pub slicer: PathBuf,
    /// Material files merged over the built-ins, in order
    pub material_files: Vec<PathBuf>,
    pub filament_diameter_mm: f64,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        ensure!(
            args.filament_diameter.is_finite() && args.filament_diameter > 0.0,
            "filament diameter must be positive, got {}",
            args.filament_diameter
        );

        let mut material_files = Vec::new();

        // User config directory first so an explicit file wins
        if let Some(config_dir) = dirs::config_dir() {
            let user_file = config_dir.join("gcode-cost").join("materials.toml");
            if user_file.is_file() {
                material_files.push(user_file);
            }
        }

        if let Some(custom_file) = args.materials_file {
            material_files.push(custom_file);
        }

        let source = match (args.request, args.input) {
            (Some(body), _) => InputSource::Model(
                EstimateRequest::from_json(&body).context("invalid --request body")?,
            ),
            (None, Some(input)) if is_gcode_path(Path::new(&input)) => {
                InputSource::GCode(PathBuf::from(input))
            }
            (None, Some(input)) => InputSource::Model(EstimateRequest {
                file_url: input,
                material: args.material.clone(),
                quality: args.quality,
                supports: args.supports,
                copies: args.copies,
            }),
            (None, None) => anyhow::bail!("an input file or --request is required"),
        };

        Ok(Config {
            source,
            params: EstimateParams::new(args.material, args.copies),
            profiles_dir: args.profiles_dir,
            slicer: args.slicer,
            material_files,
            filament_diameter_mm: args.filament_diameter,
            log_level: args.log_level,
        })
    }

    /// Built-in materials plus every configured material file
    pub fn material_table(&self) -> Result<MaterialTable> {
        let mut table = MaterialTable::builtin();
        for path in &self.material_files {
            table.load_file(path)?;
        }
        Ok(table)
    }

    pub fn estimator(&self) -> Result<Estimator> {
        let geometry = FilamentGeometry::new(self.filament_diameter_mm);
        Ok(Estimator::new(MassEstimator::new(
            self.material_table()?,
            geometry,
        )))
    }
}

fn is_gcode_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gcode") || ext.eq_ignore_ascii_case("gco"))
}
