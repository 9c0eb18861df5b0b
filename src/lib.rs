//! G-code Cost Estimator
//!
//! Derives filament mass and print duration from slicer G-code output.
//!
//! This library provides:
//! - Line tokenization of G-code
//! - Extrusion-axis integration (absolute/relative modes, `G92` resets)
//! - Slicer summary parsing (filament reports, printing time)
//! - Tiered mass estimation with material densities
//! - Request validation and an external slicer driver
//! - A request pipeline: fetch, slice, estimate

pub mod config;
pub mod error;
pub mod estimate;
pub mod extrusion;
pub mod mass;
pub mod material;
pub mod parser;
pub mod pipeline;
pub mod request;
pub mod slicer;
pub mod summary;

pub use error::{EstimateError, FaultClass};
pub use estimate::{Diagnostics, EstimateParams, EstimationResult, Estimator};
pub use extrusion::integrate_extrusion;
pub use mass::{MassEstimate, MassEstimator, MassSource};
pub use material::{FilamentGeometry, MaterialProfile, MaterialTable};
pub use parser::{parse_line, ParsedLine};
pub use pipeline::process_request;
pub use request::EstimateRequest;
pub use summary::{parse_filament_report, parse_print_time, FilamentReport};
