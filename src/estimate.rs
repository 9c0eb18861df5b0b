//! Estimation orchestrator.
//!
//! Combines the mass and time estimators over one document, applies the
//! copy count and assembles the final [`EstimationResult`].

use log::{info, warn};
use serde::Serialize;

use crate::error::{EstimateError, Result};
use crate::extrusion::integrate_extrusion;
use crate::mass::{MassEstimator, MassSource};
use crate::summary::parse_print_time;

/// Number of leading document lines attached to zero-mass diagnostics
pub const DIAGNOSTIC_HEADER_LINES: usize = 60;

/// Per-request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateParams {
    pub material: String,
    /// Values below 1 are treated as 1
    pub copies: i64,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            material: "PLA".to_string(),
            copies: 1,
        }
    }
}

impl EstimateParams {
    pub fn new(material: impl Into<String>, copies: i64) -> Self {
        Self {
            material: material.into(),
            copies,
        }
    }

    pub fn effective_copies(&self) -> u64 {
        self.copies.max(1).unsigned_abs()
    }
}

/// Troubleshooting data attached when no filament could be accounted for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub raw_header_lines: Vec<String>,
    pub computed_extrusion_length_mm: f64,
}

/// Final estimate for a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    pub print_time_seconds: u64,
    pub filament_grams: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Stateless estimation entry point; one instance can serve any number of documents
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    mass: MassEstimator,
}

impl Estimator {
    pub fn new(mass: MassEstimator) -> Self {
        Self { mass }
    }

    pub fn mass_estimator(&self) -> &MassEstimator {
        &self.mass
    }

    /// Estimate print time and filament mass for `document`.
    ///
    /// Fails with [`EstimateError::MissingTimeSummary`] when the document has
    /// no printing time summary; a zero mass is reported with diagnostics.
    pub fn estimate(&self, document: &str, params: &EstimateParams) -> Result<EstimationResult> {
        let mass = self.mass.estimate(document, &params.material);
        let print_time = parse_print_time(document).ok_or(EstimateError::MissingTimeSummary)?;

        let mut grams = mass.grams;
        let mut diagnostics = None;

        if grams == 0.0 {
            // A summary may report zero while the moves still feed filament
            let length_mm = match (mass.source, mass.simulated_length_mm) {
                (MassSource::Unresolved, Some(length_mm)) => length_mm,
                _ => integrate_extrusion(document),
            };

            if length_mm > 0.0 {
                grams = self.mass.grams_for_length(length_mm, &params.material);
            } else {
                warn!("no filament usage found; attaching diagnostics");
                diagnostics = Some(Diagnostics {
                    raw_header_lines: document
                        .lines()
                        .take(DIAGNOSTIC_HEADER_LINES)
                        .map(str::to_string)
                        .collect(),
                    computed_extrusion_length_mm: length_mm,
                });
            }
        }

        let copies = params.effective_copies();
        let result = EstimationResult {
            print_time_seconds: print_time.saturating_mul(copies),
            filament_grams: round_to_hundredths(grams * copies as f64),
            diagnostics,
        };

        info!(
            "estimate for {} x {}: {} s, {:.2} g ({:?})",
            copies, params.material, result.print_time_seconds, result.filament_grams, mass.source
        );

        Ok(result)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
