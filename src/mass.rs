//! Tiered filament mass estimation.
//!
//! The first tier that yields a value wins:
//! 1. a mass reported by the slicer (`filament used [g] = ...`)
//! 2. a length reported by the slicer, converted through material density
//! 3. the length integrated from the extrusion moves, converted the same way

use log::debug;

use crate::extrusion::integrate_extrusion;
use crate::material::{FilamentGeometry, MaterialTable};
use crate::summary::scan_filament_reports;

/// Where a mass estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassSource {
    ReportedMass,
    ReportedLength,
    SimulatedLength,
    /// No summary and no forward extrusion found
    Unresolved,
}

/// Outcome of one mass estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassEstimate {
    pub grams: f64,
    pub source: MassSource,
    /// Integrated length, when the simulation tier ran
    pub simulated_length_mm: Option<f64>,
}

/// Mass estimator over a material table and filament geometry
#[derive(Debug, Clone, Default)]
pub struct MassEstimator {
    materials: MaterialTable,
    geometry: FilamentGeometry,
}

impl MassEstimator {
    pub fn new(materials: MaterialTable, geometry: FilamentGeometry) -> Self {
        Self {
            materials,
            geometry,
        }
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn geometry(&self) -> FilamentGeometry {
        self.geometry
    }

    /// Grams of `length_mm` of filament made of `material`
    pub fn grams_for_length(&self, length_mm: f64, material: &str) -> f64 {
        self.geometry
            .grams(length_mm, self.materials.density(material))
    }

    pub fn estimate(&self, document: &str, material: &str) -> MassEstimate {
        let reports = scan_filament_reports(document);

        if let Some(grams) = reports.grams {
            debug!("using reported filament mass {:.3} g", grams);
            return MassEstimate {
                grams: grams.max(0.0),
                source: MassSource::ReportedMass,
                simulated_length_mm: None,
            };
        }

        if let Some(length_mm) = reports.millimeters {
            debug!("using reported filament length {:.3} mm", length_mm);
            return MassEstimate {
                grams: self.grams_for_length(length_mm, material),
                source: MassSource::ReportedLength,
                simulated_length_mm: None,
            };
        }

        let length_mm = integrate_extrusion(document);
        if length_mm > 0.0 {
            MassEstimate {
                grams: self.grams_for_length(length_mm, material),
                source: MassSource::SimulatedLength,
                simulated_length_mm: Some(length_mm),
            }
        } else {
            MassEstimate {
                grams: 0.0,
                source: MassSource::Unresolved,
                simulated_length_mm: Some(length_mm),
            }
        }
    }
}
