//! Filament materials
//!
//! Density lookup by material name plus the cylinder model used to turn
//! a filament length into a mass.

pub mod geometry;
pub mod registry;
pub mod schema;

pub use geometry::FilamentGeometry;
pub use registry::MaterialTable;
pub use schema::{MaterialDef, MaterialFile, MaterialProfile};
