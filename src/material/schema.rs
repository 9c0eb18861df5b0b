//! Material Schema Types

use serde::Deserialize;

/// Root material file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MaterialFile {
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
}

/// One `[[materials]]` entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    /// Density in g/cm3
    pub density: f64,
    pub description: Option<String>,
}

/// Runtime material profile
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProfile {
    pub name: String,
    pub density_g_per_cm3: f64,
}

impl MaterialProfile {
    pub fn new(name: impl Into<String>, density_g_per_cm3: f64) -> Self {
        Self {
            name: name.into(),
            density_g_per_cm3,
        }
    }
}

impl TryFrom<MaterialDef> for MaterialProfile {
    type Error = String;

    fn try_from(def: MaterialDef) -> Result<Self, Self::Error> {
        if def.name.trim().is_empty() {
            return Err("material name must not be empty".to_string());
        }
        if !def.density.is_finite() || def.density <= 0.0 {
            return Err(format!(
                "material '{}' has invalid density {}",
                def.name, def.density
            ));
        }
        Ok(Self::new(def.name.trim(), def.density))
    }
}
