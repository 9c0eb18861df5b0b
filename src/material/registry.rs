//! Material Table
//!
//! In-memory, case-insensitive material lookup. Unknown names resolve to
//! PLA so an estimate is always possible.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use super::schema::{MaterialFile, MaterialProfile};

/// Material used when a requested name is unknown
pub const FALLBACK_MATERIAL: &str = "PLA";
const FALLBACK_DENSITY: f64 = 1.24;

/// Case-insensitive material registry
#[derive(Debug, Clone)]
pub struct MaterialTable {
    profiles: HashMap<String, MaterialProfile>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialTable {
    /// Empty table; lookups still fall back to PLA density
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Table holding the embedded material definitions
    pub fn builtin() -> Self {
        let mut table = Self::new();

        let embedded_toml = include_str!("../../resources/materials.toml");
        match table.merge_toml(embedded_toml) {
            Ok(count) => log::debug!("loaded {} built-in materials", count),
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded materials: {}. Using minimal fallback.",
                    e
                );
                table.add_minimal_materials();
            }
        }

        table
    }

    fn add_minimal_materials(&mut self) {
        self.add(MaterialProfile::new(FALLBACK_MATERIAL, FALLBACK_DENSITY));
        self.add(MaterialProfile::new("PETG", 1.27));
    }

    /// Add or replace a profile
    pub fn add(&mut self, profile: MaterialProfile) {
        self.profiles.insert(key(&profile.name), profile);
    }

    /// Merge `[[materials]]` entries from TOML text, returning how many were added
    pub fn merge_toml(&mut self, content: &str) -> Result<usize> {
        let file: MaterialFile = toml::from_str(content).context("invalid material TOML")?;

        let profiles = file
            .materials
            .into_iter()
            .map(MaterialProfile::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| anyhow!(e))?;

        let count = profiles.len();
        for profile in profiles {
            self.add(profile);
        }
        Ok(count)
    }

    /// Merge a material file from disk, overriding entries with the same name
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read material file {}", path.display()))?;
        let count = self
            .merge_toml(&content)
            .with_context(|| format!("failed to load material file {}", path.display()))?;

        log::info!("loaded {} materials from {}", count, path.display());
        Ok(count)
    }

    /// Exact (case-insensitive) lookup
    pub fn get(&self, name: &str) -> Option<&MaterialProfile> {
        self.profiles.get(&key(name))
    }

    /// Density in g/cm3 for `name`, falling back to PLA for unknown names
    pub fn density(&self, name: &str) -> f64 {
        if let Some(profile) = self.get(name) {
            return profile.density_g_per_cm3;
        }

        log::debug!(
            "unknown material '{}', using {} density",
            name,
            FALLBACK_MATERIAL
        );
        self.get(FALLBACK_MATERIAL)
            .map_or(FALLBACK_DENSITY, |p| p.density_g_per_cm3)
    }

    /// List all known material names
    pub fn list_materials(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.values().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
