//! Filament cross-section

use std::f64::consts::PI;

/// Filament modelled as a uniform solid cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilamentGeometry {
    pub diameter_mm: f64,
}

impl Default for FilamentGeometry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIAMETER_MM)
    }
}

impl FilamentGeometry {
    pub const DEFAULT_DIAMETER_MM: f64 = 1.75;

    pub fn new(diameter_mm: f64) -> Self {
        Self { diameter_mm }
    }

    pub fn cross_section_mm2(&self) -> f64 {
        let radius = self.diameter_mm / 2.0;
        PI * radius * radius
    }

    /// Volume of `length_mm` of filament in cm3
    pub fn volume_cm3(&self, length_mm: f64) -> f64 {
        self.cross_section_mm2() * length_mm / 1000.0
    }

    /// Mass in grams of `length_mm` of filament at the given density (g/cm3)
    pub fn grams(&self, length_mm: f64, density_g_per_cm3: f64) -> f64 {
        (self.volume_cm3(length_mm) * density_g_per_cm3).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_one_meter_of_pla() {
        let grams = FilamentGeometry::default().grams(1000.0, 1.24);
        assert_abs_diff_eq!(grams, 2.979, epsilon = 0.01);
    }

    #[test]
    fn test_volume_scales_with_diameter_squared() {
        let thin = FilamentGeometry::new(1.75).volume_cm3(100.0);
        let thick = FilamentGeometry::new(3.5).volume_cm3(100.0);
        assert_abs_diff_eq!(thick / thin, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_length_is_zero_grams() {
        assert_eq!(FilamentGeometry::default().grams(0.0, 1.27), 0.0);
    }
}
