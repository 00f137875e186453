//! Perlin noise elevation for synthetic routes.

use noise::{NoiseFn, Perlin};
use ratings::RouteProfile;

/// Fractal Perlin terrain sampled at lat/lon coordinates.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    /// Valley floor in meters.
    base_elevation: f64,
    /// Amplitude of the variation around the base.
    height_scale: f64,
    /// Spatial frequency in noise units per degree.
    frequency: f64,
    octaves: u32,
}

impl ElevationGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1500.0,
            height_scale: 500.0,
            frequency: 40.0,
            octaves: 4,
        }
    }

    /// High mountains: large amplitude, long climbs.
    pub fn alpine(seed: u32) -> Self {
        Self {
            base_elevation: 1300.0,
            height_scale: 1100.0,
            frequency: 25.0,
            octaves: 5,
            ..Self::new(seed)
        }
    }

    /// Foothills with moderate relief.
    pub fn foothills(seed: u32) -> Self {
        Self {
            base_elevation: 1650.0,
            height_scale: 600.0,
            ..Self::new(seed)
        }
    }

    /// Low country with short sharp rises.
    pub fn rolling(seed: u32) -> Self {
        Self {
            base_elevation: 40.0,
            height_scale: 60.0,
            frequency: 120.0,
            octaves: 2,
            ..Self::new(seed)
        }
    }

    /// Elevation at a coordinate using fractal Brownian motion.
    pub fn elevation_at(&self, lat: f64, lon: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += self.perlin.get([lat * frequency, lon * frequency]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        // Normalized to -1..1
        let normalized = total / max_amplitude;
        (self.base_elevation + normalized * self.height_scale).max(0.0)
    }

    /// Route profile along a path, with elevation sampled at every coordinate.
    pub fn profile_along(&self, coords: &[(f64, f64)]) -> RouteProfile {
        RouteProfile::from_points(
            coords
                .iter()
                .map(|&(lat, lon)| (lat, lon, Some(self.elevation_at(lat, lon)))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_consistency() {
        let elev_gen = ElevationGenerator::alpine(42);
        let a = elev_gen.elevation_at(45.9, 6.1);
        let b = elev_gen.elevation_at(45.9, 6.1);
        assert!((a - b).abs() < 0.001);
    }

    #[test]
    fn test_elevation_range() {
        let elev_gen = ElevationGenerator::new(42);
        let elev = elev_gen.elevation_at(39.5, -119.8);
        assert!(elev >= elev_gen.base_elevation - elev_gen.height_scale);
        assert!(elev <= elev_gen.base_elevation + elev_gen.height_scale);
    }

    #[test]
    fn test_profile_along_path() {
        let elev_gen = ElevationGenerator::foothills(42);
        let coords = vec![(40.0, -105.3), (40.01, -105.29), (40.02, -105.28)];
        let profile = elev_gen.profile_along(&coords);

        assert_eq!(profile.points.len(), 3);
        assert!(profile.points.iter().all(|p| p.elevation_m.is_some()));
        assert!(profile.total_distance_km() > 2.0);
    }
}
