//! Planned routes over procedural terrain.

use rand::Rng;
use ratings::RouteProfile;

use crate::config::BoundingBox;
use crate::terrain::ElevationGenerator;

#[derive(Debug, Clone)]
pub struct GeneratedRoute {
    pub name: String,
    pub profile: RouteProfile,
    /// Forecast wind, absent when no weather data is attached.
    pub wind_kmh: Option<f64>,
}

/// Random-walk routes inside a region, with elevation from noise terrain.
pub struct RouteGenerator {
    bounds: BoundingBox,
    elevation: ElevationGenerator,
    /// Approximate distance between route points in meters.
    point_spacing_m: f64,
    /// Probability that a route comes with a wind forecast.
    forecast_probability: f64,
}

impl RouteGenerator {
    pub fn new(bounds: BoundingBox, elevation: ElevationGenerator) -> Self {
        Self {
            bounds,
            elevation,
            point_spacing_m: 100.0,
            forecast_probability: 0.7,
        }
    }

    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.point_spacing_m = meters;
        self
    }

    pub fn generate(&self, name: &str, distance_km: f64, rng: &mut impl Rng) -> GeneratedRoute {
        let start = self.bounds.random_point(rng);
        let path = self.generate_path(start, distance_km * 1000.0, rng);

        let wind_kmh = if rng.r#gen::<f64>() < self.forecast_probability {
            Some(rng.gen_range(0.0..60.0))
        } else {
            None
        };

        GeneratedRoute {
            name: name.to_string(),
            profile: self.elevation.profile_along(&path),
            wind_kmh,
        }
    }

    /// Coordinates only; heading drifts a little each step.
    pub fn generate_path(
        &self,
        start: (f64, f64),
        distance_m: f64,
        rng: &mut impl Rng,
    ) -> Vec<(f64, f64)> {
        let mut path = vec![start];
        let mut current = start;
        let mut total_distance = 0.0;
        let mut heading = rng.gen_range(0.0..std::f64::consts::TAU);

        while total_distance < distance_m {
            heading += rng.gen_range(-0.3..0.3);
            let step = self.point_spacing_m * rng.gen_range(0.8..1.2);

            // 1 degree of latitude is ~111 km
            let lat_delta = (step * heading.cos()) / 111_000.0;
            let lon_delta = (step * heading.sin()) / (111_000.0 * current.0.to_radians().cos());

            let (lat, lon, bounced) =
                self.apply_bounds(current.0 + lat_delta, current.1 + lon_delta, heading);
            heading = bounced;

            current = (lat, lon);
            path.push(current);
            total_distance += step;
        }

        path
    }

    /// Keeps the walk inside the region by reflecting the heading.
    fn apply_bounds(&self, lat: f64, lon: f64, heading: f64) -> (f64, f64, f64) {
        let b = &self.bounds;
        let mut new_heading = heading;

        let lat = if lat < b.min_lat {
            new_heading = std::f64::consts::PI - heading;
            b.min_lat
        } else if lat > b.max_lat {
            new_heading = std::f64::consts::PI - heading;
            b.max_lat
        } else {
            lat
        };

        let lon = if lon < b.min_lon {
            new_heading = -new_heading;
            b.min_lon
        } else if lon > b.max_lon {
            new_heading = -new_heading;
            b.max_lon
        } else {
            lon
        };

        (lat, lon, new_heading)
    }
}
