//! Building route profiles from raw points or GPX documents.

use bytes::{Buf as _, Bytes};
use geo::{Distance as _, Haversine, Point};
use gpx::Gpx;

use crate::{
    errors::RouteError,
    models::{RoutePoint, RouteProfile},
};

impl RouteProfile {
    /// Builds a profile from (lat, lon, elevation) triples, accumulating haversine distance.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64, Option<f64>)>) -> Self {
        let mut cumulative = 0.0;
        let mut last_point: Option<Point> = None;

        let points = points
            .into_iter()
            .map(|(lat, lon, elevation_m)| {
                let point = Point::new(lon, lat);
                cumulative += last_point.map_or(0.0, |prev| Haversine.distance(prev, point));
                last_point = Some(point);

                RoutePoint {
                    lat,
                    lon,
                    elevation_m,
                    cumulative_distance_m: cumulative,
                }
            })
            .collect();

        Self { points }
    }

    /// Parses every track point of a GPX document into one continuous profile.
    pub fn from_gpx_bytes(content: &Bytes) -> Result<Self, RouteError> {
        let gpx: Gpx = gpx::read(content.clone().reader())
            .map_err(|e| RouteError::GpxParsing(format!("Failed to parse GPX: {e}")))?;

        let mut raw = Vec::new();
        for track in &gpx.tracks {
            for segment in &track.segments {
                for point in &segment.points {
                    raw.push((point.point().y(), point.point().x(), point.elevation));
                }
            }
        }

        // Planned routes are often exported as <rte> instead of <trk>.
        if raw.is_empty() {
            for route in &gpx.routes {
                for point in &route.points {
                    raw.push((point.point().y(), point.point().x(), point.elevation));
                }
            }
        }

        if raw.is_empty() {
            return Err(RouteError::NoTrackPoints);
        }

        Ok(Self::from_points(raw))
    }

    pub fn total_distance_m(&self) -> f64 {
        self.points
            .last()
            .map_or(0.0, |p| p.cumulative_distance_m.max(0.0))
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m() / 1000.0
    }

    /// Sum of positive elevation deltas between consecutive points that both carry elevation.
    pub fn elevation_gain_m(&self) -> f64 {
        self.points
            .windows(2)
            .filter_map(|pair| match (pair[0].elevation_m, pair[1].elevation_m) {
                (Some(a), Some(b)) if b > a => Some(b - a),
                _ => None,
            })
            .sum()
    }
}
