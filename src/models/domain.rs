use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a caller-supplied coordinate.
///
/// These are rejected before any network call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("coordinate is not a finite number")]
    NotFinite,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a validated coordinate, rejecting NaN/infinite and
    /// out-of-range values
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ValidationError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// A single point as returned by Overpass (`center`, `geometry` vertices)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub lat: f64,
    pub lon: f64,
}

/// One building element from an Overpass response.
///
/// Overpass reports a location in one of three shapes depending on the
/// element type and output mode: a `center` point on ways/relations with
/// `out center`, raw `lat`/`lon` on nodes, or a full `geometry` vertex
/// array with `out geom`. Elements carrying none of the three are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingFeature {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub center: Option<FeaturePoint>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub geometry: Option<Vec<FeaturePoint>>,
}

impl BuildingFeature {
    /// All points that describe this building: the polygon outline when
    /// present, otherwise its single representative point.
    pub fn sample_points(&self) -> Vec<FeaturePoint> {
        if let Some(geometry) = &self.geometry {
            if !geometry.is_empty() {
                return geometry.clone();
            }
        }
        if let Some(center) = self.center {
            return vec![center];
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return vec![FeaturePoint { lat, lon }];
        }
        vec![]
    }

    pub fn has_location(&self) -> bool {
        !self.sample_points().is_empty()
    }
}

/// Outcome of one distance evaluation.
///
/// `distance_feet: None` means the widest search radius was scanned and no
/// building was found. That is a successful result (remote area), distinct
/// from a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance_feet: Option<u64>,
    pub buildings_scanned: usize,
    /// Radius in meters at which scanning stopped
    pub radius_m: u32,
}

/// Legality of discharging at a point, derived purely from the distance
/// to the nearest dwelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalityCategory {
    /// Nearest dwelling is beyond the rifle/pistol threshold
    AllFirearms,
    /// Shotguns, BB and air rifles only
    Limited,
    Illegal,
    /// No building found within the widest search radius; likely legal
    /// but unverified
    UnknownRemote,
}

impl LegalityCategory {
    /// Short advisory text shown alongside the category
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AllFirearms => "All firearms: nearest dwelling is more than 5,000 ft away",
            Self::Limited => "Shotguns, BB and air rifles only: nearest dwelling is within 5,000 ft",
            Self::Illegal => "Discharge prohibited: nearest dwelling is within 1,000 ft",
            Self::UnknownRemote => "No buildings found nearby; likely legal but unverified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.01, 0.0),
            Err(ValidationError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5),
            Err(ValidationError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn coordinate_rejects_non_finite() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(ValidationError::NotFinite)
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(ValidationError::NotFinite)
        ));
    }

    #[test]
    fn sample_points_prefers_geometry_over_center() {
        let feature = BuildingFeature {
            id: Some(1),
            center: Some(FeaturePoint { lat: 1.0, lon: 1.0 }),
            lat: None,
            lon: None,
            geometry: Some(vec![
                FeaturePoint { lat: 2.0, lon: 2.0 },
                FeaturePoint { lat: 3.0, lon: 3.0 },
            ]),
        };
        assert_eq!(feature.sample_points().len(), 2);
    }

    #[test]
    fn sample_points_falls_back_to_node_coordinates() {
        let feature = BuildingFeature {
            id: None,
            center: None,
            lat: Some(39.5),
            lon: Some(-119.8),
            geometry: None,
        };
        let points = feature.sample_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lat, 39.5);
    }

    #[test]
    fn feature_without_location_is_empty() {
        let feature = BuildingFeature {
            id: Some(7),
            center: None,
            lat: None,
            lon: None,
            geometry: Some(vec![]),
        };
        assert!(!feature.has_location());
    }
}
