use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[schema(example = 28.460315)]
    pub latitude: f64,
    #[schema(example = 77.0336622)]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within ±90° and longitude within ±180°.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Fixed office reference point and the radius inside which punches are accepted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OfficeLocation {
    pub center: GeoPoint,
    pub allowed_radius_m: u32,
}
