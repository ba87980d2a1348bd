use crate::error::AttendanceError;
use crate::model::office::{GeoPoint, OfficeLocation};

/// Mean equatorial radius used for all distance checks.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Great-circle (haversine) distance between two points, rounded to whole meters.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> u32 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    (EARTH_RADIUS_M * c).round() as u32
}

/// Distance to the office, or `OutOfRange` when it exceeds the allowed radius.
/// A point exactly on the radius is inside. Coordinates outside ±90°/±180°
/// are rejected before any distance is computed, since the haversine terms
/// wrap around.
pub fn geofence(location: GeoPoint, office: &OfficeLocation) -> Result<u32, AttendanceError> {
    if !location.is_valid() {
        return Err(AttendanceError::InvalidLocation);
    }
    let distance = distance_m(location, office.center);
    if distance > office.allowed_radius_m {
        return Err(AttendanceError::OutOfRange {
            distance,
            radius: office.allowed_radius_m,
        });
    }
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFICE: GeoPoint = GeoPoint::new(28.460315, 77.0336622);

    fn office(radius: u32) -> OfficeLocation {
        OfficeLocation {
            center: OFFICE,
            allowed_radius_m: radius,
        }
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_m(OFFICE, OFFICE), 0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let d = distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert_eq!(d, 111_319);
    }

    #[test]
    fn symmetric() {
        let other = GeoPoint::new(28.4620, 77.0350);
        assert_eq!(distance_m(OFFICE, other), distance_m(other, OFFICE));
    }

    #[test]
    fn geofence_accepts_inside_and_rejects_outside() {
        // ~0.001° of latitude is ~111 m
        let near = GeoPoint::new(OFFICE.latitude + 0.001, OFFICE.longitude);
        assert_eq!(geofence(near, &office(200)), Ok(111));

        let far = GeoPoint::new(OFFICE.latitude + 0.01, OFFICE.longitude);
        assert_eq!(
            geofence(far, &office(200)),
            Err(AttendanceError::OutOfRange {
                distance: 1113,
                radius: 200
            })
        );
    }

    #[test]
    fn wrapped_coordinates_are_rejected() {
        let wrapped = GeoPoint::new(OFFICE.latitude + 360.0, OFFICE.longitude);
        assert_eq!(distance_m(wrapped, OFFICE), 0);
        assert_eq!(
            geofence(wrapped, &office(200)),
            Err(AttendanceError::InvalidLocation)
        );

        let lon = GeoPoint::new(OFFICE.latitude, OFFICE.longitude - 360.0);
        assert_eq!(geofence(lon, &office(200)), Err(AttendanceError::InvalidLocation));

        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
    }

    #[test]
    fn boundary_is_inside() {
        let near = GeoPoint::new(OFFICE.latitude + 0.001, OFFICE.longitude);
        assert_eq!(geofence(near, &office(111)), Ok(111));
        assert!(geofence(near, &office(110)).is_err());
    }
}
