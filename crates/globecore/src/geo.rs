//! Latitude/longitude to scene space.
//!
//! Convention: `phi = (90 - lat)`, `theta = (lon + 90)` in radians, so the
//! north pole is +Y and (0°, 0°) lands on +Z. [`surface_uv`] is derived from the
//! same mapping and is what the globe mesh uses for its texture coordinates,
//! which keeps markers and texture aligned.

use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoPoint {
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Point on a sphere of `radius` for the given coordinates.
///
/// Inputs are not clamped; the caller is responsible for passing valid ranges.
pub fn project(geo: GeoPoint, radius: f32) -> Vec3 {
    let phi = (90.0 - geo.latitude).to_radians();
    let theta = (geo.longitude + 90.0).to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Inverse of [`project`] for any non-zero point. Longitude is in (-180, 180].
pub fn unproject(point: Vec3) -> GeoPoint {
    let radius = point.length();
    let phi = (point.y / radius).clamp(-1.0, 1.0).acos();
    let theta = point.z.atan2(point.x);

    let latitude = 90.0 - phi.to_degrees();
    let mut longitude = theta.to_degrees() - 90.0;
    if longitude <= -180.0 {
        longitude += 360.0;
    }

    GeoPoint::new(latitude, longitude)
}

/// Camera position that frames `point` from outside the globe.
pub fn framing_position(point: Vec3, multiplier: f32) -> Vec3 {
    point * multiplier
}

/// Equirectangular texture coordinate for a direction on the globe.
/// `u` runs west to east from -180°, `v` runs north to south.
pub fn surface_uv(direction: Vec3) -> Vec2 {
    let geo = unproject(direction);
    geo_uv(geo)
}

pub fn geo_uv(geo: GeoPoint) -> Vec2 {
    Vec2::new(
        (geo.longitude + 180.0) / 360.0,
        (90.0 - geo.latitude) / 180.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f32 = 1e-4;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(51.5, -0.12)]
    #[case(-33.87, 151.21)]
    #[case(40.71, -74.0)]
    #[case(89.0, 179.0)]
    #[case(-89.0, -179.0)]
    #[case(12.5, 180.0)]
    fn test_unproject_recovers_coordinates(#[case] lat: f32, #[case] lon: f32) {
        let point = project(GeoPoint::new(lat, lon), 2.5);
        let back = unproject(point);

        assert!((back.latitude - lat).abs() < 1e-3, "lat {} vs {}", back.latitude, lat);
        assert!((back.longitude - lon).abs() < 1e-3, "lon {} vs {}", back.longitude, lon);
    }

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    #[case(3.0)]
    #[case(100.0)]
    fn test_magnitude_equals_radius(#[case] radius: f32) {
        for lat in [-90.0, -45.0, 0.0, 30.0, 90.0] {
            for lon in [-180.0, -90.0, 0.0, 45.0, 180.0] {
                let point = project(GeoPoint::new(lat, lon), radius);
                assert!((point.length() - radius).abs() < EPS * radius);
            }
        }
    }

    #[test]
    fn test_origin_of_coordinates_faces_positive_z() {
        let point = project(GeoPoint::new(0.0, 0.0), 1.0);
        assert!(point.abs_diff_eq(Vec3::Z, EPS), "{point}");
    }

    #[test]
    fn test_north_pole_is_up() {
        let point = project(GeoPoint::new(90.0, 0.0), 1.0);
        assert!(point.abs_diff_eq(Vec3::Y, EPS), "{point}");
    }

    #[test]
    fn test_london_height_matches_polar_angle() {
        let point = project(GeoPoint::new(51.5, -0.12), 1.0);
        let expected = ((90.0_f32 - 51.5).to_radians()).cos();
        assert!((point.y - expected).abs() < EPS);
        assert!((point.y - 0.6225).abs() < 1e-3);
    }

    #[test]
    fn test_framing_scales_from_centre() {
        let point = Vec3::new(0.2, 0.6, 0.7);
        assert_eq!(framing_position(point, 3.0), point * 3.0);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.5, 0.5)]
    #[case(0.0, -90.0, 0.25, 0.5)]
    #[case(45.0, 90.0, 0.75, 0.25)]
    #[case(-60.0, 120.0, 0.8333, 0.8333)]
    fn test_surface_uv_follows_projection(
        #[case] lat: f32,
        #[case] lon: f32,
        #[case] u: f32,
        #[case] v: f32,
    ) {
        let uv = surface_uv(project(GeoPoint::new(lat, lon), 1.0));
        assert!((uv.x - u).abs() < 1e-3, "u {} vs {}", uv.x, u);
        assert!((uv.y - v).abs() < 1e-3, "v {} vs {}", uv.y, v);
    }
}
