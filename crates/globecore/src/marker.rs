use crate::geo::{GeoPoint, project};
use glam::{Quat, Vec3};

/// Where the location pin sits and how it is oriented
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    pub geo: GeoPoint,
    pub position: Vec3,
    /// Maps the pin's local +Y onto the outward surface normal
    pub rotation: Quat,
}

/// Orientation whose local +Y points away from the globe centre through `position`.
///
/// Same result as aiming the pin at the origin and tipping it 90° about its
/// local X axis, but well defined at the poles.
pub fn outward_rotation(position: Vec3) -> Quat {
    let outward = position.normalize_or(Vec3::Y);
    Quat::from_rotation_arc(Vec3::Y, outward)
}

/// Owns the single location marker. Absent until the first selection, then
/// moved in place on every later one.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerController {
    globe_radius: f32,
    altitude: f32,
    placement: Option<MarkerPlacement>,
}

impl MarkerController {
    pub fn new(globe_radius: f32, altitude: f32) -> Self {
        Self {
            globe_radius,
            altitude,
            placement: None,
        }
    }

    pub fn select(&mut self, geo: GeoPoint) -> MarkerPlacement {
        let position = project(geo, self.globe_radius * self.altitude);
        let placement = MarkerPlacement {
            geo,
            position,
            rotation: outward_rotation(position),
        };
        self.placement = Some(placement);
        placement
    }

    pub fn clear(&mut self) {
        self.placement = None;
    }

    pub fn placement(&self) -> Option<&MarkerPlacement> {
        self.placement.as_ref()
    }
}
