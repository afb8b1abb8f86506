use bevy::math::{Mat3, Quat, Vec2, Vec3};
use globecore::config::OrbitSettings;
use std::f32::consts::FRAC_PI_2;

/// Orbit angle per pixel of drag at rotate speed 1
const RADIANS_PER_PIXEL: f32 = 0.005;
/// Distance change per wheel line at zoom speed 1
const ZOOM_STEP: f32 = 0.5;
/// Stay just short of the poles so the view never lines up with world up
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;

pub struct OrbitInput {
    pub dragging: bool,
    pub drag_delta: Vec2,
    pub wheel_delta: f32,
}

impl OrbitInput {
    fn is_idle(&self) -> bool {
        let drag = self.dragging && self.drag_delta.length_squared() > 0.0;
        !drag && self.wheel_delta == 0.0
    }
}

pub struct CameraTransformUpdate {
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Orbit the camera around the origin from drag and wheel input.
/// Without input the transform is returned untouched, so a pose left by a
/// fly-to survives until the user grabs the globe.
pub fn calculate_orbit_transform(
    current_translation: Vec3,
    current_rotation: Quat,
    input: &OrbitInput,
    settings: &OrbitSettings,
) -> CameraTransformUpdate {
    if input.is_idle() {
        return CameraTransformUpdate {
            translation: current_translation,
            rotation: current_rotation,
        };
    }

    let distance = current_translation.length().max(f32::EPSILON);
    let mut yaw = current_translation.x.atan2(current_translation.z);
    let mut pitch = (current_translation.y / distance).clamp(-1.0, 1.0).asin();

    if input.dragging {
        yaw -= input.drag_delta.x * RADIANS_PER_PIXEL * settings.rotate_speed;
        pitch += input.drag_delta.y * RADIANS_PER_PIXEL * settings.rotate_speed;
    }
    let pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    let distance = (distance - input.wheel_delta * ZOOM_STEP * settings.zoom_speed)
        .clamp(settings.min_distance, settings.max_distance);

    let translation = Vec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        yaw.cos() * pitch.cos(),
    ) * distance;

    CameraTransformUpdate {
        translation,
        rotation: look_at_origin(translation),
    }
}

/// Rotation that points the camera's -Z at the origin with +Y kept up.
pub fn look_at_origin(position: Vec3) -> Quat {
    let back = position.normalize_or(Vec3::Z);
    let right = Vec3::Y.cross(back).normalize_or(Vec3::X);
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn no_input() -> OrbitInput {
        OrbitInput {
            dragging: false,
            drag_delta: Vec2::ZERO,
            wheel_delta: 0.0,
        }
    }

    fn start() -> (Vec3, Quat) {
        let position = Vec3::new(0.0, 0.0, 4.0);
        (position, look_at_origin(position))
    }

    #[test]
    fn test_no_input_no_change() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let rotation = Quat::from_rotation_y(0.3);

        let result = calculate_orbit_transform(position, rotation, &no_input(), &OrbitSettings::default());

        assert_eq!(result.translation, position);
        assert_eq!(result.rotation, rotation);
    }

    #[rstest]
    #[case(1.0, 3.75)] // 4.0 - 1 * 0.5 * 0.5
    #[case(-2.0, 4.5)]
    #[case(100.0, 2.0)] // clamped to min distance
    #[case(-100.0, 10.0)] // clamped to max distance
    fn test_zoom_distance(#[case] wheel_delta: f32, #[case] expected: f32) {
        let (position, rotation) = start();
        let mut input = no_input();
        input.wheel_delta = wheel_delta;

        let result = calculate_orbit_transform(position, rotation, &input, &OrbitSettings::default());

        let distance = result.translation.length();
        assert!((distance - expected).abs() < 1e-4, "distance was {}, expected {}", distance, expected);
    }

    #[test]
    fn test_drag_keeps_distance_and_faces_centre() {
        let (position, rotation) = start();
        let mut input = no_input();
        input.dragging = true;
        input.drag_delta = Vec2::new(120.0, -40.0);

        let result = calculate_orbit_transform(position, rotation, &input, &OrbitSettings::default());

        assert!((result.translation.length() - 4.0).abs() < 1e-4);
        assert_ne!(result.translation, position);
        let forward = result.rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(-result.translation.normalize(), 1e-4));
    }

    #[test]
    fn test_drag_requires_button() {
        let (position, rotation) = start();
        let mut input = no_input();
        input.drag_delta = Vec2::new(100.0, 100.0);

        let result = calculate_orbit_transform(position, rotation, &input, &OrbitSettings::default());

        assert_eq!(result.translation, position);
        assert_eq!(result.rotation, rotation);
    }

    #[rstest]
    #[case(10_000.0)]
    #[case(-10_000.0)]
    fn test_pitch_stops_short_of_poles(#[case] drag_y: f32) {
        let (position, rotation) = start();
        let mut input = no_input();
        input.dragging = true;
        input.drag_delta = Vec2::new(0.0, drag_y);

        let result = calculate_orbit_transform(position, rotation, &input, &OrbitSettings::default());

        let sin_pitch = result.translation.y / result.translation.length();
        assert!(sin_pitch.abs() <= MAX_PITCH.sin() + 1e-5);
        assert!(result.rotation.is_finite());
    }

    #[test]
    fn test_drag_right_swings_camera_left() {
        let (position, rotation) = start();
        let mut input = no_input();
        input.dragging = true;
        input.drag_delta = Vec2::new(50.0, 0.0);

        let result = calculate_orbit_transform(position, rotation, &input, &OrbitSettings::default());

        assert!(result.translation.x < 0.0);
        assert!(result.translation.y.abs() < 1e-5);
    }
}
