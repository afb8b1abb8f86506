use crate::camera::{CameraState, CameraTransition, TransitionFrame, TransitionJob};
use crate::config::GlobeConfig;
use crate::geo::{GeoPoint, project};
use crate::marker::{MarkerController, MarkerPlacement};
use glam::Quat;
use std::time::Duration;

/// What the user picked, exposed as-is to the info panel
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub name: String,
    /// ISO date, passed through untouched
    pub date: String,
    pub geo: GeoPoint,
}

/// Everything the renderer needs from the globe for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeFrame {
    pub camera: Option<TransitionFrame>,
    /// In globe-local space; the renderer parents the marker to the globe
    pub marker: Option<MarkerPlacement>,
    /// Spin around Y applied to the globe and its atmosphere shell
    pub globe_spin: f32,
    pub orbit_enabled: bool,
}

/// Wires selection input to marker placement and the camera fly-to.
#[derive(Debug, Clone)]
pub struct GlobeScene {
    radius: f32,
    idle_spin: f32,
    spin: f32,
    selection: Option<Selection>,
    marker: MarkerController,
    camera: CameraTransition,
}

impl GlobeScene {
    pub fn new(config: &GlobeConfig) -> Self {
        Self {
            radius: config.globe.radius,
            idle_spin: config.globe.idle_spin,
            spin: 0.0,
            selection: None,
            marker: MarkerController::new(config.globe.radius, config.globe.marker_altitude),
            camera: CameraTransition::new(
                config.camera.transition_duration(),
                config.camera.framing_multiplier,
            ),
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn marker(&self) -> Option<&MarkerPlacement> {
        self.marker.placement()
    }

    pub fn is_transitioning(&self) -> bool {
        self.camera.is_active()
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn globe_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin)
    }

    /// Every call is a fresh fly-to, even for the coordinates already selected.
    pub fn select(&mut self, selection: Selection, camera: CameraState, now: Duration) -> TransitionJob {
        log::info!(
            "Selected {} ({}, {}) on {}",
            selection.name,
            selection.geo.latitude,
            selection.geo.longitude,
            selection.date
        );

        // The globe may have spun while idle, so aim at where the point is now
        let surface = self.globe_rotation() * project(selection.geo, self.radius);
        self.marker.select(selection.geo);
        self.selection = Some(selection);
        self.camera.begin(surface, camera, now)
    }

    pub fn reset(&mut self) {
        self.selection = None;
        self.marker.clear();
        self.camera.cancel();
    }

    /// Rotates the globe one frame's worth while nothing is selected.
    pub fn advance_spin(&mut self) -> f32 {
        if self.selection.is_none() {
            self.spin = (self.spin + self.idle_spin) % std::f32::consts::TAU;
        }
        self.spin
    }

    pub fn frame(&mut self, now: Duration) -> GlobeFrame {
        let camera = self.camera.tick(now);
        GlobeFrame {
            camera,
            marker: self.marker.placement().copied(),
            globe_spin: self.spin,
            orbit_enabled: !self.camera.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn london() -> Selection {
        Selection {
            name: "London".to_string(),
            date: "2024-06-01".to_string(),
            geo: GeoPoint::new(51.5, -0.12),
        }
    }

    fn start_camera() -> CameraState {
        CameraState {
            position: Vec3::new(0.0, 0.0, 4.0),
            look_at: Vec3::ZERO,
        }
    }

    #[test]
    fn test_london_end_to_end() {
        let mut scene = GlobeScene::new(&GlobeConfig::default());
        let now = Duration::from_secs(10);
        scene.select(london(), start_camera(), now);

        let point = project(GeoPoint::new(51.5, -0.12), 1.0);
        let expected_y = ((90.0_f32 - 51.5) * std::f32::consts::PI / 180.0).cos();
        assert!((point.y - expected_y).abs() < 1e-5);
        assert!((point.y - 0.622).abs() < 1e-3);

        let marker = scene.marker().copied().unwrap();
        assert!(marker.position.abs_diff_eq(point * 1.01, 1e-5));

        let mut last = None;
        for frame in 0..=60 {
            let tick = now + Duration::from_millis(frame * 1000 / 60);
            let globe = scene.frame(tick);
            assert!(!globe.orbit_enabled || frame == 60);
            last = globe.camera;
        }
        let last = last.unwrap();
        assert!(last.finished);
        assert_eq!(last.camera.position, point * 3.0);
        assert_eq!(last.camera.look_at, point);
        assert!(!scene.is_transitioning());
        assert!(scene.frame(now + Duration::from_secs(2)).orbit_enabled);
    }

    #[test]
    fn test_reselecting_same_place_flies_again() {
        let mut scene = GlobeScene::new(&GlobeConfig::default());
        scene.select(london(), start_camera(), Duration::ZERO);
        scene.frame(Duration::from_secs(1));
        assert!(!scene.is_transitioning());

        let arrived = CameraState {
            position: project(london().geo, 3.0),
            look_at: project(london().geo, 1.0),
        };
        scene.select(london(), arrived, Duration::from_secs(2));
        assert!(scene.is_transitioning());
        assert_eq!(scene.selection(), Some(&london()));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut scene = GlobeScene::new(&GlobeConfig::default());
        scene.select(london(), start_camera(), Duration::ZERO);
        scene.reset();

        assert!(scene.selection().is_none());
        assert!(scene.marker().is_none());
        let frame = scene.frame(Duration::from_millis(100));
        assert!(frame.camera.is_none());
        assert!(frame.orbit_enabled);
    }

    #[test]
    fn test_globe_spins_only_without_selection() {
        let mut scene = GlobeScene::new(&GlobeConfig::default());
        scene.advance_spin();
        scene.advance_spin();
        let spun = scene.spin();
        assert!((spun - 0.002).abs() < 1e-6);

        scene.select(london(), start_camera(), Duration::ZERO);
        scene.advance_spin();
        assert_eq!(scene.spin(), spun);
    }

    #[test]
    fn test_fly_to_follows_spun_globe() {
        let mut scene = GlobeScene::new(&GlobeConfig::default());
        for _ in 0..500 {
            scene.advance_spin();
        }
        let job = scene.select(london(), start_camera(), Duration::ZERO);

        let local = project(london().geo, 1.0);
        let world = Quat::from_rotation_y(0.5) * local;
        assert!(job.look_at.abs_diff_eq(world, 1e-3), "{} vs {}", job.look_at, world);
        assert!(job.target_position.abs_diff_eq(world * 3.0, 1e-3));

        let marker = scene.marker().copied().unwrap();
        assert!(marker.position.abs_diff_eq(local * 1.01, 1e-5));
    }
}
