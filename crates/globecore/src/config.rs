use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH: &str = "globe_config.toml";

static CONFIG: OnceLock<Mutex<GlobeConfig>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid [{section}] settings: {reason}")]
    Invalid { section: &'static str, reason: String },
}

/// Get a copy of the current configuration, loading it from `globe_config.toml`
/// on first use. A missing or broken file falls back to the built-in defaults.
pub fn get_config() -> GlobeConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(load_or_default(CONFIG_PATH)));
    match config_mutex.lock() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn reload_config() {
    let new_config = load_or_default(CONFIG_PATH);
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    match config_mutex.lock() {
        Ok(mut config) => *config = new_config,
        Err(poisoned) => *poisoned.into_inner() = new_config,
    }
}

fn load_or_default(path: &str) -> GlobeConfig {
    match GlobeConfig::load_from_file(path) {
        Ok(config) => {
            log::info!("Loaded globe config from {path}");
            config.sanitized()
        }
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{path} not found, using default globe config");
            GlobeConfig::default()
        }
        Err(err) => {
            log::warn!("Ignoring {path}: {err}");
            GlobeConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub globe: GlobeSettings,
    pub camera: CameraSettings,
    pub orbit: OrbitSettings,
    pub clouds: CloudSettings,
    pub lightning: LightningSettings,
    pub compositor: CompositorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeSettings {
    pub radius: f32,
    pub segments: u32,
    /// Marker sits this factor above the surface to avoid z-fighting
    pub marker_altitude: f32,
    pub atmosphere_radius: f32,
    /// Radians per frame while nothing is selected
    pub idle_spin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub transition_ms: u64,
    pub framing_multiplier: f32,
    pub initial_distance: f32,
    pub fov_degrees: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    pub count: usize,
    pub half_extent_xz: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub noise_amplitude: f32,
    pub noise_spatial_scale: f32,
    pub noise_time_scale: f32,
    /// Fraction of the remaining glow distance covered each frame
    pub glow_smoothing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningSettings {
    pub check_interval_ms: u64,
    pub spawn_probability: f64,
    pub decay_per_frame: f32,
    /// Bolts start this far below the cloud centre
    pub origin_drop: f32,
    pub main_length: f32,
    pub min_branches: usize,
    pub max_branches: usize,
    pub min_branch_length: f32,
    pub max_branch_length: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    pub ambient_intensity: f32,
    pub directional_position: [f32; 3],
    pub directional_intensity: f32,
    pub point_position: [f32; 3],
    pub point_intensity: f32,
    pub fog_color: [f32; 3],
    pub fog_start: f32,
    pub fog_end: f32,
    pub bloom_intensity: f32,
    pub bloom_threshold: f32,
    pub bloom_smoothing: f32,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 64,
            marker_altitude: 1.01,
            atmosphere_radius: 1.1,
            idle_spin: 0.001,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            transition_ms: 1000,
            framing_multiplier: 3.0,
            initial_distance: 4.0,
            fov_degrees: 45.0,
        }
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 10.0,
            rotate_speed: 0.5,
            zoom_speed: 0.5,
        }
    }
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            count: 50,
            half_extent_xz: 15.0,
            min_y: -5.0,
            max_y: 15.0,
            min_scale: 0.3,
            max_scale: 1.0,
            bob_amplitude: 0.05,
            bob_frequency: 0.5,
            noise_amplitude: 0.02,
            noise_spatial_scale: 0.1,
            noise_time_scale: 0.1,
            glow_smoothing: 0.1,
        }
    }
}

impl Default for LightningSettings {
    fn default() -> Self {
        Self {
            check_interval_ms: 800,
            spawn_probability: 0.6,
            decay_per_frame: 0.1,
            origin_drop: 0.5,
            main_length: 4.0,
            min_branches: 3,
            max_branches: 5,
            min_branch_length: 1.0,
            max_branch_length: 2.0,
        }
    }
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_position: [10.0, 10.0, 5.0],
            directional_intensity: 1.0,
            point_position: [-10.0, -10.0, -5.0],
            point_intensity: 0.5,
            // #1e293b
            fog_color: [0.118, 0.161, 0.231],
            fog_start: 5.0,
            fog_end: 30.0,
            bloom_intensity: 2.0,
            bloom_threshold: 0.1,
            bloom_smoothing: 0.9,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            globe: GlobeSettings::default(),
            camera: CameraSettings::default(),
            orbit: OrbitSettings::default(),
            clouds: CloudSettings::default(),
            lightning: LightningSettings::default(),
            compositor: CompositorSettings::default(),
        }
    }
}

impl GlobeConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GlobeConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl GlobeConfig {
    /// Replace every section that fails validation with its defaults, keeping the rest.
    pub fn sanitized(mut self) -> Self {
        if let Err(err) = self.globe.validate() {
            log::warn!("{err}, using defaults");
            self.globe = GlobeSettings::default();
        }
        if let Err(err) = self.orbit.validate() {
            log::warn!("{err}, using defaults");
            self.orbit = OrbitSettings::default();
        }
        if let Err(err) = self.clouds.validate() {
            log::warn!("{err}, using defaults");
            self.clouds = CloudSettings::default();
        }
        if let Err(err) = self.lightning.validate() {
            log::warn!("{err}, using defaults");
            self.lightning = LightningSettings::default();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.globe.validate()?;
        self.orbit.validate()?;
        self.clouds.validate()?;
        self.lightning.validate()
    }
}

fn invalid(section: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        section,
        reason: reason.into(),
    }
}

/// `min < max` with both ends finite. NaN fails.
fn ordered(min: f32, max: f32) -> bool {
    min.is_finite() && max.is_finite() && min < max
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl GlobeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.radius) {
            return Err(invalid("globe", format!("radius must be positive, got {}", self.radius)));
        }
        if self.segments < 3 {
            return Err(invalid("globe", format!("segments must be at least 3, got {}", self.segments)));
        }
        Ok(())
    }
}

impl OrbitSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.min_distance) || !ordered(self.min_distance, self.max_distance) {
            return Err(invalid(
                "orbit",
                format!("need 0 < min_distance < max_distance, got {} and {}", self.min_distance, self.max_distance),
            ));
        }
        Ok(())
    }
}

impl CloudSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.half_extent_xz) {
            return Err(invalid("clouds", format!("half_extent_xz must be positive, got {}", self.half_extent_xz)));
        }
        if !ordered(self.min_y, self.max_y) {
            return Err(invalid("clouds", format!("min_y {} must be below max_y {}", self.min_y, self.max_y)));
        }
        if !positive(self.min_scale) || !ordered(self.min_scale, self.max_scale) {
            return Err(invalid(
                "clouds",
                format!("need 0 < min_scale < max_scale, got {} and {}", self.min_scale, self.max_scale),
            ));
        }
        Ok(())
    }
}

impl LightningSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(invalid(
                "lightning",
                format!("spawn_probability must be within [0, 1], got {}", self.spawn_probability),
            ));
        }
        if !positive(self.decay_per_frame) {
            return Err(invalid("lightning", format!("decay_per_frame must be positive, got {}", self.decay_per_frame)));
        }
        if !self.main_length.is_finite() || self.main_length < 0.1 {
            return Err(invalid("lightning", format!("main_length must be at least 0.1, got {}", self.main_length)));
        }
        if self.min_branches > self.max_branches {
            return Err(invalid(
                "lightning",
                format!("min_branches {} exceeds max_branches {}", self.min_branches, self.max_branches),
            ));
        }
        if !positive(self.min_branch_length) || !ordered(self.min_branch_length, self.max_branch_length) {
            return Err(invalid(
                "lightning",
                format!(
                    "need 0 < min_branch_length < max_branch_length, got {} and {}",
                    self.min_branch_length, self.max_branch_length
                ),
            ));
        }
        Ok(())
    }
}

impl CameraSettings {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl LightningSettings {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{name}_{}.toml", std::process::id()))
    }

    #[test]
    fn test_toml_round_trip_preserves_values() {
        let mut config = GlobeConfig::default();
        config.clouds.count = 12;
        config.lightning.spawn_probability = 1.0;

        let path = temp_path("globe_config");
        config.save_to_file(&path).unwrap();
        let loaded = GlobeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: GlobeConfig = toml::from_str("[clouds]\ncount = 7\n").unwrap();
        assert_eq!(config.clouds.count, 7);
        assert_eq!(config.clouds.min_scale, 0.3);
        assert_eq!(config.lightning, LightningSettings::default());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = GlobeConfig::load_from_file("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_or_default_survives_garbage() {
        let path = temp_path("globe_garbage");
        std::fs::write(&path, "clouds = [not toml").unwrap();
        let config = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, GlobeConfig::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(GlobeConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::branch_counts_swapped(|s: &mut LightningSettings| { s.min_branches = 6; s.max_branches = 2; })]
    #[case::branch_lengths_swapped(|s: &mut LightningSettings| { s.min_branch_length = 3.0; s.max_branch_length = 1.0; })]
    #[case::branch_lengths_equal(|s: &mut LightningSettings| s.max_branch_length = s.min_branch_length)]
    #[case::main_length_too_short(|s: &mut LightningSettings| s.main_length = 0.05)]
    #[case::main_length_nan(|s: &mut LightningSettings| s.main_length = f32::NAN)]
    #[case::no_decay(|s: &mut LightningSettings| s.decay_per_frame = 0.0)]
    #[case::negative_decay(|s: &mut LightningSettings| s.decay_per_frame = -0.1)]
    #[case::probability_above_one(|s: &mut LightningSettings| s.spawn_probability = 1.5)]
    #[case::probability_below_zero(|s: &mut LightningSettings| s.spawn_probability = -0.1)]
    #[case::probability_nan(|s: &mut LightningSettings| s.spawn_probability = f64::NAN)]
    fn test_invalid_lightning_settings(#[case] break_it: fn(&mut LightningSettings)) {
        let mut settings = LightningSettings::default();
        break_it(&mut settings);
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "lightning", .. }), "{err}");
    }

    #[rstest]
    #[case::empty_area(|s: &mut CloudSettings| s.half_extent_xz = 0.0)]
    #[case::height_band_swapped(|s: &mut CloudSettings| { s.min_y = 15.0; s.max_y = -5.0; })]
    #[case::height_band_empty(|s: &mut CloudSettings| s.max_y = s.min_y)]
    #[case::scales_swapped(|s: &mut CloudSettings| { s.min_scale = 1.0; s.max_scale = 0.3; })]
    #[case::zero_scale(|s: &mut CloudSettings| s.min_scale = 0.0)]
    fn test_invalid_cloud_settings(#[case] break_it: fn(&mut CloudSettings)) {
        let mut settings = CloudSettings::default();
        break_it(&mut settings);
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid { section: "clouds", .. })));
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(10.0, 2.0)]
    #[case(f32::NAN, 10.0)]
    fn test_invalid_orbit_settings(#[case] min_distance: f32, #[case] max_distance: f32) {
        let settings = OrbitSettings {
            min_distance,
            max_distance,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid { section: "orbit", .. })));
    }

    #[test]
    fn test_invalid_globe_radius() {
        let settings = GlobeSettings {
            radius: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_sanitized_resets_only_broken_sections() {
        let mut config = GlobeConfig::default();
        config.clouds.count = 12;
        config.lightning.min_branches = 6;
        config.lightning.max_branches = 2;

        let config = config.sanitized();
        assert_eq!(config.lightning, LightningSettings::default());
        assert_eq!(config.clouds.count, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_sanitizes_file() {
        let path = temp_path("globe_swapped_branches");
        std::fs::write(
            &path,
            "[clouds]\ncount = 9\n\n[lightning]\nmin_branches = 6\nmax_branches = 2\nspawn_probability = 1.0\n",
        )
        .unwrap();
        let config = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.clouds.count, 9);
        assert_eq!(config.lightning, LightningSettings::default());
    }
}
