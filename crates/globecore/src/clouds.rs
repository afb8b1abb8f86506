use crate::config::CloudSettings;
use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use std::f32::consts::TAU;

pub const PUFF_COUNT: usize = 5;

/// Offsets of the smaller puffs around each cloud's core sphere
pub const PUFF_OFFSETS: [[f32; 3]; PUFF_COUNT] = [
    [0.4, 0.1, 0.0],
    [-0.4, 0.1, 0.0],
    [0.0, 0.2, 0.0],
    [0.2, -0.1, 0.2],
    [-0.2, -0.1, -0.2],
];

pub const CORE_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct CloudInstance {
    pub id: u32,
    pub base_position: Vec3,
    /// Base position plus this frame's vertical bob
    pub position: Vec3,
    pub scale: f32,
    /// XYZ euler angles in radians
    pub rotation: Vec3,
    pub puff_radii: [f32; PUFF_COUNT],
    pub hovered: bool,
    pub glow_intensity: f32,
}

/// Fixed population of ambient clouds. Nothing is ever added or removed after
/// [`CloudField::generate`].
#[derive(Clone)]
pub struct CloudField {
    instances: Vec<CloudInstance>,
    noise: Perlin,
    settings: CloudSettings,
}

impl CloudField {
    pub fn generate(settings: &CloudSettings, rng: &mut impl Rng) -> Self {
        let half = settings.half_extent_xz;
        let instances = (0..settings.count)
            .map(|i| {
                let base_position = Vec3::new(
                    rng.random_range(-half..half),
                    rng.random_range(settings.min_y..settings.max_y),
                    rng.random_range(-half..half),
                );
                CloudInstance {
                    id: i as u32,
                    base_position,
                    position: base_position,
                    scale: rng.random_range(settings.min_scale..settings.max_scale),
                    rotation: Vec3::new(
                        rng.random_range(0.0..TAU),
                        rng.random_range(0.0..TAU),
                        rng.random_range(0.0..TAU),
                    ),
                    puff_radii: std::array::from_fn(|_| 0.3 + rng.random::<f32>() * 0.1),
                    hovered: false,
                    glow_intensity: 0.0,
                }
            })
            .collect();

        Self {
            instances,
            noise: Perlin::new(rng.random()),
            settings: settings.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[CloudInstance] {
        &self.instances
    }

    pub fn get(&self, id: u32) -> Option<&CloudInstance> {
        self.instances.iter().find(|cloud| cloud.id == id)
    }

    /// Returns false for ids that do not belong to this field.
    pub fn set_hovered(&mut self, id: u32, hovered: bool) -> bool {
        match self.instances.iter_mut().find(|cloud| cloud.id == id) {
            Some(cloud) => {
                cloud.hovered = hovered;
                true
            }
            None => false,
        }
    }

    /// Advances bobbing and glow to `time` seconds since the field was created.
    pub fn update(&mut self, time: f32) {
        let s = &self.settings;
        for cloud in &mut self.instances {
            let base = cloud.base_position;
            let wave = (time * s.bob_frequency).sin() * s.bob_amplitude;
            let drift = self.noise.get([
                (base.x * s.noise_spatial_scale) as f64,
                (base.y * s.noise_spatial_scale) as f64,
                (time * s.noise_time_scale) as f64,
            ]) as f32
                * s.noise_amplitude;
            cloud.position = Vec3::new(base.x, base.y + wave + drift, base.z);

            let target = if cloud.hovered { 1.0 } else { 0.0 };
            cloud.glow_intensity += (target - cloud.glow_intensity) * s.glow_smoothing;
            cloud.glow_intensity = cloud.glow_intensity.clamp(0.0, 1.0);
        }
    }
}
