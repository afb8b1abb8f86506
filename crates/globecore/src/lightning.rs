use crate::clouds::CloudInstance;
use crate::config::LightningSettings;
use crate::schedule::IntervalScheduler;
use glam::Vec3;
use rand::Rng;
use std::time::Duration;

/// Per-step jitter, applied as `±JITTER / 2` on each axis
const JITTER: Vec3 = Vec3::new(0.4, 0.2, 0.4);

/// Bolts fainter than this are treated as fully faded
const OPACITY_EPSILON: f32 = 1e-4;

/// One concentric tube around a bolt path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowShell {
    pub radius: f32,
    /// Multiplied with the event opacity
    pub opacity: f32,
    pub additive: bool,
}

pub const MAIN_SHELLS: [GlowShell; 3] = [
    GlowShell { radius: 0.05, opacity: 1.0, additive: false },
    GlowShell { radius: 0.1, opacity: 0.8, additive: true },
    GlowShell { radius: 0.2, opacity: 0.4, additive: true },
];

pub const BRANCH_SHELLS: [GlowShell; 3] = [
    GlowShell { radius: 0.03, opacity: 0.9, additive: false },
    GlowShell { radius: 0.06, opacity: 0.7, additive: true },
    GlowShell { radius: 0.12, opacity: 0.3, additive: true },
];

#[derive(Debug, Clone, PartialEq)]
pub struct BoltGeometry {
    pub main_path: Vec<Vec3>,
    pub branches: Vec<Vec<Vec3>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightningEvent {
    pub id: u64,
    pub origin: Vec3,
    pub main_path: Vec<Vec3>,
    pub branches: Vec<Vec<Vec3>>,
    pub opacity: f32,
}

/// Jagged path from `start`: `floor(length * 10)` steps along `direction`,
/// each nudged by random jitter. Always contains at least `start`.
pub fn generate_branch(rng: &mut impl Rng, start: Vec3, direction: Vec3, length: f32) -> Vec<Vec3> {
    let segments = (length * 10.0).floor().max(0.0) as usize;
    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    if segments == 0 {
        return points;
    }

    let step = direction.normalize_or(Vec3::NEG_Y) * (length / segments as f32);
    let mut current = start;
    for _ in 0..segments {
        let jitter = Vec3::new(
            (rng.random::<f32>() - 0.5) * JITTER.x,
            (rng.random::<f32>() - 0.5) * JITTER.y,
            (rng.random::<f32>() - 0.5) * JITTER.z,
        );
        current += step + jitter;
        points.push(current);
    }
    points
}

/// Main bolt straight down from `origin` plus a few forks hanging off it.
pub fn generate_bolt(rng: &mut impl Rng, origin: Vec3, settings: &LightningSettings) -> BoltGeometry {
    let main_path = generate_branch(rng, origin, Vec3::NEG_Y, settings.main_length);

    let branch_count = rng.random_range(settings.min_branches..=settings.max_branches);
    let fork_points = main_path.len().saturating_sub(1).max(1);
    let branches = (0..branch_count)
        .map(|_| {
            let start = main_path[rng.random_range(0..fork_points)];
            let direction = Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                -1.0,
                (rng.random::<f32>() - 0.5) * 2.0,
            )
            .normalize();
            let length = rng.random_range(settings.min_branch_length..settings.max_branch_length);
            generate_branch(rng, start, direction, length)
        })
        .collect();

    BoltGeometry {
        main_path,
        branches,
    }
}

/// Spawns bolts under random clouds on a fixed cadence and fades them out.
///
/// The synthesizer owns its live events; callers only ever see a slice.
#[derive(Debug, Clone)]
pub struct LightningSynthesizer {
    events: Vec<LightningEvent>,
    scheduler: IntervalScheduler,
    settings: LightningSettings,
    next_id: u64,
}

impl LightningSynthesizer {
    pub fn new(settings: &LightningSettings) -> Self {
        Self {
            events: Vec::new(),
            scheduler: IntervalScheduler::new(settings.check_interval()),
            settings: settings.clone(),
            next_id: 0,
        }
    }

    pub fn events(&self) -> &[LightningEvent] {
        &self.events
    }

    pub fn settings(&self) -> &LightningSettings {
        &self.settings
    }

    pub fn set_spawn_probability(&mut self, probability: f64) {
        self.settings.spawn_probability = probability.clamp(0.0, 1.0);
    }

    /// Feeds frame time to the spawn clock and runs a spawn check for every
    /// tick that became due. Returns the ids of bolts spawned.
    pub fn advance_clock(
        &mut self,
        delta: Duration,
        clouds: &[CloudInstance],
        rng: &mut impl Rng,
    ) -> Vec<u64> {
        let ticks = self.scheduler.advance(delta);
        (0..ticks)
            .filter_map(|_| self.on_spawn_tick(clouds, rng))
            .collect()
    }

    /// One spawn check. With probability `spawn_probability` a bolt is rooted
    /// just below a uniformly chosen cloud.
    pub fn on_spawn_tick(&mut self, clouds: &[CloudInstance], rng: &mut impl Rng) -> Option<u64> {
        if clouds.is_empty() {
            return None;
        }
        if rng.random::<f64>() >= self.settings.spawn_probability {
            return None;
        }
        let cloud = &clouds[rng.random_range(0..clouds.len())];
        let origin = cloud.base_position - Vec3::Y * self.settings.origin_drop;
        Some(self.spawn_at(origin, rng))
    }

    pub fn spawn_at(&mut self, origin: Vec3, rng: &mut impl Rng) -> u64 {
        let BoltGeometry {
            main_path,
            branches,
        } = generate_bolt(rng, origin, &self.settings);
        let id = self.next_id;
        self.next_id += 1;

        log::debug!(
            "Lightning {id} at {origin} with {} branches",
            branches.len()
        );

        self.events.push(LightningEvent {
            id,
            origin,
            main_path,
            branches,
            opacity: 1.0,
        });
        id
    }

    /// Fades every live bolt by one frame's decay and drops the spent ones.
    pub fn advance_frame(&mut self) {
        let decay = self.settings.decay_per_frame;
        for event in &mut self.events {
            event.opacity = (event.opacity - decay).max(0.0);
            if event.opacity < OPACITY_EPSILON {
                event.opacity = 0.0;
            }
        }
        self.events.retain(|event| event.opacity > 0.0);
    }
}
