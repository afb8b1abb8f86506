//! Per-frame description of the atmosphere layer.
//!
//! [`compose`] reads the cloud field and the live lightning set and returns plain
//! data. The renderer applies it; nothing in here touches engine objects.

use crate::clouds::{CloudField, CloudInstance};
use crate::config::CompositorSettings;
use crate::lightning::{BRANCH_SHELLS, GlowShell, LightningEvent, LightningSynthesizer, MAIN_SHELLS};
use glam::Vec3;

pub const CLOUD_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// #4a9eff
pub const GLOW_BLUE: [f32; 3] = [0.29, 0.62, 1.0];
pub const CLOUD_OPACITY: f32 = 0.8;
pub const HALO_SCALE: f32 = 1.2;
/// Halo opacity and colour tint at full glow
const HALO_OPACITY: f32 = 0.3;
const TINT_STRENGTH: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub directional_position: Vec3,
    pub directional_intensity: f32,
    pub point_position: Vec3,
    pub point_intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bloom {
    pub intensity: f32,
    pub threshold: f32,
    pub smoothing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudDraw {
    pub id: u32,
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub base_color: [f32; 3],
    pub emissive_intensity: f32,
    pub halo_opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellDraw {
    pub radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub additive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Main,
    Branch(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathDraw<'a> {
    pub kind: PathKind,
    pub points: &'a [Vec3],
    pub shells: [ShellDraw; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoltDraw<'a> {
    pub id: u64,
    pub opacity: f32,
    pub paths: Vec<PathDraw<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectsFrame<'a> {
    pub lighting: Lighting,
    pub fog: Fog,
    pub bloom: Bloom,
    pub clouds: Vec<CloudDraw>,
    pub bolts: Vec<BoltDraw<'a>>,
}

impl<'a> EffectsFrame<'a> {
    pub fn bolt(&self, id: u64) -> Option<&BoltDraw<'a>> {
        self.bolts.iter().find(|bolt| bolt.id == id)
    }
}

pub fn lighting(settings: &CompositorSettings) -> Lighting {
    Lighting {
        ambient_intensity: settings.ambient_intensity,
        directional_position: Vec3::from_array(settings.directional_position),
        directional_intensity: settings.directional_intensity,
        point_position: Vec3::from_array(settings.point_position),
        point_intensity: settings.point_intensity,
    }
}

pub fn fog(settings: &CompositorSettings) -> Fog {
    Fog {
        color: settings.fog_color,
        start: settings.fog_start,
        end: settings.fog_end,
    }
}

pub fn bloom(settings: &CompositorSettings) -> Bloom {
    Bloom {
        intensity: settings.bloom_intensity,
        threshold: settings.bloom_threshold,
        smoothing: settings.bloom_smoothing,
    }
}

pub fn compose<'a>(
    clouds: &CloudField,
    lightning: &'a LightningSynthesizer,
    settings: &CompositorSettings,
) -> EffectsFrame<'a> {
    EffectsFrame {
        lighting: lighting(settings),
        fog: fog(settings),
        bloom: bloom(settings),
        clouds: clouds.instances().iter().map(cloud_draw).collect(),
        bolts: lightning.events().iter().map(bolt_draw).collect(),
    }
}

pub fn cloud_draw(cloud: &CloudInstance) -> CloudDraw {
    let glow = cloud.glow_intensity;
    CloudDraw {
        id: cloud.id,
        translation: cloud.position,
        rotation: cloud.rotation,
        scale: cloud.scale,
        base_color: lerp_color(CLOUD_WHITE, GLOW_BLUE, glow * TINT_STRENGTH),
        emissive_intensity: glow,
        halo_opacity: glow * HALO_OPACITY,
    }
}

pub fn bolt_draw(event: &LightningEvent) -> BoltDraw<'_> {
    let mut paths = Vec::with_capacity(event.branches.len() + 1);
    paths.push(PathDraw {
        kind: PathKind::Main,
        points: &event.main_path,
        shells: shells(MAIN_SHELLS, event.opacity),
    });
    paths.extend(event.branches.iter().enumerate().map(|(i, branch)| PathDraw {
        kind: PathKind::Branch(i),
        points: branch,
        shells: shells(BRANCH_SHELLS, event.opacity),
    }));

    BoltDraw {
        id: event.id,
        opacity: event.opacity,
        paths,
    }
}

fn shells(template: [GlowShell; 3], opacity: f32) -> [ShellDraw; 3] {
    template.map(|shell| ShellDraw {
        radius: shell.radius,
        color: if shell.additive { GLOW_BLUE } else { CLOUD_WHITE },
        opacity: shell.opacity * opacity,
        additive: shell.additive,
    })
}

fn lerp_color(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| from[i] + (to[i] - from[i]) * t)
}
