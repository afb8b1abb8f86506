use bevy::prelude::*;

/// Root of one cloud's sphere cluster. The materials are per cloud because
/// each one glows on its own.
#[derive(Component)]
pub struct CloudVisual {
    pub id: u32,
    pub body: Handle<StandardMaterial>,
    pub halo: Handle<StandardMaterial>,
    pub applied_glow: f32,
}

#[derive(Component)]
pub struct BoltVisual {
    pub id: u64,
}

/// One glow tube of a bolt: path index into the bolt's paths, layer 0 is the core
#[derive(Component)]
pub struct BoltShell {
    pub bolt: u64,
    pub path: usize,
    pub layer: usize,
}

#[derive(Component)]
pub enum AtmosphereLight {
    Directional,
    Point,
}
