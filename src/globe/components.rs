use bevy::prelude::*;

#[derive(Component)]
pub struct GlobeEntity;

/// Glow shell around the globe; copies the globe's spin
#[derive(Component)]
pub struct AtmosphereShell;

/// Child of the globe, so it stays on its spot while the globe spins
#[derive(Component)]
pub struct LocationMarker;
