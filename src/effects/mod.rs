pub mod components;
mod logic;
pub mod resources;
mod systems;

use crate::core::state::AppState;
use crate::effects::resources::*;
use crate::effects::systems::*;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;

/// Clouds, lightning and the atmosphere they sit in: lights, fog and bloom.
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MeshPickingPlugin)
            .init_resource::<Clouds>()
            .init_resource::<Lightning>()
            .add_systems(OnEnter(AppState::Globe), (setup_atmosphere, spawn_clouds))
            .add_systems(
                Update,
                (update_clouds, advance_lightning, apply_effects_frame)
                    .chain()
                    .run_if(in_state(AppState::Globe)),
            );
    }
}
