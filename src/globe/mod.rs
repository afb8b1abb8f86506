pub mod components;
pub mod events;
pub mod resources;
mod systems;

use crate::core::state::AppState;
use crate::globe::events::*;
use crate::globe::resources::*;
use crate::globe::systems::*;
use bevy::prelude::*;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LocationSelected>()
            .add_message::<ResetView>()
            .init_resource::<GlobeSceneState>()
            .init_resource::<CurrentSelection>()
            .add_systems(OnEnter(AppState::Globe), spawn_globe)
            .add_systems(
                Update,
                (handle_location_selected, handle_reset_view, apply_globe_frame)
                    .chain()
                    .run_if(in_state(AppState::Globe)),
            );
    }
}
