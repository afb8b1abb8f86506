use crate::core::state::AppState;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        // Missing textures are not fatal, the globe falls back to a flat ocean colour
        app.add_loading_state(
            LoadingState::new(AppState::Loading)
                .continue_to_state(AppState::Globe)
                .on_failure_continue_to_state(AppState::Globe)
                .load_collection::<EarthTextures>(),
        );
    }
}

#[derive(AssetCollection, Resource)]
pub struct EarthTextures {
    #[asset(path = "textures/earth_atmos_2048.jpg")]
    pub color: Handle<Image>,
    #[asset(path = "textures/earth_normal_2048.jpg")]
    pub normal: Handle<Image>,
}
