mod logic;
pub mod resources;
mod systems;

use crate::core::state::AppState;
use crate::ui::resources::SearchForm;
use crate::ui::systems::*;
use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .init_resource::<SearchForm>()
            .add_systems(
                EguiPrimaryContextPass,
                (render_search_panel, render_info_panel)
                    .chain()
                    .run_if(in_state(AppState::Globe)),
            );
    }
}
