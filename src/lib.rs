mod core;
mod effects;
mod globe;
mod helpers;
mod loading;
mod ui;

use crate::core::camera::CameraPlugin;
use crate::core::config::{ZeusConfig, reload_config_on_key};
use crate::core::state::AppState;
use crate::effects::EffectsPlugin;
use crate::globe::GlobePlugin;
use crate::loading::LoadingPlugin;
use crate::ui::UIPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

pub struct ZeusPlugin;

impl Plugin for ZeusPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<ZeusConfig>()
            .add_plugins((
                CameraPlugin,
                LoadingPlugin,
                GlobePlugin,
                EffectsPlugin,
                UIPlugin,
            ))
            .add_systems(Update, reload_config_on_key.run_if(in_state(AppState::Globe)));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
