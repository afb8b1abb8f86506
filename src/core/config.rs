use bevy::prelude::*;
use globecore::config::GlobeConfig;

/// Snapshot of `globe_config.toml` the systems read from.
#[derive(Resource, Clone)]
pub struct ZeusConfig {
    pub inner: GlobeConfig,
}

impl Default for ZeusConfig {
    fn default() -> Self {
        Self {
            inner: globecore::get_config(),
        }
    }
}

/// F5 re-reads the config file. Orbit, atmosphere and spawn chance pick the new
/// values up; geometry that was already built keeps its old shape.
pub fn reload_config_on_key(keyboard: Res<ButtonInput<KeyCode>>, mut config: ResMut<ZeusConfig>) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }
    globecore::reload_config();
    config.inner = globecore::get_config();
    info!("Config reloaded");
}
