use bevy::prelude::*;

#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct MainCamera;

/// Free orbit around the globe centre. Turned off while a fly-to runs.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct OrbitControls {
    pub enabled: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self { enabled: true }
    }
}
