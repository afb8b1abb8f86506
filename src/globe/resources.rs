use crate::core::config::ZeusConfig;
use bevy::prelude::*;
use globecore::scene::{GlobeScene, Selection};

#[derive(Resource)]
pub struct GlobeSceneState {
    pub inner: GlobeScene,
}

impl FromWorld for GlobeSceneState {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<ZeusConfig>();
        Self {
            inner: GlobeScene::new(&config.inner),
        }
    }
}

/// What the info panel shows
#[derive(Resource, Default)]
pub struct CurrentSelection {
    pub selection: Option<Selection>,
}
