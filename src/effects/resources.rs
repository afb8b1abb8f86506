use crate::core::config::ZeusConfig;
use bevy::prelude::*;
use globecore::clouds::CloudField;
use globecore::lightning::LightningSynthesizer;

#[derive(Resource)]
pub struct Clouds {
    pub inner: CloudField,
}

impl FromWorld for Clouds {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<ZeusConfig>();
        Self {
            inner: CloudField::generate(&config.inner.clouds, &mut rand::rng()),
        }
    }
}

#[derive(Resource)]
pub struct Lightning {
    pub inner: LightningSynthesizer,
}

impl FromWorld for Lightning {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<ZeusConfig>();
        Self {
            inner: LightningSynthesizer::new(&config.inner.lightning),
        }
    }
}
