use bevy::prelude::*;

/// Fly to a place. Coordinates are expected to be in range already.
#[derive(Message, Clone, Debug)]
pub struct LocationSelected {
    pub name: String,
    pub date: String,
    pub latitude: f32,
    pub longitude: f32,
}

#[derive(Message)]
pub struct ResetView;
