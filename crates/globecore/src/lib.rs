pub mod camera;
pub mod clouds;
pub mod compositor;
pub mod config;
pub mod easing;
pub mod geo;
pub mod lightning;
pub mod marker;
pub mod mesh_data;
pub mod scene;
pub mod schedule;

pub use config::{get_config, reload_config};
