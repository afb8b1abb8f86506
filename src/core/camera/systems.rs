use crate::core::camera::components::{MainCamera, OrbitControls};
use crate::core::camera::logic::{OrbitInput, calculate_orbit_transform};
use crate::core::config::ZeusConfig;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Pixels per wheel "line" on touchpads that report pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

pub fn spawn_camera(mut commands: Commands, config: Res<ZeusConfig>) {
    let camera = &config.inner.camera;
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, camera.initial_distance).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        OrbitControls::default(),
    ));

    info!("Camera spawned");
}

pub fn orbit_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    config: Res<ZeusConfig>,
    mut contexts: EguiContexts,
    mut camera_q: Query<(&mut Transform, &OrbitControls), With<MainCamera>>,
) {
    let Ok((mut transform, controls)) = camera_q.single_mut() else {
        return;
    };
    if !controls.enabled {
        return;
    }
    // Drags and scrolls that land on a panel belong to egui
    if let Ok(ctx) = contexts.ctx_mut()
        && (ctx.wants_pointer_input() || ctx.is_pointer_over_area())
    {
        return;
    }

    let wheel_delta = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    let input = OrbitInput {
        dragging: mouse_input.pressed(MouseButton::Left),
        drag_delta: mouse_motion.delta,
        wheel_delta,
    };

    let update = calculate_orbit_transform(
        transform.translation,
        transform.rotation,
        &input,
        &config.inner.orbit,
    );
    transform.translation = update.translation;
    transform.rotation = update.rotation;
}
