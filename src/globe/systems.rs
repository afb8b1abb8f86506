use crate::core::camera::components::{MainCamera, OrbitControls};
use crate::core::config::ZeusConfig;
use crate::globe::components::{AtmosphereShell, GlobeEntity, LocationMarker};
use crate::globe::events::{LocationSelected, ResetView};
use crate::globe::resources::{CurrentSelection, GlobeSceneState};
use crate::helpers::lighting::{directional_illuminance, point_lumens};
use crate::helpers::mesh::mesh_from_data;
use crate::loading::EarthTextures;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use globecore::camera::CameraState;
use globecore::geo::GeoPoint;
use globecore::mesh_data::MeshData;
use globecore::scene::Selection;

const OCEAN_BLUE: Color = Color::srgb(0.1, 0.3, 0.6);
const ATMOSPHERE_BLUE: Color = Color::srgba(0.0, 0.4, 1.0, 0.15);
const MARKER_RED: Color = Color::srgba(1.0, 0.0, 0.0, 0.9);

const MARKER_RADIUS: f32 = 0.02;
const MARKER_HEIGHT: f32 = 0.06;
const MARKER_GLOW: f32 = 0.8;
const MARKER_LIGHT_LUMENS: f32 = 800.0;
const MARKER_LIGHT_RANGE: f32 = 0.25;

pub fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ZeusConfig>,
    textures: Option<Res<EarthTextures>>,
) {
    let globe = &config.inner.globe;

    let mut earth_mesh = mesh_from_data(MeshData::globe(globe.radius, globe.segments));
    let earth_material = match textures.as_deref() {
        Some(textures) => {
            if let Err(err) = earth_mesh.generate_tangents() {
                warn!("Could not generate globe tangents, normal map disabled: {err}");
            }
            StandardMaterial {
                base_color_texture: Some(textures.color.clone()),
                normal_map_texture: Some(textures.normal.clone()),
                perceptual_roughness: 0.8,
                ..default()
            }
        }
        None => {
            warn!("Earth textures not loaded, drawing a plain globe");
            StandardMaterial {
                base_color: OCEAN_BLUE,
                perceptual_roughness: 0.8,
                ..default()
            }
        }
    };

    commands.spawn((
        Mesh3d(meshes.add(earth_mesh)),
        MeshMaterial3d(materials.add(earth_material)),
        Transform::default(),
        GlobeEntity,
    ));

    // Only the inside of the shell is drawn, so it reads as a rim glow
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(globe.atmosphere_radius).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: ATMOSPHERE_BLUE,
            alpha_mode: AlphaMode::Blend,
            cull_mode: Some(Face::Front),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Pickable::IGNORE,
        AtmosphereShell,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: directional_illuminance(1.5),
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: point_lumens(0.8),
            range: 20.0,
            ..default()
        },
        Transform::from_xyz(-5.0, -3.0, -5.0),
    ));

    info!("Globe spawned");
}

pub fn handle_location_selected(
    mut events: MessageReader<LocationSelected>,
    mut scene: ResMut<GlobeSceneState>,
    mut current: ResMut<CurrentSelection>,
    time: Res<Time>,
    camera_q: Query<&Transform, With<MainCamera>>,
) {
    for event in events.read() {
        let Ok(camera) = camera_q.single() else {
            return;
        };
        let selection = Selection {
            name: event.name.clone(),
            date: event.date.clone(),
            geo: GeoPoint::new(event.latitude, event.longitude),
        };
        let from = CameraState {
            position: camera.translation,
            look_at: camera.translation + camera.forward() * camera.translation.length(),
        };
        scene.inner.select(selection.clone(), from, time.elapsed());
        current.selection = Some(selection);
    }
}

pub fn handle_reset_view(
    mut events: MessageReader<ResetView>,
    mut scene: ResMut<GlobeSceneState>,
    mut current: ResMut<CurrentSelection>,
) {
    if events.read().count() == 0 {
        return;
    }
    scene.inner.reset();
    current.selection = None;
    info!("View reset");
}

/// Applies this frame's globe spin, camera pose and marker.
pub fn apply_globe_frame(
    mut commands: Commands,
    mut scene: ResMut<GlobeSceneState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
    globe_q: Query<Entity, With<GlobeEntity>>,
    mut spin_q: Query<&mut Transform, Or<(With<GlobeEntity>, With<AtmosphereShell>)>>,
    mut camera_q: Query<
        (&mut Transform, &mut OrbitControls),
        (With<MainCamera>, Without<GlobeEntity>, Without<AtmosphereShell>),
    >,
    mut marker_q: Query<
        (Entity, &mut Transform),
        (
            With<LocationMarker>,
            Without<MainCamera>,
            Without<GlobeEntity>,
            Without<AtmosphereShell>,
        ),
    >,
) {
    scene.inner.advance_spin();
    let frame = scene.inner.frame(time.elapsed());

    let rotation = Quat::from_rotation_y(frame.globe_spin);
    for mut transform in &mut spin_q {
        transform.rotation = rotation;
    }

    if let Ok((mut transform, mut controls)) = camera_q.single_mut() {
        if let Some(transition) = frame.camera {
            transform.translation = transition.camera.position;
            transform.look_at(transition.camera.look_at, Vec3::Y);
        }
        if controls.enabled != frame.orbit_enabled {
            controls.enabled = frame.orbit_enabled;
        }
    }

    match (frame.marker, marker_q.single_mut()) {
        (Some(placement), Ok((_, mut transform))) => {
            transform.translation = placement.position;
            transform.rotation = placement.rotation;
        }
        (Some(placement), Err(_)) => {
            let Ok(globe) = globe_q.single() else {
                return;
            };
            let marker = spawn_marker(
                &mut commands,
                &mut meshes,
                &mut materials,
                Transform::from_translation(placement.position).with_rotation(placement.rotation),
            );
            commands.entity(globe).add_child(marker);
        }
        (None, Ok((entity, _))) => {
            commands.entity(entity).despawn();
        }
        (None, Err(_)) => {}
    }
}

fn spawn_marker(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    transform: Transform,
) -> Entity {
    let material = materials.add(StandardMaterial {
        base_color: MARKER_RED,
        emissive: LinearRgba::rgb(MARKER_GLOW, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(Cone::new(MARKER_RADIUS, MARKER_HEIGHT))),
            MeshMaterial3d(material),
            transform,
            Pickable::IGNORE,
            LocationMarker,
        ))
        .with_children(|marker| {
            marker.spawn((
                PointLight {
                    color: Color::srgb(1.0, 0.0, 0.0),
                    intensity: MARKER_LIGHT_LUMENS,
                    range: MARKER_LIGHT_RANGE,
                    ..default()
                },
                Transform::default(),
            ));
        })
        .id()
}
