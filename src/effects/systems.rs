use crate::core::camera::components::MainCamera;
use crate::core::config::ZeusConfig;
use crate::effects::components::{AtmosphereLight, BoltShell, BoltVisual, CloudVisual};
use crate::effects::logic::AppliedAtmosphere;
use crate::effects::resources::{Clouds, Lightning};
use crate::helpers::lighting::{ambient_brightness, directional_illuminance, point_lumens};
use crate::helpers::mesh::mesh_from_data;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::post_process::bloom::{Bloom, BloomPrefilter};
use bevy::prelude::*;
use globecore::clouds::{CORE_RADIUS, PUFF_OFFSETS};
use globecore::compositor::{
    self, BoltDraw, CLOUD_OPACITY, CloudDraw, EffectsFrame, GLOW_BLUE, HALO_SCALE, ShellDraw,
};
use globecore::mesh_data::MeshData;
use std::collections::{HashMap, HashSet};

const TUBE_SIDES: u32 = 8;
/// Changes in glow below this are not worth a material upload
const GLOW_EPSILON: f32 = 1e-3;
/// Postprocessing-style bloom strength mapped onto Bevy's 0..1 range
const BLOOM_INTENSITY_SCALE: f32 = 0.15;

pub fn setup_atmosphere(
    mut commands: Commands,
    config: Res<ZeusConfig>,
    camera_q: Query<Entity, With<MainCamera>>,
) {
    let settings = &config.inner.compositor;
    let lighting = compositor::lighting(settings);

    commands.spawn((
        DirectionalLight {
            illuminance: directional_illuminance(lighting.directional_intensity),
            ..default()
        },
        Transform::from_translation(lighting.directional_position).looking_at(Vec3::ZERO, Vec3::Y),
        AtmosphereLight::Directional,
    ));
    commands.spawn((
        PointLight {
            intensity: point_lumens(lighting.point_intensity),
            range: 50.0,
            ..default()
        },
        Transform::from_translation(lighting.point_position),
        AtmosphereLight::Point,
    ));

    let Ok(camera) = camera_q.single() else {
        warn!("No main camera, fog and bloom skipped");
        return;
    };
    commands.entity(camera).insert((
        to_fog(&compositor::fog(settings)),
        to_bloom(&compositor::bloom(settings)),
    ));
}

pub fn spawn_clouds(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    clouds: Res<Clouds>,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(16, 12));

    for cloud in clouds.inner.instances() {
        let draw = compositor::cloud_draw(cloud);
        let body = materials.add(StandardMaterial {
            base_color: cloud_color(&draw),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            ..default()
        });
        let halo = materials.add(StandardMaterial {
            base_color: Color::srgb_from_array(GLOW_BLUE).with_alpha(0.0),
            alpha_mode: AlphaMode::Add,
            unlit: true,
            ..default()
        });

        let id = cloud.id;
        commands
            .spawn((
                cloud_transform(&draw),
                Visibility::default(),
                CloudVisual {
                    id,
                    body: body.clone(),
                    halo: halo.clone(),
                    applied_glow: 0.0,
                },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(body.clone()),
                    Transform::from_scale(Vec3::splat(CORE_RADIUS)),
                ));
                for (offset, radius) in PUFF_OFFSETS.iter().zip(cloud.puff_radii) {
                    parent.spawn((
                        Mesh3d(sphere.clone()),
                        MeshMaterial3d(body.clone()),
                        Transform::from_translation(Vec3::from_array(*offset))
                            .with_scale(Vec3::splat(radius)),
                    ));
                }
                parent.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(halo.clone()),
                    Transform::from_scale(Vec3::splat(CORE_RADIUS * HALO_SCALE)),
                    Pickable::IGNORE,
                ));
            })
            // Hover on any puff bubbles up to the cloud root
            .observe(move |_: On<Pointer<Over>>, mut clouds: ResMut<Clouds>| {
                clouds.inner.set_hovered(id, true);
            })
            .observe(move |_: On<Pointer<Out>>, mut clouds: ResMut<Clouds>| {
                clouds.inner.set_hovered(id, false);
            });
    }

    info!("Spawned {} clouds", clouds.inner.len());
}

pub fn update_clouds(time: Res<Time>, mut clouds: ResMut<Clouds>) {
    clouds.inner.update(time.elapsed_secs());
}

pub fn advance_lightning(
    time: Res<Time>,
    config: Res<ZeusConfig>,
    clouds: Res<Clouds>,
    mut lightning: ResMut<Lightning>,
) {
    let probability = config.inner.lightning.spawn_probability;
    if lightning.inner.settings().spawn_probability != probability {
        lightning.inner.set_spawn_probability(probability);
    }

    lightning.inner.advance_frame();
    let spawned = lightning
        .inner
        .advance_clock(time.delta(), clouds.inner.instances(), &mut rand::rng());
    if !spawned.is_empty() {
        debug!("Lightning spawned: {spawned:?}");
    }
}

/// Composes this frame's effects and pushes them into the scene.
pub fn apply_effects_frame(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
    mut applied: Local<AppliedAtmosphere>,
    config: Res<ZeusConfig>,
    clouds: Res<Clouds>,
    lightning: Res<Lightning>,
    mut camera_q: Query<(&mut DistanceFog, &mut Bloom), With<MainCamera>>,
    mut light_q: Query<(
        &AtmosphereLight,
        &mut Transform,
        Option<&mut DirectionalLight>,
        Option<&mut PointLight>,
    )>,
    mut cloud_q: Query<(&mut Transform, &mut CloudVisual), Without<AtmosphereLight>>,
    bolt_q: Query<(Entity, &BoltVisual)>,
    shell_q: Query<(&BoltShell, &MeshMaterial3d<StandardMaterial>)>,
) {
    let frame = compositor::compose(&clouds.inner, &lightning.inner, &config.inner.compositor);

    if applied.lighting_changed(frame.lighting) {
        ambient.brightness = ambient_brightness(frame.lighting.ambient_intensity);
        apply_lighting(&frame, &mut light_q);
    }
    if let Ok((mut fog, mut bloom)) = camera_q.single_mut() {
        if applied.fog_changed(frame.fog) {
            *fog = to_fog(&frame.fog);
        }
        if applied.bloom_changed(frame.bloom) {
            *bloom = to_bloom(&frame.bloom);
        }
    }

    apply_clouds(&frame, &mut materials, &mut cloud_q);
    apply_bolts(&frame, &mut commands, &mut meshes, &mut materials, &bolt_q, &shell_q);
}

fn apply_lighting(
    frame: &EffectsFrame,
    light_q: &mut Query<(
        &AtmosphereLight,
        &mut Transform,
        Option<&mut DirectionalLight>,
        Option<&mut PointLight>,
    )>,
) {
    for (kind, mut transform, directional, point) in light_q.iter_mut() {
        match kind {
            AtmosphereLight::Directional => {
                transform.translation = frame.lighting.directional_position;
                transform.look_at(Vec3::ZERO, Vec3::Y);
                if let Some(mut light) = directional {
                    light.illuminance = directional_illuminance(frame.lighting.directional_intensity);
                }
            }
            AtmosphereLight::Point => {
                transform.translation = frame.lighting.point_position;
                if let Some(mut light) = point {
                    light.intensity = point_lumens(frame.lighting.point_intensity);
                }
            }
        }
    }
}

fn apply_clouds(
    frame: &EffectsFrame,
    materials: &mut Assets<StandardMaterial>,
    cloud_q: &mut Query<(&mut Transform, &mut CloudVisual), Without<AtmosphereLight>>,
) {
    let draws: HashMap<u32, &CloudDraw> = frame.clouds.iter().map(|draw| (draw.id, draw)).collect();

    for (mut transform, mut visual) in cloud_q.iter_mut() {
        let Some(draw) = draws.get(&visual.id) else {
            continue;
        };
        transform.translation = draw.translation;

        if (draw.emissive_intensity - visual.applied_glow).abs() < GLOW_EPSILON {
            continue;
        }
        visual.applied_glow = draw.emissive_intensity;
        if let Some(body) = materials.get_mut(&visual.body) {
            body.base_color = cloud_color(draw);
            body.emissive = Color::srgb_from_array(GLOW_BLUE).to_linear() * draw.emissive_intensity;
        }
        if let Some(halo) = materials.get_mut(&visual.halo) {
            halo.base_color.set_alpha(draw.halo_opacity);
        }
    }
}

fn apply_bolts(
    frame: &EffectsFrame,
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    bolt_q: &Query<(Entity, &BoltVisual)>,
    shell_q: &Query<(&BoltShell, &MeshMaterial3d<StandardMaterial>)>,
) {
    let mut existing = HashSet::new();
    for (entity, visual) in bolt_q.iter() {
        if frame.bolt(visual.id).is_some() {
            existing.insert(visual.id);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for (shell, material) in shell_q.iter() {
        let draw = frame
            .bolt(shell.bolt)
            .and_then(|bolt| bolt.paths.get(shell.path))
            .and_then(|path| path.shells.get(shell.layer));
        if let (Some(draw), Some(material)) = (draw, materials.get_mut(&material.0)) {
            material.base_color.set_alpha(draw.opacity);
        }
    }

    for bolt in frame.bolts.iter().filter(|bolt| !existing.contains(&bolt.id)) {
        spawn_bolt(bolt, commands, meshes, materials);
    }
}

fn spawn_bolt(
    bolt: &BoltDraw,
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut shells = Vec::new();
    for (path_index, path) in bolt.paths.iter().enumerate() {
        for (layer, shell) in path.shells.iter().enumerate() {
            let tube = MeshData::tube(path.points, shell.radius, TUBE_SIDES);
            if tube.is_empty() {
                continue;
            }
            shells.push((
                Mesh3d(meshes.add(mesh_from_data(tube))),
                MeshMaterial3d(materials.add(shell_material(shell))),
                Transform::default(),
                Pickable::IGNORE,
                BoltShell {
                    bolt: bolt.id,
                    path: path_index,
                    layer,
                },
            ));
        }
    }

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            BoltVisual { id: bolt.id },
        ))
        .with_children(|parent| {
            for shell in shells {
                parent.spawn(shell);
            }
        });
}

fn shell_material(shell: &ShellDraw) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_from_array(shell.color).with_alpha(shell.opacity),
        alpha_mode: if shell.additive {
            AlphaMode::Add
        } else {
            AlphaMode::Blend
        },
        unlit: true,
        ..default()
    }
}

fn cloud_transform(draw: &CloudDraw) -> Transform {
    Transform::from_translation(draw.translation)
        .with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            draw.rotation.x,
            draw.rotation.y,
            draw.rotation.z,
        ))
        .with_scale(Vec3::splat(draw.scale))
}

fn cloud_color(draw: &CloudDraw) -> Color {
    Color::srgb_from_array(draw.base_color).with_alpha(CLOUD_OPACITY)
}

fn to_fog(fog: &compositor::Fog) -> DistanceFog {
    DistanceFog {
        color: Color::srgb_from_array(fog.color),
        falloff: FogFalloff::Linear {
            start: fog.start,
            end: fog.end,
        },
        ..default()
    }
}

fn to_bloom(bloom: &compositor::Bloom) -> Bloom {
    Bloom {
        intensity: bloom.intensity * BLOOM_INTENSITY_SCALE,
        prefilter: BloomPrefilter {
            threshold: bloom.threshold,
            threshold_softness: bloom.smoothing,
        },
        ..Bloom::NATURAL
    }
}
