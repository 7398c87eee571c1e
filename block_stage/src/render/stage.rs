//! Stage camera, fog and lights.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::config::StageConfig;
use crate::render::PostChain;
use crate::scene::materials::hex_color;
use crate::stage::StageCamera;

const AMBIENT_COLOR: u32 = 0x555555;
const AMBIENT_BRIGHTNESS: f32 = 200.0;
const KEY_LIGHT_COLOR: u32 = 0xfd8054;
const KEY_LIGHT_INTENSITY: f32 = 5.0e11;
const KEY_LIGHT_RANGE: f32 = 6000.0;

/// Spawns the stage camera with its projection, fog and post chain, and
/// the stage lights.
pub fn setup_stage(mut commands: Commands, config: Res<StageConfig>, chain: Res<PostChain>) {
    let background = hex_color(config.background);

    let mut camera = commands.spawn((
        StageCamera,
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            aspect_ratio: config.viewport[0] / config.viewport[1],
            near: config.near,
            far: config.far,
        }),
        Transform::from_translation(config.camera_position.into())
            .looking_at(config.look_at.into(), Vec3::Y),
        DistanceFog {
            color: background,
            falloff: FogFalloff::ExponentialSquared {
                density: config.fog_density,
            },
            ..default()
        },
    ));

    let resolved = chain.resolve();
    for name in &resolved.skipped {
        info!("post stage {name} has no native pass, skipped");
    }
    resolved.insert_into(&mut camera);

    commands.insert_resource(AmbientLight {
        color: hex_color(AMBIENT_COLOR),
        brightness: AMBIENT_BRIGHTNESS,
    });
    commands.spawn((
        PointLight {
            color: hex_color(KEY_LIGHT_COLOR),
            intensity: KEY_LIGHT_INTENSITY,
            range: KEY_LIGHT_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1500.0),
    ));
}
