//! Bevy systems feeding input into the stage controller and copying its
//! camera back onto the rendered camera.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::{CursorMoved, WindowResized};

use crate::stage::StageController;

/// Marker for the camera driven by the stage controller.
#[derive(Component)]
pub struct StageCamera;

/// Broadcast when the camera crossed into another depth bucket.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraMoved;

/// Registers stage events and the per-frame stage systems.
/// Expects a [`StageController`] resource.
pub fn stage_plugin(app: &mut App) {
    app.add_event::<CameraMoved>().add_systems(
        Update,
        (
            pointer_input_system,
            resize_system,
            step_input_system,
            stage_tick_system,
            sync_camera_system,
        )
            .chain(),
    );
}

fn pointer_input_system(
    mut cursor: EventReader<CursorMoved>,
    mut controller: ResMut<StageController>,
) {
    if let Some(moved) = cursor.read().last() {
        controller.pointer_moved(moved.position);
    }
}

fn resize_system(mut resized: EventReader<WindowResized>, mut controller: ResMut<StageController>) {
    for event in resized.read() {
        if controller.resize(event.width, event.height) {
            debug!("stage: viewport {}x{}", event.width, event.height);
        }
    }
}

fn step_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut controller: ResMut<StageController>,
) {
    let mut steps = 0;
    if keys.any_just_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        steps += 1;
    }
    if keys.any_just_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        steps -= 1;
    }
    for event in wheel.read() {
        if event.y != 0.0 {
            steps += event.y.signum() as i32;
        }
    }
    if steps != 0 {
        controller.advance(steps);
    }
}

fn stage_tick_system(
    time: Res<Time>,
    mut controller: ResMut<StageController>,
    mut moved: EventWriter<CameraMoved>,
) {
    let report = controller.tick(time.elapsed());
    for _ in 0..report.camera_moves {
        moved.send(CameraMoved);
    }
}

fn sync_camera_system(
    mut controller: ResMut<StageController>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<StageCamera>>,
) {
    let aspect = controller.take_projection_update();
    let camera = controller.camera();
    for (mut transform, mut projection) in &mut cameras {
        *transform = Transform::from_translation(camera.position).looking_at(camera.look_at, Vec3::Y);
        if let (Some(aspect), Projection::Perspective(perspective)) = (aspect, projection.as_mut())
        {
            perspective.aspect_ratio = aspect;
        }
    }
}
