//! Hover highlight: the block slab under the pointer turns white until the
//! pointer leaves it.
//!
//! Picking is a manual ray test against each slab's bounding box, done in the
//! slab's local space so the ring's rotation is respected.

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use crate::scene::BlockSlab;
use crate::stage::StageCamera;

/// Slab currently under the pointer, if any.
#[derive(Resource, Default)]
pub struct HoveredBlock {
    pub entity: Option<Entity>,
}

/// Slab wearing the highlight and the material to give back.
#[derive(Resource, Default)]
struct Highlight {
    entity: Option<Entity>,
    original: Option<Handle<StandardMaterial>>,
}

pub fn hover_plugin(app: &mut App) {
    app.init_resource::<HoveredBlock>()
        .init_resource::<Highlight>()
        .add_systems(
            Update,
            (pick_hovered_system, highlight_hovered_system).chain(),
        );
}

fn pick_hovered_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<StageCamera>>,
    slabs: Query<(Entity, &GlobalTransform, &Aabb), With<BlockSlab>>,
    mut hovered: ResMut<HoveredBlock>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let hit = window.cursor_position().and_then(|cursor| {
        let (camera, cam_transform) = cameras.get_single().ok()?;
        let ray = camera.viewport_to_world(cam_transform, cursor).ok()?;
        nearest_slab(ray.origin, *ray.direction, &slabs)
    });
    if hovered.entity != hit {
        hovered.entity = hit;
    }
}

fn highlight_hovered_system(
    mut commands: Commands,
    hovered: Res<HoveredBlock>,
    mut highlight: ResMut<Highlight>,
    slab_materials: Query<&MeshMaterial3d<StandardMaterial>, With<BlockSlab>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if highlight.entity == hovered.entity {
        return;
    }

    if let (Some(entity), Some(original)) = (highlight.entity.take(), highlight.original.take()) {
        // The ring may have been replaced underneath us.
        if let Some(mut slab) = commands.get_entity(entity) {
            slab.try_insert(MeshMaterial3d(original));
        }
    }

    let Some(entity) = hovered.entity else {
        return;
    };
    let Ok(current) = slab_materials.get(entity) else {
        return;
    };
    let Some(mut white) = materials.get(&current.0).cloned() else {
        return;
    };
    white.base_color = Color::WHITE;
    let handle = materials.add(white);

    highlight.entity = Some(entity);
    highlight.original = Some(current.0.clone());
    commands.entity(entity).insert(MeshMaterial3d(handle));
}

/// Closest slab along the ray, by distance from the ray origin.
pub fn nearest_slab<'a>(
    origin: Vec3,
    dir: Vec3,
    slabs: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Aabb)>,
) -> Option<Entity> {
    slabs
        .into_iter()
        .filter_map(|(entity, transform, aabb)| {
            ray_slab_distance(origin, dir, transform, aabb).map(|dist| (entity, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

/// Ray parameter at which the ray enters the slab's box.
pub fn ray_slab_distance(
    origin: Vec3,
    dir: Vec3,
    transform: &GlobalTransform,
    aabb: &Aabb,
) -> Option<f32> {
    // Affine maps keep the ray parameter, so distances stay comparable.
    let to_local = transform.affine().inverse();
    let local_origin = to_local.transform_point3(origin);
    let local_dir = to_local.transform_vector3(dir);
    let center: Vec3 = aabb.center.into();
    let half: Vec3 = aabb.half_extents.into();
    ray_aabb_intersect(local_origin, local_dir, center - half, center + half)
}

fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = 1.0 / dir;
    let t1 = (aabb_min - origin) * inv_dir;
    let t2 = (aabb_max - origin) * inv_dir;
    let t_enter = t1.min(t2).max_element();
    let t_exit = t1.max(t2).min_element();
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}
