use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::{BlockRecord, DayBlocks};
use crate::render::BlockRenderer;
use crate::scene::materials;
use crate::scene::{BlockSlab, DayRing};

#[derive(Clone, Debug)]
pub struct RingSettings {
    /// Inner radius of the ring, before `world_scale`.
    pub radius: f32,
    /// Transactions per unit of box width.
    pub tx_per_unit: f32,
    /// Satoshi of fees per unit of box height and depth.
    pub fee_per_unit: f32,
    /// Vertical climb between consecutive blocks.
    pub rise_per_block: f32,
    pub world_scale: f32,
    /// Smallest box extent in world units.
    pub min_extent: f32,
}

#[derive(Clone, Debug)]
pub struct SlabMaterialSettings {
    pub color: u32,
    pub metallic: f32,
    pub roughness: f32,
}

#[derive(Clone, Debug)]
pub struct RingRendererSettings {
    pub ring: RingSettings,
    pub material: SlabMaterialSettings,
}

impl Default for RingRendererSettings {
    fn default() -> Self {
        Self {
            ring: RingSettings {
                radius: 10.0,
                tx_per_unit: 250.0,
                fee_per_unit: 5_000_000.0,
                rise_per_block: 1.0 / 15.0,
                world_scale: 20.0,
                min_extent: 1.0,
            },
            material: SlabMaterialSettings {
                color: 0xafbfd9,
                metallic: 0.6,
                roughness: 0.0,
            },
        }
    }
}

/// Where one block's box sits inside its day ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabPlacement {
    pub size: Vec3,
    pub transform: Transform,
}

/// Lays blocks out around the ring in time order: block `i` of `n` is
/// turned `i/n` of a full circle about Y, pushed out along its own X past
/// the inner radius, and lifted by `i * rise_per_block`.
pub fn ring_layout(blocks: &[BlockRecord], settings: &RingSettings) -> Vec<SlabPlacement> {
    let scale = settings.world_scale;
    let step = if blocks.is_empty() {
        0.0
    } else {
        TAU / blocks.len() as f32
    };

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let width = (block.n_tx as f32 / settings.tx_per_unit * scale).max(settings.min_extent);
            let height = (block.fee as f32 / settings.fee_per_unit * scale).max(settings.min_extent);

            let rotation = Quat::from_rotation_y(step * i as f32);
            let outward = rotation * Vec3::X * (settings.radius * scale + width / 2.0);
            let lift = Vec3::Y * (i as f32 * settings.rise_per_block * scale);

            SlabPlacement {
                size: Vec3::new(width, height, height),
                transform: Transform::from_translation(outward + lift).with_rotation(rotation),
            }
        })
        .collect()
}

/// Default renderer: a day of blocks as a rising ring of crystal boxes.
#[derive(Default)]
pub struct RingRenderer {
    pub settings: RingRendererSettings,
}

impl BlockRenderer for RingRenderer {
    fn spawn_day(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        day: &DayBlocks,
        origin: Vec3,
    ) -> Entity {
        let material = materials.add(materials::crystal_material(&self.settings.material));
        let placements = ring_layout(&day.blocks, &self.settings.ring);

        commands
            .spawn((
                DayRing { day: day.day },
                Transform::from_translation(origin),
                Visibility::Visible,
            ))
            .with_children(|ring| {
                for (block, placement) in day.blocks.iter().zip(placements) {
                    ring.spawn((
                        Mesh3d(meshes.add(Cuboid::new(
                            placement.size.x,
                            placement.size.y,
                            placement.size.z,
                        ))),
                        MeshMaterial3d(material.clone()),
                        placement.transform,
                        BlockSlab {
                            hash: block.hash.clone(),
                            height: block.height,
                            n_tx: block.n_tx,
                            fee: block.fee,
                        },
                    ));
                }
            })
            .id()
    }
}
