//! Renderer traits, the post chain and stage setup.

mod post;
mod ring;
mod stage;

use bevy::prelude::*;

use crate::data::DayBlocks;

pub use post::{PostChain, PostStage, ResolvedPost};
pub use ring::{
    ring_layout, RingRenderer, RingRendererSettings, RingSettings, SlabMaterialSettings,
    SlabPlacement,
};
pub use stage::setup_stage;

pub trait BlockRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}

    /// Spawns one day of blocks under a single root entity placed at `origin`
    /// and returns that root.
    fn spawn_day(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        day: &DayBlocks,
        origin: Vec3,
    ) -> Entity;
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn BlockRenderer>);

impl RendererResource {
    pub fn new(renderer: impl BlockRenderer) -> Self {
        Self(Box::new(renderer))
    }
}
