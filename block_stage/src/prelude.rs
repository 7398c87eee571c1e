//! Minimal prelude for SDK consumers.

pub use crate::camera::{CameraSnapshot, CameraState, DriftBounds};
pub use crate::config::{stage_config, StageConfig};
pub use crate::data::{BlockRecord, BlockSource, DayBlocks, FixtureSource};
pub use crate::render::{BlockRenderer, PostChain, PostStage, RingRenderer};
pub use crate::sdk::StageBuilder;
pub use crate::stage::{CameraMoved, StageController, StageSignal, TickReport};
