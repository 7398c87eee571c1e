//! Block stage: a day of blocks as a 3D scene, with a camera that drifts
//! with the mouse and moves through the days in depth steps.
//!
//! Library root: the stage controller, data, render, and config modules.

pub mod camera;
pub mod config;
pub mod data;
pub mod render;
mod scene;
pub mod stage;
mod ui;

pub mod prelude;
pub mod sdk;

pub use data::{BlockRecord, BlockSource, DayBlocks, FixtureSource};
pub use scene::{BlockSlab, DayRing, DaySceneState, HoveredBlock};
pub use stage::{stage_plugin, CameraMoved, StageController, StageSignal};
pub use ui::HudState;
