//! Stage controller: input → camera state update → render, once per frame.

mod controller;
mod deferred;
mod signals;
mod systems;

pub use controller::{StageAction, StageController, TickReport};
pub use deferred::DeferredQueue;
pub use signals::{Listener, ListenerId, SignalBus, StageSignal};
pub use systems::{stage_plugin, CameraMoved, StageCamera};
