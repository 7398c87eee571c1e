pub(crate) mod day;
pub(crate) mod hover;
pub(crate) mod materials;

pub use day::{day_plugin, BlockSlab, DayRing, DaySceneState};
pub use hover::{hover_plugin, HoveredBlock};
pub use materials::hex_color;
