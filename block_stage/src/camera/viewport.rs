//! Viewport bounds used for pointer normalization and the projection aspect.

use bevy::prelude::*;

/// Screen-space rectangle the stage is drawn into, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn same_size(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }

    /// Maps pointer pixels to `[-1, 1]` on both axes, origin at the centre,
    /// y pointing up. Input is not validated.
    pub fn normalize(&self, client: Vec2) -> Vec2 {
        let x = client.x - self.left;
        let y = client.y - self.top;
        Vec2::new(x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_size(1280.0, 720.0)
    }
}
