//! Mouse-driven camera drift: two nested exponential smoothing stages.

use bevy::prelude::*;

/// Smoothing factor used for the mouse, the camera position and the look-at.
pub const DEFAULT_LERP_SPEED: f32 = 0.08;

/// Distance a clamped target is pulled inside the drift bounds.
pub const DRIFT_INSET: f32 = 1.0;

/// Rectangular xy window the camera target may wander in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl DriftBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds of `±limit` on both axes.
    pub fn symmetric(limit: f32) -> Self {
        Self {
            min: Vec2::splat(-limit),
            max: Vec2::splat(limit),
        }
    }

    /// Pulls x and y back inside the bounds, landing `DRIFT_INSET` short of
    /// the edge that was crossed. z is untouched.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            inset_clamp(point.x, self.min.x, self.max.x),
            inset_clamp(point.y, self.min.y, self.max.y),
            point.z,
        )
    }
}

impl Default for DriftBounds {
    fn default() -> Self {
        Self::symmetric(300.0)
    }
}

// Values within the inset band are pulled in as well, so every clamped target
// satisfies min+1 <= v <= max-1. Max edge is checked first so degenerate
// bounds never panic.
fn inset_clamp(value: f32, min: f32, max: f32) -> f32 {
    if value > max - DRIFT_INSET {
        max - DRIFT_INSET
    } else if value < min + DRIFT_INSET {
        min + DRIFT_INSET
    } else {
        value
    }
}

/// Sampled pointer position in normalized device coordinates.
///
/// `target` is written by pointer input (last write wins); `position` only
/// moves once per tick through [`MouseState::smooth`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    pub position: Vec2,
    pub target: Vec2,
}

impl MouseState {
    pub fn set_target(&mut self, ndc: Vec2) {
        self.target = ndc;
    }

    pub fn smooth(&mut self, factor: f32) {
        self.position = self.position.lerp(self.target, factor);
    }
}

/// Current and target camera placement plus the drift rules.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target_position: Vec3,
    pub look_at: Vec3,
    pub target_look_at: Vec3,
    pub bounds: DriftBounds,
    pub lerp_speed: f32,
}

/// Read-only view of the camera handed to renderers and listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub target_position: Vec3,
    pub look_at: Vec3,
}

impl CameraState {
    /// Camera at rest: current and target placement coincide.
    pub fn new(position: Vec3, look_at: Vec3, bounds: DriftBounds, lerp_speed: f32) -> Self {
        Self {
            position,
            target_position: position,
            look_at,
            target_look_at: look_at,
            bounds,
            lerp_speed,
        }
    }

    /// One follow step for the smoothed mouse position.
    ///
    /// The mouse nudges the target (cumulative drift), the target is clamped,
    /// then position and look-at each close a fraction of their gap.
    pub fn follow(&mut self, mouse: Vec2) {
        self.target_position.x -= mouse.x;
        self.target_position.y -= mouse.y;
        self.target_position = self.bounds.clamp(self.target_position);

        self.position = self.position.lerp(self.target_position, self.lerp_speed);
        self.look_at = self.look_at.lerp(self.target_look_at, self.lerp_speed);
    }

    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position,
            target_position: self.target_position,
            look_at: self.look_at,
        }
    }
}
