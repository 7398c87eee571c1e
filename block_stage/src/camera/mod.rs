mod depth;
mod follow;
mod viewport;

pub use depth::{depth_bucket, DepthGate, DEFAULT_BUCKET_DEPTH};
pub use follow::{
    CameraSnapshot, CameraState, DriftBounds, MouseState, DEFAULT_LERP_SPEED, DRIFT_INSET,
};
pub use viewport::Viewport;
